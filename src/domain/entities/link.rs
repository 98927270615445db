//! Short link entity and the types used to create and patch it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// HTTP status code used when redirecting a short link.
///
/// Serialized as the string `"301"` / `"302"`, matching the stored
/// representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedirectStatus {
    #[serde(rename = "301")]
    Permanent,
    #[serde(rename = "302")]
    Temporary,
}

impl RedirectStatus {
    /// Parses the stored `"301"` / `"302"` representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "301" => Some(Self::Permanent),
            "302" => Some(Self::Temporary),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Permanent => "301",
            Self::Temporary => "302",
        }
    }
}

impl Default for RedirectStatus {
    fn default() -> Self {
        Self::Temporary
    }
}

/// A shortened URL with its lifecycle state.
///
/// `owner_id` is `None` for links created anonymously. `clicks` is only
/// ever incremented by the redirect path.
#[derive(Debug, Clone)]
pub struct ShortLink {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub owner_id: Option<i64>,
    pub clicks: i64,
    /// Free-form tags, insertion order preserved, not deduplicated.
    pub tags: Vec<String>,
    /// When `false` the link is paused: redirects return 404 without
    /// counting a click.
    pub is_active: bool,
    pub redirect_status: RedirectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShortLink {
    pub fn is_paused(&self) -> bool {
        !self.is_active
    }
}

/// Input data for creating a new short link.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub code: String,
    pub original_url: String,
    pub owner_id: Option<i64>,
    pub tags: Vec<String>,
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged. `tags` is a wholesale replacement,
/// not a merge.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub original_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub redirect_status: Option<RedirectStatus>,
}
