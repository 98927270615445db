//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{RedirectStatus, ShortLink};

/// Request body for `POST /api/links`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The destination URL (must be valid HTTP/HTTPS; probed for reachability).
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,

    /// Optional caller-chosen code used instead of a generated one.
    pub custom_alias: Option<String>,

    /// Free-form tags stored as given.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for `PATCH /api/links/{id}`.
///
/// All fields are optional — only provided fields are changed. `tags`
/// replaces the stored set wholesale.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    /// New destination URL (re-validated, not re-probed).
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: Option<String>,

    pub tags: Option<Vec<String>>,

    /// `false` pauses the link: redirects return 404 until reactivated.
    pub is_active: Option<bool>,

    /// `"301"` or `"302"`.
    pub redirect_status: Option<String>,
}

/// JSON representation of a short link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub short_url: String,
    pub original_url: String,
    pub owner_id: Option<i64>,
    pub clicks: i64,
    pub tags: Vec<String>,
    pub is_active: bool,
    pub redirect_status: RedirectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkResponse {
    /// Builds the response, rendering the full short URL from the service
    /// base URL.
    pub fn from_link(link: ShortLink, base_url: &str) -> Self {
        let short_url = format!("{}/{}", base_url.trim_end_matches('/'), link.code);
        Self {
            id: link.id,
            code: link.code,
            short_url,
            original_url: link.original_url,
            owner_id: link.owner_id,
            clicks: link.clicks,
            tags: link.tags,
            is_active: link.is_active,
            redirect_status: link.redirect_status,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}
