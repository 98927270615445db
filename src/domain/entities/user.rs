//! User account entity.

use chrono::{DateTime, Utc};

/// A registered user.
///
/// `password_hash` is `None` only for accounts created via Google login;
/// such accounts also have no security question. `google_id` is the OAuth
/// subject, unique and sparse.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub security_question: Option<String>,
    pub security_answer_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// True when the account was created through (or later linked to) Google.
    pub fn is_google_linked(&self) -> bool {
        self.google_id.is_some()
    }
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub security_question: Option<String>,
    pub security_answer_hash: Option<String>,
}

/// Partial update for an existing user. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
}
