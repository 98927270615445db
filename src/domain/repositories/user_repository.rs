//! Repository trait for user account data access.

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username, email, or Google
    /// subject is already taken.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Finds a user matching either the email or the username.
    ///
    /// Used by registration to report which of the two is already taken.
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, AppError>;

    /// Finds a user by Google subject, falling back to an email match.
    ///
    /// The email fallback lets a pre-existing password account be linked to
    /// Google on first OAuth login.
    async fn find_by_google_id_or_email(
        &self,
        google_id: &str,
        email: &str,
    ) -> Result<Option<User>, AppError>;

    /// Partially updates a user. `None` fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user matches `id`.
    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError>;
}
