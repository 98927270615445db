//! Repository trait for short link data access.

use crate::domain::entities::{LinkPatch, NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// The backing store is the sole arbiter of the `code` uniqueness invariant:
/// [`create`](LinkRepository::create) must reject a duplicate code even when
/// the caller did not pre-check, and
/// [`increment_clicks`](LinkRepository::increment_clicks) must be an atomic
/// store-side operation, never an application-level read-modify-write.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by its record id.
    async fn find_by_id(&self, id: i64) -> Result<Option<ShortLink>, AppError>;

    /// Finds a link by its short code (exact, case-sensitive match).
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Lists every link owned by the given user, in insertion order.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<ShortLink>, AppError>;

    /// Partially updates a link.
    ///
    /// Only fields present in [`LinkPatch`] are modified; `None` fields are
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `id`.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, patch: LinkPatch) -> Result<ShortLink, AppError>;

    /// Hard-deletes a link.
    ///
    /// Returns `Ok(true)` if the link was found and removed, `Ok(false)`
    /// if it did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Atomically increments the click counter by 1.
    ///
    /// Expressed as a single store-level operation so concurrent redirects
    /// never lose updates.
    async fn increment_clicks(&self, id: i64) -> Result<(), AppError>;
}
