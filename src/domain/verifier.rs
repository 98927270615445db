//! Google ID token verification contract.

use crate::error::AppError;
use async_trait::async_trait;

/// Profile fields extracted from a verified Google ID token.
#[derive(Debug, Clone)]
pub struct GoogleProfile {
    /// The OAuth subject (`sub` claim), stable per Google account.
    pub subject: String,
    pub email: String,
    pub name: String,
}

/// Verifies a Google-issued ID token and extracts the holder's profile.
///
/// # Implementations
///
/// - [`crate::infrastructure::google::GoogleTokenVerifier`] - checks the token
///   against Google's tokeninfo endpoint and validates the audience
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdTokenVerifier: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when the token is invalid, expired,
    /// or issued for a different audience.
    async fn verify(&self, id_token: &str) -> Result<GoogleProfile, AppError>;
}
