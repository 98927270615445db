//! Target URL validation.
//!
//! Stored URLs are kept verbatim; the only admission rule is a syntactic
//! parse plus an http/https scheme check, applied identically at creation
//! and on every destination update.

use crate::error::AppError;
use serde_json::json;
use url::Url;

/// Validates that `input` is an absolute `http` or `https` URL.
///
/// Rejects dangerous schemes like `javascript:`, `data:`, and `file:` as a
/// side effect of the allowlist.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for malformed URLs or non-HTTP(S) schemes.
pub fn validate_target_url(input: &str) -> Result<(), AppError> {
    let url = Url::parse(input)
        .map_err(|e| AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() })))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AppError::bad_request(
            "URL must start with http:// or https://",
            json!({ "scheme": scheme }),
        )),
    }
}
