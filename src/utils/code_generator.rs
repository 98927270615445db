//! Short code generation and custom alias validation.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Length of random bytes before base64 encoding.
///
/// 6 bytes encode to exactly 8 URL-safe characters without padding.
const CODE_LENGTH_BYTES: usize = 6;

/// Generates a random 8-character short code.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding. The 48-bit space makes collisions rare enough that
/// callers do not pre-check the store; the database uniqueness constraint
/// is the backstop.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Validates a caller-supplied custom alias.
///
/// The only rule is non-emptiness: character set and length are deliberately
/// unrestricted, matching the store-side uniqueness check as the sole other
/// constraint. An alias containing path-unsafe characters is accepted even
/// though it will behave oddly as a URL path segment.
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() {
        return Err(AppError::bad_request(
            "Custom alias must not be empty",
            json!({}),
        ));
    }

    Ok(())
}
