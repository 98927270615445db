//! Handler for short URL redirection.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::domain::entities::RedirectStatus;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}` (public, no auth)
///
/// The stored redirect status (301 or 302) becomes the response status,
/// with the destination in the `Location` header.
///
/// # Click Counting
///
/// The click counter is bumped with a single atomic store-side increment.
/// The increment is best-effort: a storage failure there is logged and the
/// redirect is issued anyway.
///
/// # Errors
///
/// Returns 404 when the code does not exist or the link is paused; the two
/// cases are indistinguishable in status.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link = state.link_service.resolve(&code).await?;

    if let Err(e) = state.link_service.record_click(link.id).await {
        warn!(code = %link.code, error = %e, "Failed to record click");
    }

    let status = match link.redirect_status {
        RedirectStatus::Permanent => StatusCode::MOVED_PERMANENTLY,
        RedirectStatus::Temporary => StatusCode::FOUND,
    };

    Ok((status, [(header::LOCATION, link.original_url)]).into_response())
}
