//! Bearer token authentication middleware and extractors.
//!
//! Two variants gate the API:
//!
//! - [`require`] rejects requests without a valid token before they reach a
//!   handler.
//! - [`optional`] attaches an identity when a valid token is present and
//!   proceeds anonymously otherwise; used at link creation so anonymous
//!   shortening works while ownership is still recorded for logged-in users.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use std::convert::Infallible;

use crate::{error::AppError, state::AppState};

/// Authenticated requester identity, inserted into request extensions by the
/// middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub i64);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().copied().ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({ "reason": "Authentication required" }),
            )
        })
    }
}

/// Requester identity that may be absent (anonymous request).
#[derive(Debug, Clone, Copy)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<AuthUser>().copied()))
    }
}

/// Mandatory authentication: missing or invalid tokens are rejected with
/// `401 Unauthorized` before the handler runs.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
pub async fn require(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })?;

    let user_id = st.auth_service.verify_token(&token)?;
    parts.extensions.insert(AuthUser(user_id));

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Optional authentication: a valid token attaches an identity, anything
/// else (missing header, malformed or expired token) proceeds anonymously.
pub async fn optional(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    if let Ok(AuthBearer(token)) = AuthBearer::from_request_parts(&mut parts, &()).await {
        if let Ok(user_id) = st.auth_service.verify_token(&token) {
            parts.extensions.insert(AuthUser(user_id));
        }
    }

    let req = Request::from_parts(parts, body);
    next.run(req).await
}
