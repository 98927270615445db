//! Handlers for link management endpoints (create, list, update, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse, UpdateLinkRequest};
use crate::api::middleware::{AuthUser, MaybeAuthUser};
use crate::domain::entities::{LinkPatch, RedirectStatus};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links` (optional bearer auth)
///
/// Anonymous requests create unowned links; a valid token attaches the
/// caller as owner. The target is scheme-checked and probed for
/// reachability before anything is written.
///
/// # Errors
///
/// - 400 for an invalid or unreachable URL
/// - 409 when the custom alias is taken
pub async fn create_link_handler(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_short_link(
            payload.original_url,
            payload.custom_alias,
            payload.tags,
            user.map(|u| u.0),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, &state.base_url)),
    ))
}

/// Lists the authenticated user's links.
///
/// # Endpoint
///
/// `GET /api/links/mine` (bearer auth required)
pub async fn list_my_links_handler(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links(user.0).await?;

    Ok(Json(
        links
            .into_iter()
            .map(|link| LinkResponse::from_link(link, &state.base_url))
            .collect(),
    ))
}

/// Partially updates a link.
///
/// # Endpoint
///
/// `PATCH /api/links/{id}` (bearer auth required)
///
/// Only provided fields change. A new destination URL is re-validated for
/// scheme but not re-probed; `tags` replaces the stored set wholesale.
///
/// # Errors
///
/// - 404 for an unknown id
/// - 401 when the link belongs to someone else
/// - 400 for an invalid URL or redirect status
pub async fn update_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let redirect_status = payload
        .redirect_status
        .map(|value| {
            RedirectStatus::parse(&value).ok_or_else(|| {
                AppError::bad_request(
                    "redirect_status must be \"301\" or \"302\"",
                    json!({ "provided": value }),
                )
            })
        })
        .transpose()?;

    let patch = LinkPatch {
        original_url: payload.original_url,
        tags: payload.tags,
        is_active: payload.is_active,
        redirect_status,
    };

    let link = state.link_service.update_link(id, patch, user.0).await?;

    Ok(Json(LinkResponse::from_link(link, &state.base_url)))
}

/// Deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}` (bearer auth required)
///
/// The record is removed outright; there is no soft delete or restore.
pub async fn delete_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    state.link_service.delete_link(id, user.0).await?;

    Ok(Json(json!({ "message": "URL deleted successfully" })))
}
