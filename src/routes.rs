//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`      - Short link redirect (public)
//! - `GET  /health`      - Health check (public)
//! - `/api/links/*`      - Link management (creation accepts anonymous requests)
//! - `/api/auth/*`       - Registration, login, and profile management
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token, mandatory or optional per route group
//! - **Path normalization** - Trailing slash handling

use axum::routing::{get, patch, post};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    check_username_handler, create_link_handler, delete_link_handler, forgot_password_handler,
    get_profile_handler, google_login_handler, health_handler, list_my_links_handler,
    login_handler, redirect_handler, register_handler, reset_password_handler,
    update_link_handler, update_profile_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;

fn link_routes(state: AppState) -> Router<AppState> {
    // Creation is open to anonymous callers; a valid token still records
    // ownership, hence the optional layer instead of none at all.
    let public = Router::new()
        .route("/", post(create_link_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::optional,
        ));

    let protected = Router::new()
        .route("/mine", get(list_my_links_handler))
        .route(
            "/{id}",
            patch(update_link_handler).delete(delete_link_handler),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::require));

    public.merge(protected)
}

fn auth_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/google", post(google_login_handler))
        .route("/check-username/{username}", get(check_username_handler))
        .route("/forgot-password", post(forgot_password_handler))
        .route("/reset-password", post(reset_password_handler));

    let protected = Router::new()
        .route(
            "/profile",
            get(get_profile_handler).put(update_profile_handler),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::require));

    public.merge(protected)
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api/links", link_routes(state.clone()))
        .nest("/api/auth", auth_routes(state.clone()))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
