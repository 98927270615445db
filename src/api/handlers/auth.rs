//! Handlers for registration, login, and account management endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::auth::{
    ForgotPasswordRequest, GoogleLoginRequest, LoginRequest, ProfileResponse, RegisterRequest,
    ResetPasswordRequest, SecurityQuestionResponse, TokenResponse, UpdateProfileRequest,
    UserSummary, UsernameAvailabilityResponse,
};
use crate::api::middleware::AuthUser;
use crate::application::services::{ProfileUpdate, Registration};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a password-based account.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Errors
///
/// - 400 for validation failures (short password, bad email)
/// - 409 when the email or username is taken
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    payload.validate()?;

    state
        .auth_service
        .register(Registration {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            security_question: payload.security_question,
            security_answer: payload.security_answer,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully" })),
    ))
}

/// Logs in with email and password, returning a bearer token.
///
/// # Endpoint
///
/// `POST /api/auth/login`
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;

    let (token, user) = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(TokenResponse {
        token,
        user: UserSummary::from(&user),
    }))
}

/// Logs in with a Google ID token, creating or linking an account as needed.
///
/// # Endpoint
///
/// `POST /api/auth/google`
pub async fn google_login_handler(
    State(state): State<AppState>,
    Json(payload): Json<GoogleLoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;

    let (token, user) = state.auth_service.google_login(&payload.id_token).await?;

    Ok(Json(TokenResponse {
        token,
        user: UserSummary::from(&user),
    }))
}

/// Returns the authenticated user's profile.
///
/// # Endpoint
///
/// `GET /api/auth/profile` (bearer auth required)
pub async fn get_profile_handler(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.auth_service.profile(user.0).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

/// Updates username, email, and/or password.
///
/// # Endpoint
///
/// `PUT /api/auth/profile` (bearer auth required)
pub async fn update_profile_handler(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    payload.validate()?;

    let updated = state
        .auth_service
        .update_profile(
            user.0,
            ProfileUpdate {
                username: payload.username,
                email: payload.email,
                password: payload.password,
            },
        )
        .await?;

    Ok(Json(json!({
        "message": "Profile updated successfully",
        "user": UserSummary::from(&updated),
    })))
}

/// Checks whether a username is free.
///
/// # Endpoint
///
/// `GET /api/auth/check-username/{username}` (public)
pub async fn check_username_handler(
    Path(username): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UsernameAvailabilityResponse>, AppError> {
    let available = state.auth_service.is_username_available(&username).await?;
    Ok(Json(UsernameAvailabilityResponse { available }))
}

/// Starts password recovery by returning the stored security question.
///
/// # Endpoint
///
/// `POST /api/auth/forgot-password`
pub async fn forgot_password_handler(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<SecurityQuestionResponse>, AppError> {
    payload.validate()?;

    let security_question = state.auth_service.forgot_password(&payload.email).await?;

    Ok(Json(SecurityQuestionResponse { security_question }))
}

/// Completes password recovery after checking the security answer.
///
/// # Endpoint
///
/// `POST /api/auth/reset-password`
pub async fn reset_password_handler(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    payload.validate()?;

    state
        .auth_service
        .reset_password(
            &payload.email,
            &payload.security_answer,
            &payload.new_password,
        )
        .await?;

    Ok(Json(json!({ "message": "Password reset successfully" })))
}
