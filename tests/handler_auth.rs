mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use shortly::domain::verifier::GoogleProfile;

// ─── register / login / profile ──────────────────────────────────────────────

#[tokio::test]
async fn test_register_login_profile_flow() {
    let app = common::spawn_app();

    app.server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "password123",
            "security_question": "First pet?",
            "security_answer": "Rex",
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let login = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "alice@example.com", "password": "password123" }))
        .await;
    login.assert_status_ok();
    let body = login.json::<serde_json::Value>();
    let token = body["token"].as_str().unwrap();
    assert_eq!(body["user"]["username"], "alice");

    let profile = app
        .server
        .get("/api/auth/profile")
        .authorization_bearer(token)
        .await;
    profile.assert_status_ok();
    let body = profile.json::<serde_json::Value>();
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["google_linked"], false);
    assert_eq!(body["security_question"], "First pet?");
}

#[tokio::test]
async fn test_register_duplicate_email_conflict() {
    let app = common::spawn_app();
    common::register_and_login(&app, "alice", "alice@example.com").await;

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice2",
            "email": "alice@example.com",
            "password": "password123",
            "security_question": "q",
            "security_answer": "a",
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_short_password_rejected() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "short",
            "security_question": "q",
            "security_answer": "a",
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let app = common::spawn_app();
    common::register_and_login(&app, "alice", "alice@example.com").await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "alice@example.com", "password": "wrong-password" }))
        .await;

    response.assert_status_unauthorized();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_email_unauthorized() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "ghost@example.com", "password": "password123" }))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_profile_requires_valid_token() {
    let app = common::spawn_app();

    app.server
        .get("/api/auth/profile")
        .await
        .assert_status_unauthorized();

    app.server
        .get("/api/auth/profile")
        .authorization_bearer("not-a-jwt")
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_update_profile_changes_password() {
    let app = common::spawn_app();
    let token = common::register_and_login(&app, "alice", "alice@example.com").await;

    let response = app
        .server
        .put("/api/auth/profile")
        .authorization_bearer(&token)
        .json(&json!({ "username": "alice2", "password": "newpassword1" }))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["user"]["username"],
        "alice2"
    );

    // Old password no longer works, new one does.
    app.server
        .post("/api/auth/login")
        .json(&json!({ "email": "alice@example.com", "password": "password123" }))
        .await
        .assert_status_unauthorized();

    app.server
        .post("/api/auth/login")
        .json(&json!({ "email": "alice@example.com", "password": "newpassword1" }))
        .await
        .assert_status_ok();
}

// ─── username availability ───────────────────────────────────────────────────

#[tokio::test]
async fn test_check_username_availability() {
    let app = common::spawn_app();
    common::register_and_login(&app, "alice", "alice@example.com").await;

    let taken = app.server.get("/api/auth/check-username/alice").await;
    taken.assert_status_ok();
    assert_eq!(taken.json::<serde_json::Value>()["available"], false);

    let free = app.server.get("/api/auth/check-username/bob").await;
    free.assert_status_ok();
    assert_eq!(free.json::<serde_json::Value>()["available"], true);
}

// ─── password recovery ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_forgot_and_reset_password_flow() {
    let app = common::spawn_app();
    common::register_and_login(&app, "alice", "alice@example.com").await;

    let question = app
        .server
        .post("/api/auth/forgot-password")
        .json(&json!({ "email": "alice@example.com" }))
        .await;
    question.assert_status_ok();
    assert_eq!(
        question.json::<serde_json::Value>()["security_question"],
        "First pet?"
    );

    // Answer comparison is case-insensitive.
    app.server
        .post("/api/auth/reset-password")
        .json(&json!({
            "email": "alice@example.com",
            "security_answer": "REX",
            "new_password": "resetpass1",
        }))
        .await
        .assert_status_ok();

    app.server
        .post("/api/auth/login")
        .json(&json!({ "email": "alice@example.com", "password": "resetpass1" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_reset_password_wrong_answer_rejected() {
    let app = common::spawn_app();
    common::register_and_login(&app, "alice", "alice@example.com").await;

    app.server
        .post("/api/auth/reset-password")
        .json(&json!({
            "email": "alice@example.com",
            "security_answer": "Whiskers",
            "new_password": "resetpass1",
        }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_forgot_password_unknown_email_not_found() {
    let app = common::spawn_app();

    app.server
        .post("/api/auth/forgot-password")
        .json(&json!({ "email": "ghost@example.com" }))
        .await
        .assert_status_not_found();
}

// ─── Google login ────────────────────────────────────────────────────────────

fn google_app(token: &str, subject: &str, email: &str, name: &str) -> common::TestApp {
    common::spawn_app_with(
        Arc::new(common::AlwaysReachable),
        Some(Arc::new(common::StaticVerifier {
            token: token.to_string(),
            profile: GoogleProfile {
                subject: subject.to_string(),
                email: email.to_string(),
                name: name.to_string(),
            },
        })),
    )
}

#[tokio::test]
async fn test_google_login_creates_account() {
    let app = google_app("good-token", "google-sub-1", "carol@example.com", "Carol Jones");

    let response = app
        .server
        .post("/api/auth/google")
        .json(&json!({ "id_token": "good-token" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"], "carol@example.com");

    // Second login reuses the account.
    let again = app
        .server
        .post("/api/auth/google")
        .json(&json!({ "id_token": "good-token" }))
        .await;
    again.assert_status_ok();
    assert_eq!(
        again.json::<serde_json::Value>()["user"]["id"],
        body["user"]["id"]
    );
}

#[tokio::test]
async fn test_google_login_links_existing_email_account() {
    let app = google_app("good-token", "google-sub-1", "alice@example.com", "Alice");
    let token = common::register_and_login(&app, "alice", "alice@example.com").await;

    let response = app
        .server
        .post("/api/auth/google")
        .json(&json!({ "id_token": "good-token" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["user"]["username"],
        "alice"
    );

    let profile = app
        .server
        .get("/api/auth/profile")
        .authorization_bearer(&token)
        .await;
    assert_eq!(profile.json::<serde_json::Value>()["google_linked"], true);
}

#[tokio::test]
async fn test_google_login_invalid_token_unauthorized() {
    let app = google_app("good-token", "google-sub-1", "carol@example.com", "Carol");

    app.server
        .post("/api/auth/google")
        .json(&json!({ "id_token": "bad-token" }))
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_google_login_disabled_without_verifier() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/auth/google")
        .json(&json!({ "id_token": "anything" }))
        .await;

    // No verifier configured: the endpoint refuses rather than trusting
    // the token blindly.
    response.assert_status_internal_server_error();
}
