#![allow(dead_code)]

//! Shared test harness: in-memory repository implementations and a fully
//! wired [`TestServer`].
//!
//! The in-memory stores honor the same contracts as the Postgres
//! repositories (code uniqueness enforced at create, atomic click
//! increments, partial patches), so handler tests exercise the real
//! services and router without a database.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use chrono::Utc;
use serde_json::json;

use shortly::application::services::{AuthService, LinkService};
use shortly::domain::entities::{
    LinkPatch, NewShortLink, NewUser, ShortLink, User, UserPatch,
};
use shortly::domain::prober::UrlProber;
use shortly::domain::repositories::{LinkRepository, UserRepository};
use shortly::domain::verifier::{GoogleProfile, IdTokenVerifier};
use shortly::error::AppError;
use shortly::routes::app_router;
use shortly::state::AppState;

// Low cost keeps the hashing in auth flows fast under test.
pub const TEST_BCRYPT_COST: u32 = 4;
pub const TEST_JWT_SECRET: &str = "test-signing-secret";
pub const TEST_BASE_URL: &str = "http://s.test";

/// In-memory [`LinkRepository`] backed by a mutex-guarded vector.
pub struct MemoryLinkRepository {
    links: Mutex<Vec<ShortLink>>,
    next_id: AtomicI64,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            links: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Snapshot of a stored link, for assertions that bypass the API.
    pub fn get(&self, id: i64) -> Option<ShortLink> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut links = self.links.lock().unwrap();
        if links.iter().any(|l| l.code == new_link.code) {
            return Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": new_link.code }),
            ));
        }
        let now = Utc::now();
        let link = ShortLink {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            code: new_link.code,
            original_url: new_link.original_url,
            owner_id: new_link.owner_id,
            clicks: 0,
            tags: new_link.tags,
            is_active: true,
            redirect_status: Default::default(),
            created_at: now,
            updated_at: now,
        };
        links.push(link.clone());
        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ShortLink>, AppError> {
        Ok(self.get(id))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.code == code)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<ShortLink>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.owner_id == Some(owner_id))
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, patch: LinkPatch) -> Result<ShortLink, AppError> {
        let mut links = self.links.lock().unwrap();
        let link = links
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "id": id })))?;
        if let Some(url) = patch.original_url {
            link.original_url = url;
        }
        if let Some(tags) = patch.tags {
            link.tags = tags;
        }
        if let Some(is_active) = patch.is_active {
            link.is_active = is_active;
        }
        if let Some(status) = patch.redirect_status {
            link.redirect_status = status;
        }
        link.updated_at = Utc::now();
        Ok(link.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| l.id != id);
        Ok(links.len() < before)
    }

    async fn increment_clicks(&self, id: i64) -> Result<(), AppError> {
        let mut links = self.links.lock().unwrap();
        if let Some(link) = links.iter_mut().find(|l| l.id == id) {
            link.clicks += 1;
        }
        Ok(())
    }
}

/// Link store whose click increments always fail.
///
/// Everything else delegates to the wrapped in-memory store; used to check
/// that a redirect still goes out when the counter bump errors.
pub struct FailingClickRepository {
    inner: Arc<MemoryLinkRepository>,
}

#[async_trait]
impl LinkRepository for FailingClickRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        self.inner.create(new_link).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ShortLink>, AppError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        self.inner.find_by_code(code).await
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<ShortLink>, AppError> {
        self.inner.list_by_owner(owner_id).await
    }

    async fn update(&self, id: i64, patch: LinkPatch) -> Result<ShortLink, AppError> {
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        self.inner.delete(id).await
    }

    async fn increment_clicks(&self, _id: i64) -> Result<(), AppError> {
        Err(AppError::internal("Database error", json!({})))
    }
}

/// In-memory [`UserRepository`].
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| {
            u.username == new_user.username
                || u.email == new_user.email
                || (new_user.google_id.is_some() && u.google_id == new_user.google_id)
        }) {
            return Err(AppError::conflict(
                "User already exists",
                json!({ "email": new_user.email }),
            ));
        }
        let now = Utc::now();
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            google_id: new_user.google_id,
            security_question: new_user.security_question,
            security_answer_hash: new_user.security_answer_hash,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email || u.username == username)
            .cloned())
    }

    async fn find_by_google_id_or_email(
        &self,
        google_id: &str,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        let by_subject = users
            .iter()
            .find(|u| u.google_id.as_deref() == Some(google_id));
        Ok(by_subject
            .or_else(|| users.iter().find(|u| u.email == email))
            .cloned())
    }

    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))?;
        if let Some(username) = patch.username {
            user.username = username;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(hash) = patch.password_hash {
            user.password_hash = Some(hash);
        }
        if let Some(google_id) = patch.google_id {
            user.google_id = Some(google_id);
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

/// Prober that reports every target as reachable.
pub struct AlwaysReachable;

#[async_trait]
impl UrlProber for AlwaysReachable {
    async fn probe(&self, _url: &str) -> bool {
        true
    }
}

/// Prober that reports every target as unreachable.
pub struct NeverReachable;

#[async_trait]
impl UrlProber for NeverReachable {
    async fn probe(&self, _url: &str) -> bool {
        false
    }
}

/// Verifier that accepts exactly one token string and returns a fixed
/// profile for it.
pub struct StaticVerifier {
    pub token: String,
    pub profile: GoogleProfile,
}

#[async_trait]
impl IdTokenVerifier for StaticVerifier {
    async fn verify(&self, id_token: &str) -> Result<GoogleProfile, AppError> {
        if id_token == self.token {
            Ok(self.profile.clone())
        } else {
            Err(AppError::unauthorized(
                "Invalid Google token",
                json!({ "reason": "verification failed" }),
            ))
        }
    }
}

/// Everything a handler test needs: the server plus handles on the raw
/// stores for out-of-band setup and assertions.
pub struct TestApp {
    pub server: TestServer,
    pub links: Arc<MemoryLinkRepository>,
    pub users: Arc<MemoryUserRepository>,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(Arc::new(AlwaysReachable), None)
}

pub fn spawn_app_unreachable() -> TestApp {
    spawn_app_with(Arc::new(NeverReachable), None)
}

/// Harness whose click increments error on every redirect.
pub fn spawn_app_failing_clicks() -> TestApp {
    let inner = Arc::new(MemoryLinkRepository::new());
    let failing = Arc::new(FailingClickRepository {
        inner: inner.clone(),
    });
    wire_app(failing, inner, Arc::new(AlwaysReachable), None)
}

pub fn spawn_app_with(
    prober: Arc<dyn UrlProber>,
    verifier: Option<Arc<dyn IdTokenVerifier>>,
) -> TestApp {
    let links = Arc::new(MemoryLinkRepository::new());
    wire_app(links.clone(), links, prober, verifier)
}

fn wire_app(
    link_repo: Arc<dyn LinkRepository>,
    links: Arc<MemoryLinkRepository>,
    prober: Arc<dyn UrlProber>,
    verifier: Option<Arc<dyn IdTokenVerifier>>,
) -> TestApp {
    let users = Arc::new(MemoryUserRepository::new());

    let link_service = Arc::new(LinkService::new(link_repo, prober));
    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        verifier,
        TEST_JWT_SECRET.to_string(),
        TEST_BCRYPT_COST,
    ));

    let state = AppState {
        link_service,
        auth_service,
        base_url: TEST_BASE_URL.to_string(),
    };

    let app = app_router(state);
    let server = TestServer::new(ServiceExt::<Request>::into_make_service(app)).unwrap();

    TestApp {
        server,
        links,
        users,
    }
}

/// Registers a user through the API and returns a bearer token for them.
pub async fn register_and_login(app: &TestApp, username: &str, email: &str) -> String {
    app.server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "email": email,
            "password": "password123",
            "security_question": "First pet?",
            "security_answer": "Rex",
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "password123" }))
        .await;
    response.assert_status_ok();

    response.json::<serde_json::Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}
