use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};

/// Shared application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub auth_service: Arc<AuthService>,
    pub base_url: String,
}
