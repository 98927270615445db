//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod health;
pub mod links;
pub mod redirect;

pub use auth::{
    check_username_handler, forgot_password_handler, get_profile_handler, google_login_handler,
    login_handler, register_handler, reset_password_handler, update_profile_handler,
};
pub use health::health_handler;
pub use links::{
    create_link_handler, delete_link_handler, list_my_links_handler, update_link_handler,
};
pub use redirect::redirect_handler;
