//! HTTP middleware for request authentication.

pub mod auth;

pub use auth::{AuthUser, MaybeAuthUser};
