//! Core business entities.

pub mod link;
pub mod user;

pub use link::{LinkPatch, NewShortLink, RedirectStatus, ShortLink};
pub use user::{NewUser, User, UserPatch};
