//! Domain layer: entities and the traits implemented by infrastructure.

pub mod entities;
pub mod prober;
pub mod repositories;
pub mod verifier;
