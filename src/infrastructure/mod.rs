//! Infrastructure layer: database access and outbound HTTP integrations.

pub mod google;
pub mod persistence;
pub mod probe;
