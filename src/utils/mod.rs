//! Utility functions used across the application.
//!
//! - [`code_generator`] - Short code generation and custom alias validation
//! - [`url_validator`] - Target URL scheme checks

pub mod code_generator;
pub mod url_validator;
