//! Keiran Core Library
//!
//! Shared types, wire models, and errors for the keiran sharing client.
//! The CLI crate builds requests from [`Operation`] values and decodes
//! replies into the models in [`api`].

pub mod api;
pub mod error;
pub mod operation;

// Re-export commonly used types
pub use error::*;
pub use operation::*;

/// Base URL of the public sharing service.
pub const DEFAULT_SERVER_URL: &str = "https://keiran.cc";
