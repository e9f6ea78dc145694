//! Error types for the keiran client

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for client operations
#[derive(Error, Debug)]
pub enum KeiranError {
    /// Malformed or missing arguments, or an intent that could not be inferred
    #[error("{0}")]
    Usage(String),

    /// Local file could not be opened or inspected
    #[error("Couldn't read file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transport failure (DNS, connection refused, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("Server returned error {status}: {body}")]
    Server { status: u16, body: String },

    /// Server answered successfully but with an unexpected body
    #[error("Error parsing response: {0}")]
    Protocol(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl KeiranError {
    /// Process exit code for this error.
    ///
    /// A usage problem only shows usage and exits cleanly with 0; every
    /// other failure exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            KeiranError::Usage(_) => 0,
            _ => 1,
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, KeiranError>;

impl From<serde_json::Error> for KeiranError {
    fn from(err: serde_json::Error) -> Self {
        KeiranError::Protocol(err.to_string())
    }
}
