//! Keiran CLI Library
//!
//! This library provides the core functionality for the `keiran` command:
//! uploading files, shortening URLs and reading service statistics.
//!
//! # Public API
//!
//! The primary public API is [`client::KeiranClient`], which performs one
//! request per call through a [`transport::Transport`]. Configuration types
//! are available via [`config::CliConfig`] and [`config::ConfigBuilder`].
//!
//! ```no_run
//! use keiranctl::client::KeiranClient;
//! use keiranctl::transport::HttpTransport;
//! use std::time::Duration;
//!
//! # async fn example() -> keiran_core::Result<()> {
//! let transport = HttpTransport::new("https://keiran.cc", Duration::from_secs(300))?;
//! let client = KeiranClient::new(transport, true);
//!
//! let response = client.shorten("https://example.com/a/long/path", false).await?;
//! println!("{}", response.short_url);
//! # Ok(())
//! # }
//! ```

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

/// Client for the sharing service.
pub mod client;

/// Configuration types for the CLI tool.
pub mod config;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;

/// Tracing subscriber setup.
pub mod logging;

/// Upload progress reporting.
pub mod progress;

/// Request encoding and HTTP transport.
pub mod transport;

#[cfg(test)]
pub mod test_utils;
