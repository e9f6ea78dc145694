//! CLI configuration management
//!
//! Resolves the settings for one invocation. The config file is only ever
//! read; the client keeps no local state of its own.

use keiran_core::{KeiranError, Result, DEFAULT_SERVER_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upload timeout used when nothing overrides it (5 minutes).
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 300;

const MAX_UPLOAD_TIMEOUT_SECS: u64 = 3600;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// Base URL of the sharing service
    pub server_url: String,

    /// Output format ("text" or "json")
    pub output_format: String,

    /// Enable verbose logging by default
    pub verbose: bool,

    /// Upload request timeout in seconds
    pub upload_timeout: u64,

    /// Show the upload progress bar
    pub progress: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            output_format: "text".to_string(),
            verbose: false,
            upload_timeout: DEFAULT_UPLOAD_TIMEOUT_SECS,
            progress: true,
        }
    }
}

impl CliConfig {
    /// Load configuration from a file, if it exists
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            KeiranError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content)
            .map(Some)
            .map_err(|e| KeiranError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Get the configuration file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("keiran").join("cli.toml"))
    }

    /// Upload timeout as a duration
    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout)
    }

    /// Create a new builder for constructing configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for CLI configuration with validation and priority chain support
///
/// Priority chain (lowest to highest):
/// 1. Defaults
/// 2. Config file
/// 3. Environment variables
/// 4. CLI arguments
///
/// Values set first win, so CLI arguments are applied before the
/// environment and the file.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    server_url: Option<String>,
    output_format: Option<String>,
    verbose: Option<bool>,
    upload_timeout: Option<u64>,
    progress: Option<bool>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set server URL (with validation)
    pub fn with_server_url(mut self, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        Self::validate_url(&url)?;
        self.server_url = Some(url);
        Ok(self)
    }

    /// Set output format (with validation)
    pub fn with_output_format(mut self, format: impl Into<String>) -> Result<Self> {
        let format = format.into();
        Self::validate_output_format(&format)?;
        self.output_format = Some(format);
        Ok(self)
    }

    /// Set verbose flag
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Set upload timeout in seconds (with validation)
    pub fn with_upload_timeout(mut self, timeout: u64) -> Result<Self> {
        Self::validate_timeout(timeout)?;
        self.upload_timeout = Some(timeout);
        Ok(self)
    }

    /// Set progress bar visibility
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Fill unset values from the default config file
    pub fn with_config_file(self, load_file: bool) -> Result<Self> {
        if !load_file {
            return Ok(self);
        }

        match CliConfig::config_path() {
            Some(path) => self.with_config_file_at(&path),
            None => Ok(self),
        }
    }

    /// Fill unset values from the config file at `path`
    ///
    /// A missing file is not an error. A file that exists but cannot be
    /// parsed is.
    pub fn with_config_file_at(self, path: &Path) -> Result<Self> {
        let Some(config) = CliConfig::load_from(path)? else {
            return Ok(self);
        };

        let builder = self;
        Ok(Self {
            server_url: builder.server_url.or(Some(config.server_url)),
            output_format: builder.output_format.or(Some(config.output_format)),
            verbose: builder.verbose.or(Some(config.verbose)),
            upload_timeout: builder.upload_timeout.or(Some(config.upload_timeout)),
            progress: builder.progress.or(Some(config.progress)),
        })
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        // Only apply env vars if values weren't already set (preserving priority)
        if self.server_url.is_none() {
            if let Ok(server_url) = std::env::var("KEIRAN_SERVER") {
                if Self::validate_url(&server_url).is_ok() {
                    self.server_url = Some(server_url);
                }
            }
        }

        if self.output_format.is_none() {
            if let Ok(format) = std::env::var("KEIRAN_FORMAT") {
                if Self::validate_output_format(&format).is_ok() {
                    self.output_format = Some(format);
                }
            }
        }

        if self.verbose.is_none() {
            if let Ok(verbose) = std::env::var("KEIRAN_VERBOSE") {
                self.verbose = Some(verbose.to_lowercase() == "true" || verbose == "1");
            }
        }

        if self.upload_timeout.is_none() {
            if let Ok(timeout) = std::env::var("KEIRAN_UPLOAD_TIMEOUT") {
                if let Ok(timeout) = timeout.parse() {
                    if Self::validate_timeout(timeout).is_ok() {
                        self.upload_timeout = Some(timeout);
                    }
                }
            }
        }

        self
    }

    /// Build the final configuration with validation
    pub fn build(self) -> Result<CliConfig> {
        let defaults = CliConfig::default();

        let server_url = self.server_url.unwrap_or(defaults.server_url);
        let output_format = self.output_format.unwrap_or(defaults.output_format);
        let upload_timeout = self.upload_timeout.unwrap_or(defaults.upload_timeout);

        // Config file values bypass the setters, so validate everything here
        Self::validate_url(&server_url)?;
        Self::validate_output_format(&output_format)?;
        Self::validate_timeout(upload_timeout)?;

        Ok(CliConfig {
            server_url: normalize_url(&server_url),
            output_format,
            verbose: self.verbose.unwrap_or(defaults.verbose),
            upload_timeout,
            progress: self.progress.unwrap_or(defaults.progress),
        })
    }

    fn validate_url(url: &str) -> Result<()> {
        if url.is_empty() {
            return Err(KeiranError::Config("Server URL cannot be empty".to_string()));
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(KeiranError::Config(
                "Server URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_output_format(format: &str) -> Result<()> {
        match format {
            "text" | "json" => Ok(()),
            _ => Err(KeiranError::Config(format!(
                "Invalid output format '{}'. Must be 'text' or 'json'",
                format
            ))),
        }
    }

    fn validate_timeout(timeout: u64) -> Result<()> {
        if timeout == 0 {
            return Err(KeiranError::Config(
                "Upload timeout must be greater than 0".to_string(),
            ));
        }

        if timeout > MAX_UPLOAD_TIMEOUT_SECS {
            return Err(KeiranError::Config(format!(
                "Upload timeout must be less than or equal to {} seconds",
                MAX_UPLOAD_TIMEOUT_SECS
            )));
        }

        Ok(())
    }
}

/// Normalize a server URL by removing trailing slashes.
fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
