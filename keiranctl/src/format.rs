//! Output formatting utilities for the CLI
//!
//! Renders decoded replies as text summaries or JSON.

use colored::*;
use keiran_core::api::{ServerResponse, StatsResponse};
use keiran_core::Result;

use crate::client::Outcome;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Format a successful upload
pub fn format_upload(response: &ServerResponse, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Text => {
            let mut output = format_success("Success! Your file has been uploaded");
            output.push('\n');
            output.push_str(&format!("📎 URL: {}", response.url.cyan()));

            if !response.id.is_empty() {
                output.push('\n');
                output.push_str(&format!("🔑 ID: {}", response.id.yellow()));
            }

            Ok(output)
        }
    }
}

/// Format a successful shorten request
pub fn format_shorten(response: &ServerResponse, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Text => Ok(format!(
            "{}\n🔗 Short URL: {}",
            format_success("Success! Your URL has been shortened"),
            response.short_url.cyan()
        )),
    }
}

/// Format service statistics
pub fn format_stats(stats: &StatsResponse, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
        OutputFormat::Text => Ok(format!(
            "{}\nFiles stored: {}\nURLs shortened: {}",
            "📊 Statistics:".bold(),
            stats.files.to_string().green(),
            stats.urls.to_string().green()
        )),
    }
}

/// Format whichever outcome an operation produced
pub fn format_outcome(outcome: &Outcome, format: &OutputFormat) -> Result<String> {
    match outcome {
        Outcome::Uploaded(response) => format_upload(response, format),
        Outcome::Shortened(response) => format_shorten(response, format),
        Outcome::Stats(stats) => format_stats(stats, format),
    }
}

/// Format success message
pub fn format_success(message: &str) -> String {
    format!("{} {}", "✨".bold(), message.green().bold())
}
