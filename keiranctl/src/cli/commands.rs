//! CLI command and subcommand definitions

use clap::{Parser, Subcommand};
use keiran_core::Operation;
use std::path::PathBuf;

/// Inferred forms, shown under `--help` and in the usage text.
const INFERRED_FORMS: &str = "\
You can also directly provide a file or URL:
  keiran <file_path>    (uploads the file)
  keiran <url>          (shortens the URL)";

/// Usage text printed when no arguments are given or intent is unclear.
pub const USAGE: &str = "\
Usage:
  keiran upload [-long] <file_path>
  keiran shorten [-long] <url>
  keiran stats

You can also directly provide a file or URL:
  keiran <file_path>    (uploads the file)
  keiran <url>          (shortens the URL)
";

/// Keiran sharing client
#[derive(Parser, Debug)]
#[command(name = "keiran")]
#[command(version, about = "Upload files and shorten URLs on keiran.cc", long_about = None)]
#[command(after_help = INFERRED_FORMS)]
pub struct Cli {
    /// Server URL (overrides config file and KEIRAN_SERVER)
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    /// Output format (overrides config file and KEIRAN_FORMAT)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Don't load config file
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Hide the upload progress bar
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Upload timeout in seconds (overrides config file and KEIRAN_UPLOAD_TIMEOUT)
    #[arg(long, value_name = "SECS", global = true)]
    pub upload_timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Decoded server reply as JSON
    Json,
}

impl OutputFormat {
    /// Name used in configuration files and environment variables
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl From<&OutputFormat> for crate::format::OutputFormat {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Text => crate::format::OutputFormat::Text,
            OutputFormat::Json => crate::format::OutputFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a file
    Upload {
        /// Keep the file for a month
        #[arg(long)]
        long: bool,

        /// File to upload
        file_path: PathBuf,
    },

    /// Shorten a URL
    Shorten {
        /// Keep the URL for a month
        #[arg(long)]
        long: bool,

        /// URL to shorten
        url: String,
    },

    /// Show service statistics
    Stats,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// The protocol operation this command performs, if any.
    ///
    /// `completion` is handled locally and has none.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Commands::Upload { long, file_path } => Some(Operation::Upload {
                path: file_path.clone(),
                keep_long: *long,
            }),
            Commands::Shorten { long, url } => Some(Operation::Shorten {
                url: url.clone(),
                keep_long: *long,
            }),
            Commands::Stats => Some(Operation::Stats),
            Commands::Completion { .. } => None,
        }
    }
}
