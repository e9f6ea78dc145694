//! The single operation performed by one invocation

use std::path::{Path, PathBuf};

/// What the user asked for, resolved from the command line.
///
/// Exactly one `Operation` is built per process run and handed to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Upload a local file
    Upload {
        /// Path as given on the command line
        path: PathBuf,
        /// Request extended retention
        keep_long: bool,
    },
    /// Shorten a URL
    Shorten {
        /// URL as given on the command line
        url: String,
        /// Request extended retention
        keep_long: bool,
    },
    /// Fetch aggregate service statistics
    Stats,
}

impl Operation {
    /// Short name used in logs and usage messages.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Upload { .. } => "upload",
            Operation::Shorten { .. } => "shorten",
            Operation::Stats => "stats",
        }
    }

    /// Whether extended retention was requested. Always `false` for stats.
    pub fn keep_long(&self) -> bool {
        match self {
            Operation::Upload { keep_long, .. } | Operation::Shorten { keep_long, .. } => {
                *keep_long
            }
            Operation::Stats => false,
        }
    }
}

/// File name announced in the multipart `file` part.
///
/// Only the final path component is sent so the local directory layout
/// never reaches the server. Returns `None` for paths without a final
/// component such as `/` or `..`.
pub fn upload_file_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}
