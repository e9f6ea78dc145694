//! Turns raw process arguments into a parsed [`Cli`].
//!
//! Besides plain clap parsing this handles the shortcuts the CLI offers:
//! no arguments at all shows usage, `-long` is accepted as `--long`, and a
//! leading file path or URL stands in for an omitted `upload`/`shorten`.

use clap::{CommandFactory, Parser};
use keiran_core::KeiranError;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use thiserror::Error;
use url::Url;

use super::commands::Cli;

/// Global options whose value is a separate argument.
const VALUE_OPTIONS: &[&str] = &["-s", "--server", "-f", "--format", "--upload-timeout"];

/// Result of resolving the command line
#[derive(Debug)]
pub enum Resolution {
    /// No arguments were given: print usage and exit successfully
    ShowUsage,
    /// A command to run
    Run {
        cli: Cli,
        /// Subcommand inserted for a bare file path or URL
        inferred: Option<&'static str>,
    },
}

/// Why the command line could not be resolved
#[derive(Debug, Error)]
pub enum ResolveError {
    /// First argument is neither a command, an existing file, nor a URL
    #[error("Could not determine what you want to do with '{0}'.")]
    UnknownIntent(String),

    /// clap rejected the arguments (or handled `--help`/`--version`)
    #[error(transparent)]
    Cli(#[from] clap::Error),
}

impl From<ResolveError> for KeiranError {
    fn from(err: ResolveError) -> Self {
        KeiranError::Usage(err.to_string())
    }
}

/// Resolve raw arguments, program name first.
pub fn resolve<I, T>(args: I) -> Result<Resolution, ResolveError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() <= 1 {
        return Ok(Resolution::ShowUsage);
    }

    // Everything after `--` is positional
    for arg in args.iter_mut().skip(1) {
        if arg.as_os_str() == "--" {
            break;
        }
        if arg.as_os_str() == "-long" {
            *arg = OsString::from("--long");
        }
    }

    let mut inferred = None;
    if let Some(index) = first_positional(&args) {
        let first = args[index].clone();
        if !is_known_command(&first) {
            let command = guess_command(&first)
                .ok_or_else(|| ResolveError::UnknownIntent(first.to_string_lossy().into_owned()))?;
            args.insert(index, OsString::from(command));
            inferred = Some(command);
        }
    }

    let cli = Cli::try_parse_from(args)?;
    Ok(Resolution::Run { cli, inferred })
}

/// Index of the first argument that is not an option or an option's value.
fn first_positional(args: &[OsString]) -> Option<usize> {
    let mut index = 1;
    while index < args.len() {
        let arg = args[index].to_string_lossy();
        if VALUE_OPTIONS.contains(&&*arg) {
            index += 2;
        } else if arg.starts_with('-') {
            index += 1;
        } else {
            return Some(index);
        }
    }
    None
}

/// Whether `name` is a subcommand clap knows, `help` included.
pub fn is_known_command(name: &OsStr) -> bool {
    let Some(name) = name.to_str() else {
        return false;
    };
    if name == "help" {
        return true;
    }

    Cli::command()
        .get_subcommands()
        .any(|cmd| cmd.get_name() == name || cmd.get_all_aliases().any(|alias| alias == name))
}

/// Infer the command for a bare argument.
///
/// An existing path wins over a URL, so a file named like a URL is uploaded.
pub fn guess_command(arg: &OsStr) -> Option<&'static str> {
    if Path::new(arg).exists() {
        return Some("upload");
    }

    if arg.to_str().is_some_and(is_absolute_url) {
        return Some("shorten");
    }

    None
}

/// A URL with a scheme and a host, e.g. `https://example.com/x`.
fn is_absolute_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| url.has_host())
        .unwrap_or(false)
}
