//! Command execution handlers

use keiran_core::{Operation, Result};

use crate::client::KeiranClient;
use crate::format::format_outcome;
use crate::transport::Transport;

use super::commands::*;

/// Handle an upload, shorten or stats operation.
///
/// Output is built completely before anything is printed, so a failed
/// decode never leaves partial lines on stdout.
pub async fn handle_operation<T: Transport>(
    client: &KeiranClient<T>,
    operation: &Operation,
    format: &OutputFormat,
) -> Result<()> {
    let outcome = client.execute(operation).await?;
    let formatted = format_outcome(&outcome, &format.into())?;
    println!("{}", formatted);

    Ok(())
}

/// Generate shell completion script
pub fn generate_completion(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
