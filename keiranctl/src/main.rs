//! Keiran CLI
//!
//! Command-line client for uploading files and shortening URLs.

use anyhow::Result;
use keiran_core::KeiranError;
use keiranctl::cli::{
    generate_completion, handle_operation, resolve, Cli, Commands, OutputFormat, Resolution,
    ResolveError, USAGE,
};
use keiranctl::client::KeiranClient;
use keiranctl::config::CliConfig;
use keiranctl::logging::init_tracing;
use keiranctl::transport::HttpTransport;
use std::io::IsTerminal;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let (cli, inferred) = match resolve(std::env::args_os()) {
        Ok(Resolution::ShowUsage) => {
            print!("{}", USAGE);
            return;
        }
        Ok(Resolution::Run { cli, inferred }) => (cli, inferred),
        // Prints help/version to stdout (exit 0) or the parse error (exit 2)
        Err(ResolveError::Cli(e)) => e.exit(),
        Err(e @ ResolveError::UnknownIntent(_)) => {
            println!("{}", KeiranError::from(e));
            print!("{}", USAGE);
            return;
        }
    };

    if let Err(e) = run(cli, inferred).await {
        eprintln!("Error: {}", e);
        let code = e
            .downcast_ref::<KeiranError>()
            .map(KeiranError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(cli: Cli, inferred: Option<&'static str>) -> Result<()> {
    let operation = match cli.command.operation() {
        Some(operation) => operation,
        None => {
            if let Commands::Completion { shell } = cli.command {
                generate_completion(shell);
            }
            return Ok(());
        }
    };

    // Priority chain: CLI args → env → config file → defaults
    let mut builder = CliConfig::builder();
    if let Some(ref server) = cli.server {
        builder = builder.with_server_url(server)?;
    }
    if let Some(format) = cli.format {
        builder = builder.with_output_format(format.as_str())?;
    }
    if cli.verbose {
        builder = builder.with_verbose(true);
    }
    if cli.no_progress {
        builder = builder.with_progress(false);
    }
    if let Some(timeout) = cli.upload_timeout {
        builder = builder.with_upload_timeout(timeout)?;
    }
    let config = builder
        .with_env_overrides()
        .with_config_file(!cli.no_config)?
        .build()?;

    init_tracing(config.verbose);
    debug!(?config, "Configuration resolved");
    if let Some(command) = inferred {
        debug!(command, "Inferred command from first argument");
    }
    debug!(?operation, "Resolved operation");

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let output_format = match config.output_format.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Text,
    };
    let show_progress = config.progress
        && output_format == OutputFormat::Text
        && std::io::stderr().is_terminal();

    let transport = HttpTransport::new(config.server_url.clone(), config.upload_timeout())?;
    let client = KeiranClient::new(transport, show_progress);

    handle_operation(&client, &operation, &output_format).await?;

    Ok(())
}
