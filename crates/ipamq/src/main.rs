mod cli;
mod commands;
mod error;
mod output;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ipamq_core::QueryClient;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Completions don't need a config file
        Command::Completions { shell } => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "ipamq", &mut std::io::stdout());
            Ok(())
        }

        // All query commands need the configured backend set
        cmd => {
            let query = build_query_client(&cli.global)?;
            tracing::debug!(command = ?cmd, backends = query.backend_count(), "dispatching query");
            commands::dispatch(cmd, &query, &cli.global).await
        }
    }
}

/// Load the config file, validate it into descriptors, and construct one
/// adapter per backend.
fn build_query_client(global: &cli::GlobalOpts) -> Result<QueryClient, CliError> {
    let path = global
        .config
        .clone()
        .unwrap_or_else(ipamq_config::default_config_path);

    let config = ipamq_config::load_config(&path)?;
    let descriptors = config.descriptors()?;
    if descriptors.is_empty() {
        return Err(CliError::NoBackends);
    }

    let timeout = Duration::from_secs(global.timeout);
    Ok(QueryClient::new(&descriptors, timeout)?)
}
