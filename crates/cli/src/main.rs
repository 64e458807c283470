//! # panelcast CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Panel registry management (persisted to the config file)
//! - Notification sending
//! - Configuration validation and inspection

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_info, run_panels, run_send, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    info!(version = env!("CARGO_PKG_VERSION"), "panelcast starting");

    let result = match &cli.command {
        Commands::Panels(command) => run_panels(&cli.config, command),
        Commands::Send(args) => run_send(&cli.config, args).await,
        Commands::Validate(args) => run_validate(&cli.config, args),
        Commands::Info(args) => run_info(&cli.config, args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    observability::init_with_config(observability_config(cli))
}

fn observability_config(cli: &Cli) -> observability::ObservabilityConfig {
    let default_log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    observability::ObservabilityConfig {
        log_format: cli.log_format.into(),
        metrics_port: None,
        default_log_level: default_log_level.to_string(),
        // --quiet wins over RUST_LOG
        forced_log_level: cli.quiet.then(|| "warn".to_string()),
    }
}
