//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// panelcast - route notifications to named display panels
#[derive(Parser, Debug)]
#[command(
    name = "panelcast",
    author,
    version,
    about = "Route notifications to named display panels",
    long_about = "Manages a registry of named panels, each bound to a messaging topic,\n\
                  and publishes notifications to one, several or all of them."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "PANELCAST_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "PANELCAST_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "panelcast.toml",
        global = true,
        env = "PANELCAST_CONFIG"
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage registered panels
    #[command(subcommand)]
    Panels(PanelCommands),

    /// Send a notification
    Send(SendArgs),

    /// Validate configuration file
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Panel registry commands
#[derive(Subcommand, Debug)]
pub enum PanelCommands {
    /// Register a new panel
    Add(AddPanelArgs),

    /// Remove a panel by name or by list position
    Remove(RemovePanelArgs),

    /// List panels in insertion order
    List(ListPanelsArgs),
}

/// Arguments for `panels add`
#[derive(Args, Debug)]
pub struct AddPanelArgs {
    /// Panel name (unique, case-sensitive)
    pub name: String,

    /// Topic the panel listens on
    pub topic: String,
}

/// Arguments for `panels remove`
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct RemovePanelArgs {
    /// Name of the panel to remove
    pub name: Option<String>,

    /// Zero-based position in `panels list`
    #[arg(long)]
    pub index: Option<usize>,
}

/// Arguments for `panels list`
#[derive(Args, Debug)]
pub struct ListPanelsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `send` command
#[derive(Args, Debug)]
pub struct SendArgs {
    /// Message body
    #[arg(short, long, default_value = "", conflicts_with = "call")]
    pub message: String,

    /// Target panel; repeat for several (default: all panels)
    #[arg(short, long = "target", conflicts_with = "call")]
    pub targets: Vec<String>,

    /// Passthrough options, parsed as JSON when possible
    #[arg(short, long, conflicts_with = "call")]
    pub options: Option<String>,

    /// Raw service call as JSON, e.g. '{"message":"hi","data":{"target":"kitchen"}}'
    #[arg(long)]
    pub call: Option<String>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Prometheus exporter port (0 = disabled)
    #[arg(long, default_value = "0", env = "PANELCAST_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
