//! Command-line arguments for both binaries.

use clap::Parser;
use std::path::PathBuf;

/// Fetch the case dataset, chart the national series and mail it.
#[derive(Debug, Clone, Parser)]
#[command(name = "casewatch", version, about)]
pub struct ReportArgs {
    /// Configuration file (YAML or TOML)
    #[arg(short, long, env = "CASEWATCH_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Log filter, overrides the configured level
    #[arg(long)]
    pub log_level: Option<String>,

    /// Read the dataset from a local CSV instead of the configured URL
    #[arg(long, value_name = "FILE")]
    pub dataset_file: Option<PathBuf>,

    /// Build everything but do not submit the message
    #[arg(long)]
    pub dry_run: bool,
}

/// Start the dashboard server in the background.
#[derive(Debug, Clone, Parser)]
#[command(name = "dashboard-launcher", version, about)]
pub struct LauncherArgs {
    /// Server executable
    #[arg(long, default_value = "panel")]
    pub program: String,

    /// Port to serve on
    #[arg(long, default_value_t = 5009)]
    pub port: u16,

    /// Value passed as --allow-websocket-origin
    #[arg(long, default_value = "*")]
    pub allow_websocket_origin: String,

    /// Log filter
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Notebook or app to serve
    #[arg(default_value = "covid-interactive.ipynb")]
    pub target: String,

    /// Extra arguments appended to the server command line
    #[arg(last = true)]
    pub extra_args: Vec<String>,
}
