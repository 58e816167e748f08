//! Main entry point for the case report.

use anyhow::Context;
use casewatch::{ReportArgs, ReportGenerator};
use casewatch_common::{init_logging, LoggingConfig};
use casewatch_config::ConfigLoader;
use clap::Parser;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = ReportArgs::parse();

    let config_path = args.config.clone().or_else(ConfigLoader::locate);
    let config = match &config_path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load_defaults(),
    }
    .context("Failed to load configuration")?;

    let mut logging = LoggingConfig::from(&config.logging);
    if let Some(level) = &args.log_level {
        logging.level.clone_from(level);
    }
    let _guard = init_logging(logging).context("Failed to initialize logging")?;

    info!(version = env!("CARGO_PKG_VERSION"), dry_run = args.dry_run, "Starting casewatch");
    match &config_path {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("No configuration file found, using defaults and environment"),
    }

    let generator = ReportGenerator::from_config(config, args.dataset_file.as_deref(), args.dry_run)
        .context("Failed to set up report")?;

    match generator.run().await {
        Ok(outcome) => {
            info!(
                total = outcome.total,
                date = %outcome.latest_date,
                chart = %outcome.chart_path.display(),
                "Done"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Report failed");
            Err(e).context("Report failed")
        }
    }
}
