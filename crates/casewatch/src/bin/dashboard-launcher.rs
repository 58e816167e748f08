//! Starts the dashboard server and exits.

use anyhow::Context;
use casewatch::{DashboardLauncher, LauncherArgs};
use casewatch_common::{init_logging, LoggingConfig};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = LauncherArgs::parse();

    let _guard = init_logging(LoggingConfig {
        level: args.log_level.clone(),
        ..LoggingConfig::default()
    })
    .context("Failed to initialize logging")?;

    let launcher = DashboardLauncher::from(&args);
    let pid = launcher
        .spawn()
        .with_context(|| format!("Could not run: {}", launcher.command_line()))?;
    println!("{pid}");
    Ok(())
}
