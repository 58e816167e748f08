//! # casewatch
//!
//! Daily confirmed-case report: fetch the public time-series CSV, collapse it
//! into one national series, chart it and mail the chart.
//!
//! The crate also ships `dashboard-launcher`, which starts the interactive
//! dashboard server as a detached process.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod launcher;
pub mod pipeline;

pub use cli::{LauncherArgs, ReportArgs};
pub use launcher::DashboardLauncher;
pub use pipeline::{ReportGenerator, ReportOutcome};
