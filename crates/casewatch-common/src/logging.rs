//! Structured logging infrastructure for casewatch

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::{CaseWatchError, Result};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "casewatch=trace")
    pub level: String,
    /// Whether to use the compact single-line format
    pub compact: bool,
    /// Whether to emit ANSI colours on the console
    pub ansi: bool,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to include span open/close events
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            compact: false,
            ansi: true,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

/// Build the level filter, falling back to `info` for an unparseable directive
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the tracing subscriber with the given configuration.
///
/// When a file path is configured the returned guard must be held until the
/// process exits, otherwise buffered lines are lost.
pub fn init_logging(config: LoggingConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = build_filter(&config.level);

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.file_path {
        Some(file_path) => {
            let path = Path::new(&file_path);
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path.file_name().ok_or_else(|| {
                CaseWatchError::config(format!("Log file path has no file name: {file_path}"))
            })?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_span_events(span_events)
                .with_target(config.include_targets);

            registry
                .with(layer)
                .try_init()
                .map_err(|e| CaseWatchError::with_source("Failed to install log subscriber", e))?;

            Ok(Some(guard))
        }
        None if config.compact => {
            let layer = fmt::layer()
                .compact()
                .with_ansi(config.ansi)
                .with_span_events(span_events)
                .with_target(config.include_targets);

            registry
                .with(layer)
                .try_init()
                .map_err(|e| CaseWatchError::with_source("Failed to install log subscriber", e))?;

            Ok(None)
        }
        None => {
            let layer = fmt::layer()
                .with_ansi(config.ansi)
                .with_span_events(span_events)
                .with_target(config.include_targets);

            registry
                .with(layer)
                .try_init()
                .map_err(|e| CaseWatchError::with_source("Failed to install log subscriber", e))?;

            Ok(None)
        }
    }
}
