//! Configuration management for casewatch

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{ChartConfig, Config, EmailConfig, LoggingSettings, SourceConfig};
