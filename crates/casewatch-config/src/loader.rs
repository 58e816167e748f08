//! Configuration loading utilities

use crate::validation::split_list;
use crate::Config;
use casewatch_common::{parse_report_date, CaseWatchError, Result as CaseWatchResult};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File names probed in the working directory when no path is given
const DEFAULT_CONFIG_FILES: [&str; 3] = ["casewatch.yaml", "casewatch.yml", "casewatch.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for CaseWatchError {
    fn from(err: ConfigError) -> Self {
        CaseWatchError::config_with_source(err.to_string(), err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML or TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let config = Self::parse_file(path.as_ref())?;
        Self::finish(config, |var| env::var(var).ok())
    }

    /// Load configuration from the conventional locations and the environment
    pub fn load() -> CaseWatchResult<Config> {
        match Self::locate() {
            Some(path) => Self::load_from_file(path),
            None => Self::load_defaults(),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CaseWatchResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Defaults plus environment overrides, no file
    pub fn load_defaults() -> CaseWatchResult<Config> {
        Ok(Self::finish(Config::default(), |var| env::var(var).ok())?)
    }

    /// File `load` would read: `CASEWATCH_CONFIG_PATH`, then the first
    /// default file name present in the working directory.
    pub fn locate() -> Option<PathBuf> {
        Self::locate_with(|var| env::var(var).ok(), |path| path.exists())
    }

    fn locate_with<F, E>(lookup: F, exists: E) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
        E: Fn(&Path) -> bool,
    {
        lookup("CASEWATCH_CONFIG_PATH").map(PathBuf::from).or_else(|| {
            DEFAULT_CONFIG_FILES
                .iter()
                .map(PathBuf::from)
                .find(|path| exists(path))
        })
    }

    /// Apply overrides from `lookup` and validate
    pub fn finish<F>(mut config: Config, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::apply_env_overrides(&mut config, lookup)?;
        config.validate_all()?;
        Ok(config)
    }

    fn parse_file(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Ok(toml::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        value.trim().parse().map_err(|e| ConfigError::EnvParseError {
            var: var.to_string(),
            source: Box::new(e),
        })
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Source overrides
        if let Some(url) = lookup("CASEWATCH_DATASET_URL") {
            config.source.url = url;
        }

        if let Some(country) = lookup("CASEWATCH_COUNTRY") {
            config.source.country = country;
        }

        if let Some(cutover) = lookup("CASEWATCH_CUTOVER_DATE") {
            config.source.cutover_date = if cutover.trim().eq_ignore_ascii_case("none") {
                None
            } else {
                Some(parse_report_date(&cutover).map_err(|e| ConfigError::EnvParseError {
                    var: "CASEWATCH_CUTOVER_DATE".to_string(),
                    source: Box::new(e),
                })?)
            };
        }

        // Chart overrides
        if let Some(path) = lookup("CASEWATCH_CHART_PATH") {
            config.chart.output_path = path;
        }

        // Mail overrides
        if let Some(host) = lookup("SMTP_HOST") {
            config.email.smtp_host = host;
        }

        if let Some(port) = lookup("SMTP_PORT") {
            config.email.smtp_port = Self::parse_var("SMTP_PORT", &port)?;
        }

        if let Some(username) = lookup("SMTP_USERNAME") {
            config.email.username = username;
        }

        if let Some(password) = lookup("SMTP_PASSWORD") {
            config.email.password = password;
        }

        if let Some(from) = lookup("CASEWATCH_FROM") {
            config.email.from = from;
        }

        if let Some(recipients) = lookup("CASEWATCH_RECIPIENTS") {
            config.email.recipients = split_list(&recipients);
        }

        // Logging overrides
        if let Some(level) = lookup("CASEWATCH_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::io::Write;

    const YAML: &str = r#"
source:
  country: "US"
  cutover_date: "2020-03-10"
email:
  username: "reporter@example.com"
  password: "secret"
  from: "reporter@example.com"
  recipients:
    - "alice@example.com"
    - "bob@example.org"
"#;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_yaml_with_defaults() {
        let file = write_temp(".yaml", YAML);
        let config = ConfigLoader::parse_file(file.path()).unwrap();

        assert_eq!(config.email.recipients.len(), 2);
        assert_eq!(config.source.cutover_date, NaiveDate::from_ymd_opt(2020, 3, 10));
        // Sections left out keep their defaults
        assert_eq!(config.chart.output_path, "plot.png");
        assert_eq!(config.email.smtp_port, 587);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[email]
username = "reporter@example.com"
password = "secret"
from = "reporter@example.com"
recipients = ["alice@example.com"]

[chart]
output_path = "out/chart.png"
"#;
        let file = write_temp(".toml", toml);
        let config = ConfigLoader::parse_file(file.path()).unwrap();
        let config = ConfigLoader::finish(config, lookup_from(&[])).unwrap();

        assert_eq!(config.chart.output_path, "out/chart.png");
        assert_eq!(config.email.recipients, vec!["alice@example.com".to_string()]);
    }

    #[test]
    fn test_env_overrides() {
        let file = write_temp(".yaml", YAML);
        let config = ConfigLoader::parse_file(file.path()).unwrap();
        let config = ConfigLoader::finish(
            config,
            lookup_from(&[
                ("SMTP_PORT", "2525"),
                ("SMTP_PASSWORD", "from-env"),
                ("CASEWATCH_RECIPIENTS", "carol@example.com, dave@example.com"),
                ("CASEWATCH_CUTOVER_DATE", "none"),
            ]),
        )
        .unwrap();

        assert_eq!(config.email.smtp_port, 2525);
        assert_eq!(config.email.password, "from-env");
        assert_eq!(
            config.email.recipients,
            vec!["carol@example.com".to_string(), "dave@example.com".to_string()]
        );
        assert_eq!(config.source.cutover_date, None);
    }

    #[test]
    fn test_bad_env_value_is_reported() {
        let file = write_temp(".yaml", YAML);
        let config = ConfigLoader::parse_file(file.path()).unwrap();

        let err = ConfigLoader::finish(config.clone(), lookup_from(&[("SMTP_PORT", "smtp")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvParseError { ref var, .. } if var == "SMTP_PORT"));

        let err = ConfigLoader::finish(config, lookup_from(&[("CASEWATCH_CUTOVER_DATE", "3/10/20")]))
            .unwrap_err();
        assert!(err.to_string().contains("CASEWATCH_CUTOVER_DATE"));
    }

    #[test]
    fn test_validation_failure_surfaces() {
        let err = ConfigLoader::finish(Config::default(), lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        let converted: CaseWatchError = err.into();
        assert!(converted.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_locate_prefers_env_path() {
        let path = ConfigLoader::locate_with(
            lookup_from(&[("CASEWATCH_CONFIG_PATH", "/etc/casewatch.yaml")]),
            |_| true,
        );
        assert_eq!(path, Some(PathBuf::from("/etc/casewatch.yaml")));
    }

    #[test]
    fn test_locate_falls_back_to_default_names() {
        let path = ConfigLoader::locate_with(lookup_from(&[]), |p| p == Path::new("casewatch.yml"));
        assert_eq!(path, Some(PathBuf::from("casewatch.yml")));

        assert_eq!(ConfigLoader::locate_with(lookup_from(&[]), |_| false), None);
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigLoader::load_config("/nonexistent/casewatch.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
