//! Application configuration structures

use casewatch_common::LoggingConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Upstream time series of confirmed cases, one column per day.
pub const DEFAULT_DATASET_URL: &str = "https://github.com/CSSEGISandData/COVID-19/raw/master/csse_covid_19_data/csse_covid_19_time_series/time_series_19-covid-Confirmed.csv";

/// Badge shown in the mail body.
pub const DEFAULT_BADGE_URL: &str = "https://img.shields.io/static/v1.svg?logo=Jupyter&label=Launch+App&message=AWS+us-west-2&color=green";

/// Interactive dashboard the badge links to.
pub const DEFAULT_DASHBOARD_URL: &str = "https://aws-uswest2-binder.pangeo.io/v2/gh/friedrichknuth/covid_dashboard/binder-app?urlpath=/proxy/5006/dashboard-panel";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Dataset location and aggregation rules
    #[validate]
    pub source: SourceConfig,

    /// Chart rendering settings
    #[validate]
    pub chart: ChartConfig,

    /// Mail submission settings
    #[validate]
    pub email: EmailConfig,

    /// Logging configuration
    #[validate]
    pub logging: LoggingSettings,
}

/// Dataset source and aggregation configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SourceConfig {
    /// CSV download URL
    #[validate(url(message = "Dataset URL must be a valid URL"))]
    pub url: String,

    /// Value of the `Country/Region` column to aggregate
    #[validate(length(min = 1, message = "Country cannot be empty"))]
    pub country: String,

    /// Marker in `Province/State` identifying county-level rows
    #[validate(length(min = 1, message = "Sub-region delimiter cannot be empty"))]
    pub subregion_delimiter: String,

    /// Substrings of `Province/State` excluded from the state-level rows
    pub excluded_regions: Vec<String>,

    /// First date taken from state-level rows; earlier dates come from
    /// county-level rows. `None` uses state-level rows throughout.
    pub cutover_date: Option<NaiveDate>,

    /// HTTP timeout in seconds, client default when unset
    #[validate(range(min = 1, max = 600, message = "Timeout must be between 1 and 600 seconds"))]
    pub request_timeout_seconds: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATASET_URL.to_string(),
            country: "US".to_string(),
            subregion_delimiter: ",".to_string(),
            excluded_regions: vec!["Princess".to_string()],
            // Column 48 of the historical file, where state-level reporting took over.
            cutover_date: NaiveDate::from_ymd_opt(2020, 3, 10),
            request_timeout_seconds: None,
        }
    }
}

/// Chart rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartConfig {
    /// Where the PNG is written before being attached
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Chart path is not a usable file path"))]
    pub output_path: String,

    /// Chart width in pixels
    #[validate(range(min = 100, max = 4000, message = "Width must be between 100 and 4000 pixels"))]
    pub width: u32,

    /// Chart height in pixels
    #[validate(range(min = 100, max = 4000, message = "Height must be between 100 and 4000 pixels"))]
    pub height: u32,

    /// Title text preceding today's date
    pub title_prefix: String,

    /// Legend label of the plotted series
    #[validate(length(min = 1, message = "Series label cannot be empty"))]
    pub series_label: String,

    /// X axis description
    pub x_label: String,

    /// Line colour (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Line color must be valid hex color"))]
    pub line_color: String,

    /// Background colour (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Background color must be valid hex color"))]
    pub background_color: String,

    /// Font family for caption and labels
    pub font_family: String,

    /// Caption font size
    #[validate(range(min = 8, max = 72, message = "Font size must be between 8 and 72"))]
    pub title_font_size: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_path: "plot.png".to_string(),
            width: 1000,
            height: 1000,
            title_prefix: "Confirmed cases as of".to_string(),
            series_label: "US".to_string(),
            x_label: "Date".to_string(),
            line_color: "#1F77B4".to_string(),
            background_color: "#FFFFFF".to_string(),
            font_family: "sans-serif".to_string(),
            title_font_size: 24,
        }
    }
}

/// Mail submission configuration
#[derive(Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EmailConfig {
    /// SMTP submission host
    #[validate(length(min = 1, message = "SMTP host cannot be empty"))]
    pub smtp_host: String,

    /// SMTP submission port (STARTTLS)
    #[validate(range(min = 1, message = "SMTP port cannot be 0"))]
    pub smtp_port: u16,

    /// Login user name
    #[validate(length(min = 1, message = "SMTP username cannot be empty"))]
    pub username: String,

    /// Login password or app token
    #[validate(length(min = 1, message = "SMTP password cannot be empty"))]
    pub password: String,

    /// Sender address
    #[validate(email(message = "Sender must be a valid e-mail address"))]
    pub from: String,

    /// Recipient addresses
    #[validate(custom(function = "crate::validation::validate_recipients", message = "Recipients must be a non-empty list of e-mail addresses"))]
    pub recipients: Vec<String>,

    /// Subject text preceding the current total
    pub subject_prefix: String,

    /// Link target of the badge
    #[validate(url(message = "Dashboard URL must be a valid URL"))]
    pub dashboard_url: String,

    /// Badge image URL
    #[validate(url(message = "Badge URL must be a valid URL"))]
    pub badge_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            from: String::new(),
            recipients: Vec::new(),
            subject_prefix: "Confirmed cases: ".to_string(),
            dashboard_url: DEFAULT_DASHBOARD_URL.to_string(),
            badge_url: DEFAULT_BADGE_URL.to_string(),
        }
    }
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from", &self.from)
            .field("recipients", &self.recipients)
            .field("subject_prefix", &self.subject_prefix)
            .field("dashboard_url", &self.dashboard_url)
            .field("badge_url", &self.badge_url)
            .finish()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Log level must be one of: trace, debug, info, warn, error"))]
    pub level: String,

    /// Optional log file path
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Log file is not a usable file path"))]
    pub file: Option<String>,

    /// Whether to use coloured console output
    pub colored: bool,

    /// Whether to use the compact single-line format
    pub compact: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            colored: true,
            compact: false,
        }
    }
}

impl From<&LoggingSettings> for LoggingConfig {
    fn from(settings: &LoggingSettings) -> Self {
        Self {
            level: settings.level.clone(),
            compact: settings.compact,
            ansi: settings.colored,
            file_path: settings.file.clone(),
            ..LoggingConfig::default()
        }
    }
}

impl Config {
    /// Comprehensive validation of the entire configuration
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }
}
