//! Validation utilities and regex patterns

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #FF0000)
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate that a recipient list is non-empty and every entry is an address
pub fn validate_recipients(recipients: &[String]) -> Result<(), ValidationError> {
    if recipients.is_empty() {
        return Err(ValidationError::new("empty_recipient_list"));
    }

    if recipients.iter().all(|r| validator::validate_email(r.as_str())) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_recipient_address"))
    }
}

/// Validate a log level name
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

/// Validate file path (basic check for valid path characters)
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }

    // Colon stays allowed for Windows drive letters (C:\)
    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }

    Ok(())
}

/// Split a comma separated list, dropping blanks
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_regex() {
        assert!(HEX_COLOR_REGEX.is_match("#FFFFFF"));
        assert!(HEX_COLOR_REGEX.is_match("#1f77b4"));

        assert!(!HEX_COLOR_REGEX.is_match("FFFFFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#FFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#GGGGGG"));
        assert!(!HEX_COLOR_REGEX.is_match(""));
    }

    #[test]
    fn test_validate_recipients() {
        assert!(validate_recipients(&["alice@example.com".to_string()]).is_ok());
        assert!(validate_recipients(&[
            "alice@example.com".to_string(),
            "bob@example.org".to_string()
        ])
        .is_ok());

        assert!(validate_recipients(&[]).is_err());
        assert!(validate_recipients(&[String::new()]).is_err());
        assert!(validate_recipients(&[
            "alice@example.com".to_string(),
            "bob at example".to_string()
        ])
        .is_err());
    }

    #[test]
    fn test_validate_log_level() {
        for level in ["trace", "debug", "info", "warn", "error", "INFO"] {
            assert!(validate_log_level(level).is_ok(), "{level} should be accepted");
        }
        assert!(validate_log_level("verbose").is_err());
        assert!(validate_log_level("").is_err());
    }

    #[test]
    fn test_validate_file_path() {
        assert!(validate_file_path("plot.png").is_ok());
        assert!(validate_file_path("./out/plot.png").is_ok());
        assert!(validate_file_path("C:\\reports\\plot.png").is_ok());

        assert!(validate_file_path("").is_err());
        assert!(validate_file_path("plot?.png").is_err());
        assert!(validate_file_path("plot*.png").is_err());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(" alice@example.com, ,bob@example.org "),
            vec!["alice@example.com".to_string(), "bob@example.org".to_string()]
        );
        assert!(split_list("").is_empty());
    }
}
