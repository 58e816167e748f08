//! Shared date helpers.

use chrono::{Local, NaiveDate};

use crate::{CaseWatchError, Result};

/// Header format of the per-date columns in the upstream dataset (`1/22/20`).
pub const DATASET_DATE_FORMAT: &str = "%m/%d/%y";

/// Format used for dates shown in reports and configuration.
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a dataset column header as a date, returning `None` for non-date headers.
pub fn parse_dataset_date(header: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(header.trim(), DATASET_DATE_FORMAT).ok()
}

/// Formats a date as a dataset column header (`M/D/YY`, no zero padding).
pub fn format_dataset_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%y").to_string()
}

/// Formats a date for report titles.
pub fn format_report_date(date: NaiveDate) -> String {
    date.format(REPORT_DATE_FORMAT).to_string()
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_report_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), REPORT_DATE_FORMAT).map_err(|e| {
        CaseWatchError::Validation {
            message: format!("'{value}' is not a YYYY-MM-DD date ({e})"),
            field: None,
        }
    })
}

/// Today's date on the process clock, in local time.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}
