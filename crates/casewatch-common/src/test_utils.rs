//! Test utilities and shared test helpers for casewatch.
//!
//! Provides test logging and a builder for synthetic confirmed-case datasets
//! in the upstream CSV layout, so every crate can exercise parsing and
//! aggregation without network access.

use chrono::{Duration, NaiveDate};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

use crate::utils::format_dataset_date;

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call multiple times.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// One region row of a synthetic dataset.
#[derive(Debug, Clone)]
pub struct SyntheticRow {
    pub province: String,
    pub country: String,
    pub counts: Vec<u64>,
}

/// Builder for CSV text shaped like the upstream time-series file.
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    start: NaiveDate,
    days: usize,
    rows: Vec<SyntheticRow>,
    omit_column: Option<String>,
}

impl DatasetBuilder {
    /// Dataset with `days` daily columns starting at `start`.
    pub fn new(start: NaiveDate, days: usize) -> Self {
        Self {
            start,
            days,
            rows: Vec::new(),
            omit_column: None,
        }
    }

    /// Adds a region row. `counts` shorter than the date axis is padded with
    /// its last value.
    pub fn row(mut self, province: &str, country: &str, counts: &[u64]) -> Self {
        let last = counts.last().copied().unwrap_or(0);
        let mut counts = counts.to_vec();
        counts.resize(self.days, last);
        self.rows.push(SyntheticRow {
            province: province.to_string(),
            country: country.to_string(),
            counts,
        });
        self
    }

    /// Drops one identifying column from the output, producing a malformed file.
    pub fn without_column(mut self, column: &str) -> Self {
        self.omit_column = Some(column.to_string());
        self
    }

    /// Dates of the generated columns.
    pub fn dates(&self) -> Vec<NaiveDate> {
        (0..self.days)
            .map(|i| self.start + Duration::days(i as i64))
            .collect()
    }

    /// Rows added so far.
    pub fn rows(&self) -> &[SyntheticRow] {
        &self.rows
    }

    /// Renders the dataset as CSV text.
    pub fn to_csv(&self) -> String {
        let identifying = ["Province/State", "Country/Region", "Lat", "Long"];
        let keep: Vec<bool> = identifying
            .iter()
            .map(|c| self.omit_column.as_deref() != Some(*c))
            .collect();

        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header: Vec<String> = identifying
            .iter()
            .zip(&keep)
            .filter(|(_, k)| **k)
            .map(|(c, _)| (*c).to_string())
            .collect();
        header.extend(self.dates().into_iter().map(format_dataset_date));
        writer.write_record(&header).expect("header should serialize");

        for row in &self.rows {
            let ident = [
                row.province.clone(),
                row.country.clone(),
                "0.0".to_string(),
                "0.0".to_string(),
            ];
            let mut record: Vec<String> = ident
                .into_iter()
                .zip(&keep)
                .filter(|(_, k)| **k)
                .map(|(v, _)| v)
                .collect();
            record.extend(row.counts.iter().map(u64::to_string));
            writer.write_record(&record).expect("row should serialize");
        }

        let bytes = writer.into_inner().expect("in-memory writer should flush");
        String::from_utf8(bytes).expect("CSV output is UTF-8")
    }
}

/// Smallest valid PNG header, enough for format sniffing.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_pads_counts_and_quotes_regions() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 22).unwrap();
        let csv = DatasetBuilder::new(start, 3)
            .row("King County, WA", "US", &[1, 2])
            .to_csv();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,1/24/20")
        );
        assert_eq!(lines.next(), Some("\"King County, WA\",US,0.0,0.0,1,2,2"));
    }

    #[test]
    fn test_builder_can_omit_column() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 22).unwrap();
        let csv = DatasetBuilder::new(start, 1)
            .row("Washington", "US", &[5])
            .without_column("Province/State")
            .to_csv();

        assert!(csv.starts_with("Country/Region,Lat,Long,1/22/20"));
        assert!(csv.contains("US,0.0,0.0,5"));
    }
}
