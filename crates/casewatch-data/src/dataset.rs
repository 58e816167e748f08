//! Raw confirmed-case table with schema validation.

use casewatch_common::{parse_dataset_date, CaseWatchError, Result};
use chrono::NaiveDate;
use std::io::Read;
use tracing::debug;

/// Region name column
pub const PROVINCE_COLUMN: &str = "Province/State";
/// Country column
pub const COUNTRY_COLUMN: &str = "Country/Region";
/// Latitude column
pub const LAT_COLUMN: &str = "Lat";
/// Longitude column
pub const LONG_COLUMN: &str = "Long";

const IDENTIFYING_COLUMNS: [&str; 4] = [PROVINCE_COLUMN, COUNTRY_COLUMN, LAT_COLUMN, LONG_COLUMN];

/// One reporting region with its cumulative counts, aligned to [`RawDataset::dates`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRow {
    pub province: String,
    pub country: String,
    pub counts: Vec<u64>,
}

/// Parsed dataset: a date axis and one row per region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDataset {
    dates: Vec<NaiveDate>,
    rows: Vec<RegionRow>,
}

impl RawDataset {
    /// Parses CSV text.
    pub fn from_csv(text: &str) -> Result<Self> {
        Self::from_reader(text.as_bytes())
    }

    /// Parses CSV from any reader.
    ///
    /// Every identifying column must be present and every other column must be
    /// a date header; dates must be strictly increasing.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();

        let position = |name: &str| -> Result<usize> {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                CaseWatchError::dataset_column(format!("Missing expected column '{name}'"), name)
            })
        };
        let province_idx = position(PROVINCE_COLUMN)?;
        let country_idx = position(COUNTRY_COLUMN)?;
        for column in [LAT_COLUMN, LONG_COLUMN] {
            position(column)?;
        }

        let mut date_columns = Vec::new();
        for (idx, header) in headers.iter().enumerate() {
            if IDENTIFYING_COLUMNS.contains(&header) {
                continue;
            }
            let date = parse_dataset_date(header).ok_or_else(|| {
                CaseWatchError::dataset_column(format!("Unexpected non-date column '{header}'"), header)
            })?;
            date_columns.push((idx, date));
        }

        if date_columns.is_empty() {
            return Err(CaseWatchError::dataset("Dataset has no date columns"));
        }

        if let Some(pair) = date_columns.windows(2).find(|w| w[0].1 >= w[1].1) {
            return Err(CaseWatchError::dataset_column(
                format!("Date columns are not strictly increasing at {}", pair[1].1),
                &headers[pair[1].0],
            ));
        }

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            let counts = date_columns
                .iter()
                .map(|(idx, _)| parse_count(&record[*idx], &headers[*idx], line + 2))
                .collect::<Result<Vec<_>>>()?;

            rows.push(RegionRow {
                province: record[province_idx].to_string(),
                country: record[country_idx].to_string(),
                counts,
            });
        }

        let dates: Vec<NaiveDate> = date_columns.into_iter().map(|(_, d)| d).collect();
        debug!(rows = rows.len(), dates = dates.len(), "Parsed dataset");

        Ok(Self { dates, rows })
    }

    /// Date axis shared by every row.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Region rows in file order.
    pub fn rows(&self) -> &[RegionRow] {
        &self.rows
    }
}

/// Parses one count cell. Empty cells count as zero; integral floats such as
/// `12.0` are accepted.
fn parse_count(cell: &str, column: &str, line: usize) -> Result<u64> {
    if cell.is_empty() {
        return Ok(0);
    }
    if let Ok(value) = cell.parse::<u64>() {
        return Ok(value);
    }
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 && value.fract() == 0.0 => Ok(value as u64),
        _ => Err(CaseWatchError::dataset_column(
            format!("Invalid count '{cell}' at line {line}"),
            column,
        )),
    }
}
