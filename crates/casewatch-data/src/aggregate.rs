//! Reduction of the raw table to one national series.
//!
//! Early in the outbreak the upstream file reported the country at county
//! level (`"King County, WA"`); later it switched to state-level rows. The two
//! row families are summed separately and spliced at an explicit cutover date,
//! taking county sums before the cutover and state sums from it onward. Both
//! halves must share the dataset's date axis and the cutover must be one of
//! its dates; anything else is rejected instead of being spliced by position.

use casewatch_common::{CaseWatchError, Result};
use casewatch_config::SourceConfig;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::dataset::{RawDataset, RegionRow};

/// One `(date, cumulative count)` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub count: u64,
}

/// Date-indexed cumulative counts for one region scope.
///
/// Always non-empty with strictly increasing dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedSeries {
    label: String,
    points: Vec<SeriesPoint>,
}

impl AggregatedSeries {
    /// Builds a series, rejecting empty input and non-increasing dates.
    pub fn new(label: impl Into<String>, points: Vec<SeriesPoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(CaseWatchError::validation("Series has no points"));
        }
        if let Some(pair) = points.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(CaseWatchError::validation(format!(
                "Series dates not strictly increasing at {}",
                pair[1].date
            )));
        }
        Ok(Self {
            label: label.into(),
            points,
        })
    }

    /// Pairs a date axis with per-date counts.
    pub fn from_columns(label: impl Into<String>, dates: &[NaiveDate], counts: &[u64]) -> Result<Self> {
        if dates.len() != counts.len() {
            return Err(CaseWatchError::validation(format!(
                "{} dates but {} counts",
                dates.len(),
                counts.len()
            )));
        }
        let points = dates
            .iter()
            .zip(counts)
            .map(|(&date, &count)| SeriesPoint { date, count })
            .collect();
        Self::new(label, points)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last entry of the series.
    pub fn latest(&self) -> SeriesPoint {
        // Non-empty by construction.
        self.points[self.points.len() - 1]
    }

    /// The count reported as the current total.
    pub fn current_total(&self) -> u64 {
        self.latest().count
    }

    /// Largest count in the series.
    pub fn max_count(&self) -> u64 {
        self.points.iter().map(|p| p.count).max().unwrap_or(0)
    }

    fn relabel(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }
}

/// Row selection and splice settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationRules {
    /// Exact `Country/Region` value to keep
    pub country: String,
    /// Marker in `Province/State` identifying county-level rows
    pub subregion_delimiter: String,
    /// Substrings excluding state-level rows (cruise ships)
    pub excluded_regions: Vec<String>,
    /// First date taken from state-level rows
    pub cutover: Option<NaiveDate>,
    /// Label of the resulting series
    pub label: String,
}

impl AggregationRules {
    /// Rules from the source section, labelled with `label`.
    pub fn from_source(source: &SourceConfig, label: impl Into<String>) -> Self {
        Self {
            country: source.country.clone(),
            subregion_delimiter: source.subregion_delimiter.clone(),
            excluded_regions: source.excluded_regions.clone(),
            cutover: source.cutover_date,
            label: label.into(),
        }
    }

    fn is_fine_grained(&self, row: &RegionRow) -> bool {
        row.province.contains(self.subregion_delimiter.as_str())
    }

    fn is_excluded(&self, row: &RegionRow) -> bool {
        self.excluded_regions
            .iter()
            .any(|pattern| row.province.contains(pattern.as_str()))
    }
}

impl Default for AggregationRules {
    fn default() -> Self {
        Self::from_source(&SourceConfig::default(), "US")
    }
}

/// Country rows split into county-level, state-level and excluded rows.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub fine: Vec<&'a RegionRow>,
    pub coarse: Vec<&'a RegionRow>,
    pub excluded: Vec<&'a RegionRow>,
}

impl Partition<'_> {
    /// Number of rows that matched the country.
    pub fn total_rows(&self) -> usize {
        self.fine.len() + self.coarse.len() + self.excluded.len()
    }
}

/// Splits the country's rows. Exclusion patterns only apply to state-level rows.
pub fn partition<'a>(dataset: &'a RawDataset, rules: &AggregationRules) -> Partition<'a> {
    let mut parts = Partition::default();

    for row in dataset.rows().iter().filter(|r| r.country == rules.country) {
        if rules.is_fine_grained(row) {
            parts.fine.push(row);
        } else if rules.is_excluded(row) {
            parts.excluded.push(row);
        } else {
            parts.coarse.push(row);
        }
    }

    debug!(
        fine = parts.fine.len(),
        coarse = parts.coarse.len(),
        excluded = parts.excluded.len(),
        "Partitioned rows"
    );
    parts
}

/// Sums rows per date column.
pub fn collapse(dates: &[NaiveDate], rows: &[&RegionRow], label: &str) -> Result<AggregatedSeries> {
    let mut sums = vec![0u64; dates.len()];
    for row in rows {
        for (sum, count) in sums.iter_mut().zip(&row.counts) {
            *sum = sum.saturating_add(*count);
        }
    }
    AggregatedSeries::from_columns(label, dates, &sums)
}

/// Position of `cutover` on the date axis.
fn cutover_index(dates: &[NaiveDate], cutover: NaiveDate) -> Result<usize> {
    dates.iter().position(|d| *d == cutover).ok_or_else(|| {
        let range = match (dates.first(), dates.last()) {
            (Some(first), Some(last)) => format!("{first}..={last}"),
            _ => "(empty)".to_string(),
        };
        CaseWatchError::validation_field(
            format!("Cutover {cutover} outside dataset range {range}"),
            "cutover_date",
        )
    })
}

/// Joins two series over the same date axis at `cutover`.
///
/// Dates before `cutover` come from `fine`, the rest from `coarse`. With no
/// cutover the coarse series is returned unchanged.
pub fn splice(
    fine: &AggregatedSeries,
    coarse: &AggregatedSeries,
    cutover: Option<NaiveDate>,
    label: &str,
) -> Result<AggregatedSeries> {
    if fine.dates() != coarse.dates() {
        return Err(CaseWatchError::validation(
            "Cannot splice series with different date axes",
        ));
    }

    let Some(cutover) = cutover else {
        return Ok(coarse.clone().relabel(label));
    };

    let split = cutover_index(&coarse.dates(), cutover)?;

    if split > 0 {
        let before = fine.points()[split - 1].count;
        let after = coarse.points()[split].count;
        if after < before {
            warn!(%cutover, before, after, "Series drops at cutover");
        }
    }

    let points = fine.points()[..split]
        .iter()
        .chain(&coarse.points()[split..])
        .copied()
        .collect();
    AggregatedSeries::new(label, points)
}

/// Full reduction: filter, partition, collapse and splice.
pub fn aggregate(dataset: &RawDataset, rules: &AggregationRules) -> Result<AggregatedSeries> {
    let parts = partition(dataset, rules);

    if parts.total_rows() == 0 {
        return Err(CaseWatchError::dataset_column(
            format!("No rows for country '{}'", rules.country),
            crate::dataset::COUNTRY_COLUMN,
        ));
    }

    let split = rules
        .cutover
        .map(|cutover| cutover_index(dataset.dates(), cutover))
        .transpose()?;
    if split.is_some_and(|idx| idx > 0) && parts.fine.is_empty() {
        return Err(CaseWatchError::dataset(format!(
            "No sub-region rows for '{}' to cover dates before the cutover",
            rules.country
        )));
    }
    if parts.coarse.is_empty() {
        return Err(CaseWatchError::dataset(format!(
            "No region-level rows for '{}'",
            rules.country
        )));
    }

    let fine = collapse(dataset.dates(), &parts.fine, &rules.label)?;
    let coarse = collapse(dataset.dates(), &parts.coarse, &rules.label)?;
    let series = splice(&fine, &coarse, rules.cutover, &rules.label)?;

    info!(
        country = %rules.country,
        points = series.len(),
        total = series.current_total(),
        "Aggregated series"
    );
    Ok(series)
}
