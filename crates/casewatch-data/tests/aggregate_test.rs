//! Aggregation properties over synthetic datasets.

use casewatch_common::test_utils::{init_test_logging, DatasetBuilder};
use casewatch_data::{aggregate, AggregationRules, RawDataset};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 22).unwrap()
}

/// 50 days; county rows report up to the historical cutover, state rows after.
fn historical_shape() -> DatasetBuilder {
    let counties: Vec<u64> = (0..50).map(|d| if d < 48 { d } else { 0 }).collect();
    let states: Vec<u64> = (0..50).map(|d| if d < 48 { 0 } else { d * 10 }).collect();
    let ship: Vec<u64> = (0..50).map(|d| if d < 48 { 0 } else { 21 }).collect();

    DatasetBuilder::new(start(), 50)
        .row("King County, WA", "US", &counties)
        .row("Santa Clara County, CA", "US", &counties)
        .row("Washington", "US", &states)
        .row("California", "US", &states)
        .row("Diamond Princess", "US", &ship)
        .row("Hubei", "China", &[444, 444, 549])
}

#[test]
fn test_final_value_is_national_total() {
    init_test_logging();

    let builder = historical_shape();
    let dataset = RawDataset::from_csv(&builder.to_csv()).unwrap();
    let series = aggregate(&dataset, &AggregationRules::default()).unwrap();

    // Cutover default is index 48 of a file starting on 1/22/20.
    assert_eq!(
        AggregationRules::default().cutover,
        Some(start() + Duration::days(48))
    );
    // Two state rows at day 49, ship excluded.
    assert_eq!(series.current_total(), 2 * 490);
    // County sums before the cutover.
    assert_eq!(series.points()[47].count, 2 * 47);
    assert_eq!(series.points()[48].count, 2 * 480);
}

#[test]
fn test_spliced_dates_are_the_dataset_axis() {
    let builder = historical_shape();
    let dataset = RawDataset::from_csv(&builder.to_csv()).unwrap();
    let series = aggregate(&dataset, &AggregationRules::default()).unwrap();

    assert_eq!(series.dates(), builder.dates());
    assert!(series.points().windows(2).all(|w| w[1].date - w[0].date == Duration::days(1)));
}

#[test]
fn test_excluded_row_contribution() {
    let builder = historical_shape();
    let dataset = RawDataset::from_csv(&builder.to_csv()).unwrap();

    let with_exclusion = aggregate(&dataset, &AggregationRules::default()).unwrap();
    let without_exclusion = aggregate(
        &dataset,
        &AggregationRules {
            excluded_regions: Vec::new(),
            ..AggregationRules::default()
        },
    )
    .unwrap();

    assert_eq!(
        without_exclusion.current_total() - with_exclusion.current_total(),
        21
    );
}

#[test]
fn test_missing_region_column_fails_parse() {
    let csv = historical_shape().without_column("Province/State").to_csv();
    let err = RawDataset::from_csv(&csv).unwrap_err();
    assert_eq!(err.column(), Some("Province/State"));
}

proptest! {
    #[test]
    fn prop_splice_matches_manual_sums(
        days in 2usize..40,
        cut in 1usize..40,
        fine in prop::collection::vec(prop::collection::vec(0u64..10_000, 40), 1..4),
        coarse in prop::collection::vec(prop::collection::vec(0u64..10_000, 40), 1..4),
    ) {
        let cut = cut % days;
        let mut builder = DatasetBuilder::new(start(), days);
        for (i, counts) in fine.iter().enumerate() {
            builder = builder.row(&format!("County {i}, ST"), "US", &counts[..days]);
        }
        for (i, counts) in coarse.iter().enumerate() {
            builder = builder.row(&format!("State {i}"), "US", &counts[..days]);
        }

        let dataset = RawDataset::from_csv(&builder.to_csv()).unwrap();
        let rules = AggregationRules {
            cutover: Some(start() + Duration::days(cut as i64)),
            ..AggregationRules::default()
        };
        let series = aggregate(&dataset, &rules).unwrap();

        prop_assert_eq!(series.dates(), builder.dates());
        for (day, point) in series.points().iter().enumerate() {
            let rows = if day < cut { &fine } else { &coarse };
            let expected: u64 = rows.iter().map(|r| r[day]).sum();
            prop_assert_eq!(point.count, expected);
        }
    }
}
