//! Chart rendering against real plotters backends.
//!
//! Text rendering goes through the system font stack. The smoke test below
//! returns early on hosts without the configured font; the rest are opt-in:
//! `cargo test -p casewatch-graphs -- --ignored`.

use casewatch_common::test_utils::PNG_SIGNATURE;
use casewatch_data::AggregatedSeries;
use casewatch_graphs::{chart_title, ChartRenderer, ChartStyle, LineChartRenderer};
use chrono::{Duration, NaiveDate};
use plotters::style::{FontDesc, FontFamily, FontStyle};

fn series() -> AggregatedSeries {
    let start = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
    let dates: Vec<NaiveDate> = (0..21).map(|d| start + Duration::days(d)).collect();
    let counts: Vec<u64> = (0..21u64).map(|d| d * d * 10).collect();
    AggregatedSeries::from_columns("US", &dates, &counts).unwrap()
}

fn small_renderer() -> LineChartRenderer {
    LineChartRenderer::new(ChartStyle {
        width: 320,
        height: 240,
        ..ChartStyle::default()
    })
}

/// Whether the chart font resolves on this host.
fn font_available(style: &ChartStyle) -> bool {
    FontDesc::new(
        FontFamily::from(style.font_family.as_str()),
        f64::from(style.title_font_size),
        FontStyle::Normal,
    )
    .box_size("0")
    .is_ok()
}

#[test]
fn test_render_smoke() {
    let renderer = small_renderer();
    if !font_available(renderer.style()) {
        eprintln!("skipping: font '{}' not available", renderer.style().font_family);
        return;
    }

    let png = renderer
        .render_png(&series(), "Confirmed cases as of 2020-03-21")
        .unwrap();
    let image = image::load_from_memory(&png).unwrap().to_rgb8();

    assert_eq!(&png[..8], &PNG_SIGNATURE);
    assert_eq!(image.dimensions(), (320, 240));
}

#[test]
#[ignore = "needs a system sans-serif font"]
fn test_render_png_bytes() {
    let title = chart_title("Confirmed cases as of", NaiveDate::from_ymd_opt(2020, 3, 21).unwrap());
    let png = small_renderer().render_png(&series(), &title).unwrap();

    assert_eq!(&png[..8], &PNG_SIGNATURE);
}

#[test]
#[ignore = "needs a system sans-serif font"]
fn test_render_is_deterministic() {
    let renderer = small_renderer();
    let first = renderer.render_png(&series(), "Confirmed cases as of 2020-03-21").unwrap();
    let second = renderer.render_png(&series(), "Confirmed cases as of 2020-03-21").unwrap();

    assert_eq!(first, second);
}

#[test]
#[ignore = "needs a system sans-serif font"]
fn test_render_to_nested_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("plot.png");

    small_renderer()
        .render_to_file(&series(), "Confirmed cases as of 2020-03-21", &path)
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], &PNG_SIGNATURE);
}
