//! Chart rendering trait and the line chart implementation

use casewatch_common::{format_dataset_date, format_report_date, CaseWatchError, Result};
use casewatch_data::AggregatedSeries;
use chrono::NaiveDate;
use image::{ImageOutputFormat, RgbImage};
use plotters::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::info;

use crate::style::ChartStyle;

/// Chart title for a report generated on `date`.
pub fn chart_title(prefix: &str, date: NaiveDate) -> String {
    format!("{} {}", prefix.trim_end(), format_report_date(date))
}

/// Renders an aggregated series to an image.
pub trait ChartRenderer: Send + Sync {
    /// Renders PNG bytes.
    fn render_png(&self, series: &AggregatedSeries, title: &str) -> Result<Vec<u8>>;

    /// Renders and writes the image to `path`, creating parent directories.
    fn render_to_file(&self, series: &AggregatedSeries, title: &str, path: &Path) -> Result<()> {
        let png = self.render_png(series, title)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &png)?;
        info!(path = %path.display(), bytes = png.len(), "Chart written");
        Ok(())
    }

    /// Gets the name of this chart type.
    fn name(&self) -> &'static str;
}

/// Single-series line chart with a legend in the upper-left corner.
#[derive(Debug, Clone, Default)]
pub struct LineChartRenderer {
    style: ChartStyle,
}

impl LineChartRenderer {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Draws into a raw RGB buffer of `width * height * 3` bytes.
    fn draw(&self, series: &AggregatedSeries, title: &str, buffer: &mut [u8]) -> Result<()> {
        let style = &self.style;
        let root = BitMapBackend::with_buffer(buffer, (style.width, style.height)).into_drawing_area();
        root.fill(&style.background_color)?;

        let dates: Vec<NaiveDate> = series.dates();
        let x_max = (dates.len().saturating_sub(1)).max(1) as f64;
        let y_max = (series.max_count() as f64 * 1.1).max(1.0);

        let title_font = (style.font_family.as_str(), style.title_font_size);
        let mut chart = ChartBuilder::on(&root)
            .caption(title, title_font)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

        let date_label = |x: &f64| {
            let idx = x.round();
            if idx < 0.0 {
                return String::new();
            }
            dates
                .get(idx as usize)
                .map(|d| format_dataset_date(*d))
                .unwrap_or_default()
        };

        chart
            .configure_mesh()
            .x_desc(style.x_label.as_str())
            .x_labels(10)
            .x_label_formatter(&date_label)
            .y_label_formatter(&|y: &f64| format!("{y:.0}"))
            .draw()?;

        let line_color = style.line_color;
        let line_data: Vec<(f64, f64)> = series
            .points()
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.count as f64))
            .collect();

        chart
            .draw_series(LineSeries::new(line_data, line_color.stroke_width(2)))?
            .label(style.series_label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_color));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

impl ChartRenderer for LineChartRenderer {
    fn render_png(&self, series: &AggregatedSeries, title: &str) -> Result<Vec<u8>> {
        let (width, height) = (self.style.width, self.style.height);
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        self.draw(series, title, &mut buffer)?;

        let image = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| CaseWatchError::graph("Chart buffer has the wrong size"))?;
        let mut png = Cursor::new(Vec::new());
        image
            .write_to(&mut png, ImageOutputFormat::Png)
            .map_err(|e| CaseWatchError::graph_with_source("PNG encoding failed", e))?;

        Ok(png.into_inner())
    }

    fn name(&self) -> &'static str {
        "line_chart"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_title_format() {
        let date = NaiveDate::from_ymd_opt(2020, 3, 21).unwrap();
        assert_eq!(
            chart_title("Confirmed cases as of", date),
            "Confirmed cases as of 2020-03-21"
        );
        assert_eq!(chart_title("Cases ", date), "Cases 2020-03-21");
    }

    #[test]
    fn test_same_day_titles_identical() {
        let prefix = "Confirmed cases as of";
        let date = NaiveDate::from_ymd_opt(2020, 3, 21).unwrap();
        assert_eq!(chart_title(prefix, date), chart_title(prefix, date));

        let next = date.succ_opt().unwrap();
        assert_ne!(chart_title(prefix, date), chart_title(prefix, next));
    }

    #[test]
    fn test_renderer_name() {
        let renderer = LineChartRenderer::default();
        assert_eq!(renderer.name(), "line_chart");
        assert_eq!(renderer.style().width, 1000);
    }
}
