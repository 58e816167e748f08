//! Report generation: fetch, aggregate, render, notify.

use casewatch_common::{today_local, CaseWatchError, Result};
use casewatch_config::Config;
use casewatch_data::{aggregate, AggregationRules, DatasetSource, FileSource, HttpSource};
use casewatch_graphs::{chart_title, ChartRenderer, ChartStyle, LineChartRenderer};
use casewatch_notify::{DryRunMailer, Mailer, ReportMessage, SmtpMailer};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    pub total: u64,
    pub latest_date: NaiveDate,
    pub title: String,
    pub chart_path: PathBuf,
    pub chart_bytes: usize,
}

/// One report run over injected collaborators.
pub struct ReportGenerator {
    config: Config,
    source: Box<dyn DatasetSource>,
    renderer: Box<dyn ChartRenderer>,
    mailer: Box<dyn Mailer>,
}

impl ReportGenerator {
    pub fn new(
        config: Config,
        source: Box<dyn DatasetSource>,
        renderer: Box<dyn ChartRenderer>,
        mailer: Box<dyn Mailer>,
    ) -> Self {
        Self {
            config,
            source,
            renderer,
            mailer,
        }
    }

    /// Production wiring: HTTP (or local file) source, line chart, SMTP (or dry run).
    pub fn from_config(config: Config, dataset_file: Option<&Path>, dry_run: bool) -> Result<Self> {
        let source: Box<dyn DatasetSource> = match dataset_file {
            Some(path) => Box::new(FileSource::new(path)),
            None => Box::new(HttpSource::from_config(&config.source)?),
        };
        let renderer = Box::new(LineChartRenderer::new(ChartStyle::from(&config.chart)));
        let mailer: Box<dyn Mailer> = if dry_run {
            Box::new(DryRunMailer)
        } else {
            Box::new(SmtpMailer::from_config(&config.email)?)
        };

        Ok(Self::new(config, source, renderer, mailer))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs with today's local date in the chart title.
    pub async fn run(&self) -> Result<ReportOutcome> {
        self.run_for(today_local()).await
    }

    /// Runs the whole report. Nothing is sent unless every earlier step succeeded.
    pub async fn run_for(&self, report_date: NaiveDate) -> Result<ReportOutcome> {
        info!(
            source = %self.source.describe(),
            renderer = self.renderer.name(),
            mailer = %self.mailer.describe(),
            "Starting report"
        );

        let dataset = self.source.load().await?;
        info!(
            rows = dataset.rows().len(),
            dates = dataset.dates().len(),
            "Dataset parsed"
        );

        let rules = AggregationRules::from_source(&self.config.source, &self.config.chart.series_label);
        let series = aggregate(&dataset, &rules)?;
        let latest = series.latest();
        info!(date = %latest.date, total = latest.count, "Series aggregated");

        let title = chart_title(&self.config.chart.title_prefix, report_date);
        let chart_path = PathBuf::from(&self.config.chart.output_path);
        self.renderer.render_to_file(&series, &title, &chart_path)?;

        let image = tokio::fs::read(&chart_path).await.map_err(|e| {
            CaseWatchError::graph_with_source(
                format!("Failed to read back chart {}", chart_path.display()),
                e,
            )
        })?;
        let chart_bytes = image.len();
        let attachment_name = chart_path
            .file_name()
            .map_or_else(|| "plot.png".to_string(), |n| n.to_string_lossy().into_owned());

        let message = ReportMessage::new(&self.config.email, latest.count, attachment_name, image)
            .build(&self.config.email)?;
        self.mailer.send(message).await?;

        info!(total = latest.count, title = %title, "Report sent");
        Ok(ReportOutcome {
            total: latest.count,
            latest_date: latest.date,
            title,
            chart_path,
            chart_bytes,
        })
    }
}
