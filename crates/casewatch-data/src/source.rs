//! Where the raw CSV comes from.

use async_trait::async_trait;
use casewatch_common::{CaseWatchError, Result};
use casewatch_config::SourceConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use url::Url;

use crate::dataset::RawDataset;

/// Provider of the raw dataset text.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Returns the full CSV text.
    async fn fetch_csv(&self) -> Result<String>;

    /// Human readable location, for logs.
    fn describe(&self) -> String;

    /// Fetches and parses the dataset.
    async fn load(&self) -> Result<RawDataset> {
        let text = self.fetch_csv().await?;
        info!(source = %self.describe(), bytes = text.len(), "Fetched dataset");
        RawDataset::from_csv(&text)
    }
}

/// Plain HTTP GET of a fixed URL, no authentication.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpSource {
    /// Source for `url` using a prepared client.
    pub fn new(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }

    /// Source built from the `source` configuration section.
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;
        let url = Url::parse(&config.url).map_err(|e| {
            CaseWatchError::config_with_source(format!("Invalid dataset URL '{}'", config.url), e)
        })?;
        Ok(Self::new(client, url))
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn fetch_csv(&self) -> Result<String> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// Local copy of the dataset, for offline runs.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    async fn fetch_csv(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            CaseWatchError::dataset_with_source(
                format!("Failed to read dataset file {}", self.path.display()),
                e,
            )
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
