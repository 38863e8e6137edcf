//! Remote catalog acquisition.
//!
//! [`ArchiveSource`] issues exactly one bounded-time GET against the
//! configured TAP endpoint. There are no retries: any failure is reported as a
//! [`FetchError`] and the caller switches to the built-in dataset.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::config::CatalogConfig;
use crate::models::RawRecord;

/// Why a catalog fetch failed. Callers treat all variants the same way.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("archive responded with HTTP {0}")]
    Status(u16),
    #[error("request to archive failed: {0}")]
    Transport(String),
    #[error("archive body is not a JSON record array: {0}")]
    Decode(String),
}

/// A provider of raw catalog records.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable origin used in log lines.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Vec<RawRecord>, FetchError>;
}

/// The remote astronomical archive, queried over HTTP(S).
pub struct ArchiveSource {
    endpoint: String,
    timeout: Duration,
}

impl ArchiveSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl CatalogSource for ArchiveSource {
    fn describe(&self) -> String {
        self.endpoint.clone()
    }

    async fn fetch(&self) -> Result<Vec<RawRecord>, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let resp = client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // Read the body first so a timeout mid-body is a transport failure
        // and only a complete but malformed body is a decode failure.
        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        // Only the array shape is required; each row is read leniently.
        let rows = serde_json::from_slice::<Vec<serde_json::Value>>(&body)
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(rows.into_iter().map(RawRecord::from_value).collect())
    }
}

/// A fixed in-process source, for tests and offline runs.
pub struct StaticSource {
    result: Result<Vec<RawRecord>, String>,
}

impl StaticSource {
    pub fn records(records: Vec<RawRecord>) -> Self {
        Self {
            result: Ok(records),
        }
    }

    /// A source whose every fetch fails with a transport error.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            result: Err(reason.into()),
        }
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    fn describe(&self) -> String {
        "static".to_string()
    }

    async fn fetch(&self) -> Result<Vec<RawRecord>, FetchError> {
        self.result.clone().map_err(FetchError::Transport)
    }
}
