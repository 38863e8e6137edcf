//! ISS position lookups proxied from public tracking APIs.
//!
//! Two upstreams are used:
//! - **open-notify** `iss-now.json` for the live position. Coordinates arrive
//!   as decimal strings under `iss_position`.
//! - **wheretheiss.at** `positions?timestamps=<unix>` for a position at an
//!   arbitrary instant. The response is an array; only the first element is
//!   read.
//!
//! Any transport failure, non-success status or unexpected body becomes
//! [`ServiceError::Upstream`].

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::SatelliteConfig;
use crate::error::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SatellitePosition {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// Fetch-by-timestamp satellite position capability.
#[async_trait]
pub trait SatelliteSource: Send + Sync {
    async fn current(&self) -> Result<SatellitePosition, ServiceError>;

    async fn predict(&self, timestamp: i64) -> Result<SatellitePosition, ServiceError>;
}

/// Parses the `timestamp` query parameter.
pub fn parse_timestamp(raw: Option<&str>) -> Result<i64, ServiceError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let Some(raw) = raw else {
        return Err(ServiceError::validation("timestamp is required"));
    };
    raw.parse::<i64>().map_err(|_| {
        ServiceError::validation(format!("timestamp must be a Unix time in seconds, got '{}'", raw))
    })
}

pub struct HttpSatelliteSource {
    client: reqwest::Client,
    current_url: String,
    predict_url: String,
}

impl HttpSatelliteSource {
    pub fn new(config: &SatelliteConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            current_url: config.current_url.clone(),
            predict_url: config.predict_url.clone(),
        })
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, ServiceError> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ServiceError::Upstream(format!(
                "{} responded with HTTP {}",
                url,
                status.as_u16()
            )));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| ServiceError::Upstream(e.to_string()))
    }
}

#[async_trait]
impl SatelliteSource for HttpSatelliteSource {
    async fn current(&self) -> Result<SatellitePosition, ServiceError> {
        let body = self.get_json(&self.current_url, &[]).await?;
        parse_current(&body)
    }

    async fn predict(&self, timestamp: i64) -> Result<SatellitePosition, ServiceError> {
        let body = self
            .get_json(&self.predict_url, &[("timestamps", timestamp.to_string())])
            .await?;
        parse_predicted(&body, timestamp)
    }
}

fn coordinate(value: &Value, field: &str) -> Result<f64, ServiceError> {
    let v = &value[field];
    v.as_f64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| ServiceError::Upstream(format!("missing or non-numeric '{}'", field)))
}

fn parse_current(body: &Value) -> Result<SatellitePosition, ServiceError> {
    let position = &body["iss_position"];
    Ok(SatellitePosition {
        latitude: coordinate(position, "latitude")?,
        longitude: coordinate(position, "longitude")?,
        timestamp: body["timestamp"].as_i64(),
    })
}

fn parse_predicted(body: &Value, timestamp: i64) -> Result<SatellitePosition, ServiceError> {
    let first = body
        .as_array()
        .and_then(|a| a.first())
        .ok_or_else(|| ServiceError::Upstream("empty positions response".to_string()))?;
    Ok(SatellitePosition {
        latitude: coordinate(first, "latitude")?,
        longitude: coordinate(first, "longitude")?,
        timestamp: Some(timestamp),
    })
}
