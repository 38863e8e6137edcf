//! TOML configuration parsing.
//!
//! Every section except `[db]` and `[server]` is optional and falls back to
//! the values the public OrbitX deployment uses.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub satellite: SatelliteConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

/// Remote archive and query defaults for the exoplanet catalog.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_catalog_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_max_distance")]
    pub default_max_distance: f64,
    #[serde(default = "default_max_size")]
    pub default_max_size: f64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: default_catalog_endpoint(),
            timeout_secs: default_catalog_timeout_secs(),
            max_results: default_max_results(),
            default_max_distance: default_max_distance(),
            default_max_size: default_max_size(),
        }
    }
}

fn default_catalog_endpoint() -> String {
    "https://exoplanetarchive.ipac.caltech.edu/TAP/sync?query=select+pl_name,sy_dist,pl_rade,disc_year+from+ps+where+default_flag=1&format=json".to_string()
}
fn default_catalog_timeout_secs() -> u64 {
    15
}
fn default_max_results() -> usize {
    50
}
fn default_max_distance() -> f64 {
    10_000.0
}
fn default_max_size() -> f64 {
    100.0
}

#[derive(Debug, Deserialize, Clone)]
pub struct SatelliteConfig {
    #[serde(default = "default_current_url")]
    pub current_url: String,
    #[serde(default = "default_predict_url")]
    pub predict_url: String,
    #[serde(default = "default_satellite_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SatelliteConfig {
    fn default() -> Self {
        Self {
            current_url: default_current_url(),
            predict_url: default_predict_url(),
            timeout_secs: default_satellite_timeout_secs(),
        }
    }
}

fn default_current_url() -> String {
    "http://api.open-notify.org/iss-now.json".to_string()
}
fn default_predict_url() -> String {
    "https://api.wheretheiss.at/v1/satellites/25544/positions".to_string()
}
fn default_satellite_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    // Validate catalog
    if config.catalog.timeout_secs == 0 {
        anyhow::bail!("catalog.timeout_secs must be > 0");
    }
    if config.catalog.max_results < 1 {
        anyhow::bail!("catalog.max_results must be >= 1");
    }
    for (name, value) in [
        ("catalog.default_max_distance", config.catalog.default_max_distance),
        ("catalog.default_max_size", config.catalog.default_max_size),
    ] {
        if !value.is_finite() || value < 0.0 {
            anyhow::bail!("{} must be a finite number >= 0", name);
        }
    }

    // Validate satellite
    if config.satellite.timeout_secs == 0 {
        anyhow::bail!("satellite.timeout_secs must be > 0");
    }

    Ok(())
}
