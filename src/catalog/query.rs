//! Range filtering over the in-memory catalog.
//!
//! A query is a full scan: keep entries with `distance_ly <= max_distance`
//! and `radius_earth <= max_size`, stable-sort ascending by distance, and cap
//! the page. `total_matches` counts matches before the cap so callers can
//! tell when the page was truncated.

use crate::config::CatalogConfig;
use crate::error::ServiceError;
use crate::models::{CatalogEntry, CatalogPage};

pub const DEFAULT_MAX_DISTANCE: f64 = 10_000.0;
pub const DEFAULT_MAX_SIZE: f64 = 100.0;
pub const DEFAULT_LIMIT: usize = 50;

/// Upper bounds for a catalog query, in light years and Earth radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryBounds {
    pub max_distance: f64,
    pub max_size: f64,
}

impl Default for QueryBounds {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl QueryBounds {
    /// Parses raw query-string values against the built-in defaults.
    pub fn parse(max_dist: Option<&str>, max_size: Option<&str>) -> Result<Self, ServiceError> {
        Self::parse_with_defaults(max_dist, max_size, Self::default())
    }

    /// Parses raw values, substituting `defaults` for absent or blank ones.
    ///
    /// Anything that is not a finite number is rejected rather than coerced.
    pub fn parse_with_defaults(
        max_dist: Option<&str>,
        max_size: Option<&str>,
        defaults: QueryBounds,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            max_distance: parse_bound("max_dist", max_dist, defaults.max_distance)?,
            max_size: parse_bound("max_size", max_size, defaults.max_size)?,
        })
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            max_distance: config.default_max_distance,
            max_size: config.default_max_size,
        }
    }

    fn matches(&self, entry: &CatalogEntry) -> bool {
        entry.distance_ly <= self.max_distance && entry.radius_earth <= self.max_size
    }
}

fn parse_bound(name: &str, raw: Option<&str>, default: f64) -> Result<f64, ServiceError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(s) => s,
    };

    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ServiceError::validation(format!(
            "{} must be a finite number, got '{}'",
            name, raw
        ))),
    }
}

/// Filters, sorts and caps `entries`.
pub fn query(entries: &[CatalogEntry], bounds: QueryBounds, limit: usize) -> CatalogPage {
    let mut matched: Vec<&CatalogEntry> = entries.iter().filter(|e| bounds.matches(e)).collect();
    let total_matches = matched.len();

    // sort_by is stable, so equal distances keep catalog order.
    matched.sort_by(|a, b| a.distance_ly.total_cmp(&b.distance_ly));

    CatalogPage {
        total_matches,
        data: matched.into_iter().take(limit).cloned().collect(),
    }
}
