//! Core data models used throughout OrbitX.
//!
//! Catalog records flow from the remote archive ([`RawRecord`]) through
//! normalization into [`CatalogEntry`]. Accounts and bookmarks are the rows
//! persisted by the [`store`](crate::store) backends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the archive's TAP JSON response, before normalization.
///
/// Every field may be absent or `null`; extra fields are ignored. A value of
/// the wrong JSON type (`"sy_dist": "n/a"`) reads as absent, so one odd row
/// is dropped by normalization instead of failing the whole response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub pl_name: Option<String>,
    /// System distance in parsecs.
    #[serde(default, deserialize_with = "lenient_number")]
    pub sy_dist: Option<f64>,
    /// Planet radius in Earth radii.
    #[serde(default, deserialize_with = "lenient_number")]
    pub pl_rade: Option<f64>,
    /// Integral floats such as `2016.0` are accepted as years.
    #[serde(default, deserialize_with = "lenient_year")]
    pub disc_year: Option<i64>,
}

impl RawRecord {
    /// Reads one element of the response array. Anything that is not a JSON
    /// object yields an empty record.
    pub fn from_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

fn lenient_string<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_number<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(serde_json::Value::deserialize(d)?
        .as_f64()
        .filter(|n| n.is_finite()))
}

fn lenient_year<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let value = serde_json::Value::deserialize(d)?;
    if let Some(year) = value.as_i64() {
        return Ok(Some(year));
    }
    Ok(value
        .as_f64()
        .filter(|y| y.fract() == 0.0 && y.abs() < 1e15)
        .map(|y| y as i64))
}

/// Discovery year, or `"Unknown"` when the archive did not report one.
///
/// Serializes as a bare integer or the literal string `"Unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryYear {
    Year(i64),
    Unknown,
}

impl DiscoveryYear {
    pub fn year(&self) -> Option<i64> {
        match self {
            DiscoveryYear::Year(y) => Some(*y),
            DiscoveryYear::Unknown => None,
        }
    }
}

impl From<Option<i64>> for DiscoveryYear {
    fn from(year: Option<i64>) -> Self {
        year.map(DiscoveryYear::Year).unwrap_or(DiscoveryYear::Unknown)
    }
}

impl Serialize for DiscoveryYear {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DiscoveryYear::Year(y) => serializer.serialize_i64(*y),
            DiscoveryYear::Unknown => serializer.serialize_str("Unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for DiscoveryYear {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Year(i64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Year(y) => Ok(DiscoveryYear::Year(y)),
            Repr::Text(s) if s == "Unknown" => Ok(DiscoveryYear::Unknown),
            Repr::Text(s) => Err(serde::de::Error::custom(format!(
                "expected a year or \"Unknown\", got {:?}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for DiscoveryYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryYear::Year(y) => write!(f, "{}", y),
            DiscoveryYear::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Normalized catalog record held by the [`CatalogStore`](crate::catalog::CatalogStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub distance_ly: f64,
    pub radius_earth: f64,
    #[serde(rename = "year")]
    pub discovery_year: DiscoveryYear,
}

/// A filtered, sorted and capped view of the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    /// Number of matches before truncation.
    pub total_matches: usize,
    pub data: Vec<CatalogEntry>,
}

/// A registered account. `password_hash` is a PHC string, never plaintext.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Account row as handed to a [`UserStore`](crate::store::UserStore) for insertion.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// A saved (username, planet) pair.
#[derive(Debug, Clone)]
pub struct Bookmark {
    pub username: String,
    pub planet_name: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_serializes_as_number_or_unknown() {
        let known = serde_json::to_value(DiscoveryYear::Year(2016)).unwrap();
        assert_eq!(known, serde_json::json!(2016));
        let unknown = serde_json::to_value(DiscoveryYear::Unknown).unwrap();
        assert_eq!(unknown, serde_json::json!("Unknown"));
    }

    #[test]
    fn test_year_deserializes_both_forms() {
        let year: DiscoveryYear = serde_json::from_str("2017").unwrap();
        assert_eq!(year, DiscoveryYear::Year(2017));
        let unknown: DiscoveryYear = serde_json::from_str("\"Unknown\"").unwrap();
        assert_eq!(unknown, DiscoveryYear::Unknown);
        assert!(serde_json::from_str::<DiscoveryYear>("\"soon\"").is_err());
    }

    #[test]
    fn test_entry_uses_year_field_name() {
        let entry = CatalogEntry {
            name: "Proxima Centauri b".to_string(),
            distance_ly: 4.24,
            radius_earth: 1.03,
            discovery_year: DiscoveryYear::Year(2016),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["year"], 2016);
        assert!(value.get("discovery_year").is_none());
    }

    #[test]
    fn test_raw_record_tolerates_nulls_and_extras() {
        let raw: RawRecord = serde_json::from_str(
            r#"{"pl_name":"X b","sy_dist":null,"pl_rade":1.5,"extra":"ignored"}"#,
        )
        .unwrap();
        assert_eq!(raw.pl_name.as_deref(), Some("X b"));
        assert!(raw.sy_dist.is_none());
        assert_eq!(raw.pl_rade, Some(1.5));
        assert!(raw.disc_year.is_none());
    }

    #[test]
    fn test_raw_record_wrong_types_read_as_absent() {
        let raw: RawRecord = serde_json::from_str(
            r#"{"pl_name":42,"sy_dist":"n/a","pl_rade":[1],"disc_year":"2016"}"#,
        )
        .unwrap();
        assert!(raw.pl_name.is_none());
        assert!(raw.sy_dist.is_none());
        assert!(raw.pl_rade.is_none());
        assert!(raw.disc_year.is_none());
    }

    #[test]
    fn test_raw_record_integral_float_year() {
        let raw: RawRecord = serde_json::from_str(r#"{"disc_year":2016.0}"#).unwrap();
        assert_eq!(raw.disc_year, Some(2016));
        let raw: RawRecord = serde_json::from_str(r#"{"disc_year":2016.5}"#).unwrap();
        assert!(raw.disc_year.is_none());
    }

    #[test]
    fn test_raw_record_from_non_object() {
        let raw = RawRecord::from_value(serde_json::json!("not a row"));
        assert!(raw.pl_name.is_none());
        assert!(raw.sy_dist.is_none());
    }
}
