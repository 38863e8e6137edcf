//! The process-lifetime catalog.
//!
//! [`CatalogStore::load`] runs the fetch → normalize pipeline exactly once.
//! Afterwards the store is immutable and is shared between request handlers
//! behind an `Arc` with no locking.

use serde::Serialize;

use super::fallback::fallback;
use super::fetch::CatalogSource;
use super::normalize::normalize;
use crate::models::CatalogEntry;

/// Where the loaded entries came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogOrigin {
    Remote,
    Fallback,
}

impl CatalogOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogOrigin::Remote => "remote",
            CatalogOrigin::Fallback => "fallback",
        }
    }
}

/// Read-only, in-memory catalog of normalized entries.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
    origin: CatalogOrigin,
}

impl CatalogStore {
    /// Fetches and normalizes the catalog, falling back to the built-in
    /// dataset if the fetch fails.
    ///
    /// A successful fetch that yields zero usable rows produces an empty
    /// catalog; only transport and decode failures trigger the fallback.
    pub async fn load(source: &dyn CatalogSource) -> Self {
        tracing::info!(source = %source.describe(), "fetching exoplanet catalog");

        match source.fetch().await {
            Ok(raw) => {
                let fetched = raw.len();
                let normalized = normalize(raw);
                tracing::info!(
                    fetched,
                    loaded = normalized.entries.len(),
                    dropped = normalized.dropped,
                    "catalog loaded from remote archive"
                );
                if normalized.entries.is_empty() {
                    tracing::warn!("remote archive returned no usable rows; catalog is empty");
                }
                Self {
                    entries: normalized.entries,
                    origin: CatalogOrigin::Remote,
                }
            }
            Err(e) => {
                let entries = fallback();
                tracing::warn!(
                    error = %e,
                    loaded = entries.len(),
                    "catalog fetch failed; using offline backup dataset"
                );
                Self {
                    entries,
                    origin: CatalogOrigin::Fallback,
                }
            }
        }
    }

    /// Builds a store from already-normalized entries.
    pub fn from_entries(entries: Vec<CatalogEntry>, origin: CatalogOrigin) -> Self {
        Self { entries, origin }
    }

    pub fn all(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn origin(&self) -> CatalogOrigin {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fetch::StaticSource;
    use crate::models::RawRecord;

    #[tokio::test]
    async fn test_fetch_failure_loads_fallback() {
        let store = CatalogStore::load(&StaticSource::failing("connection refused")).await;
        assert_eq!(store.origin(), CatalogOrigin::Fallback);
        assert!(!store.is_empty());
        assert_eq!(store.all(), fallback().as_slice());
    }

    #[tokio::test]
    async fn test_empty_fetch_is_not_a_failure() {
        let store = CatalogStore::load(&StaticSource::records(Vec::new())).await;
        assert_eq!(store.origin(), CatalogOrigin::Remote);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_remote_rows_are_normalized() {
        let source = StaticSource::records(vec![
            RawRecord {
                pl_name: Some("A b".into()),
                sy_dist: Some(1.0),
                pl_rade: Some(1.0),
                disc_year: Some(1999),
            },
            RawRecord {
                pl_name: Some("B b".into()),
                sy_dist: None,
                pl_rade: Some(1.0),
                disc_year: None,
            },
        ]);
        let store = CatalogStore::load(&source).await;
        assert_eq!(store.origin(), CatalogOrigin::Remote);
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].distance_ly, 3.26);
    }
}
