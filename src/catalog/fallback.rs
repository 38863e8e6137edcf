//! Built-in catalog served when the remote archive cannot be reached.

use crate::models::{CatalogEntry, DiscoveryYear};

/// Returns the offline backup catalog, already normalized.
pub fn fallback() -> Vec<CatalogEntry> {
    [
        ("Proxima Centauri b", 4.24, 1.03, 2016),
        ("TRAPPIST-1 e", 39.46, 0.92, 2017),
        ("Kepler-452 b", 1799.0, 1.63, 2015),
    ]
    .into_iter()
    .map(|(name, distance_ly, radius_earth, year)| CatalogEntry {
        name: name.to_string(),
        distance_ly,
        radius_earth,
        discovery_year: DiscoveryYear::Year(year),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_has_complete_entries() {
        let entries = fallback();
        assert_eq!(entries.len(), 3);
        for e in &entries {
            assert!(!e.name.is_empty());
            assert!(e.distance_ly >= 0.0);
            assert!(e.radius_earth >= 0.0);
            assert!(e.discovery_year.year().is_some());
        }
        assert_eq!(entries[0].name, "Proxima Centauri b");
    }
}
