//! Conversion of raw archive rows into [`CatalogEntry`] values.
//!
//! # Drop policy
//!
//! A row is kept only when its name, distance and radius are all present.
//! Anything else is skipped without an error: the archive legitimately has
//! planets with unmeasured distance or radius, and a partial entry would
//! break range filtering. The number of skipped rows is reported in
//! [`Normalized::dropped`] for logging only.

use crate::models::{CatalogEntry, DiscoveryYear, RawRecord};

/// Light years per parsec, at the precision the catalog has always used.
pub const LY_PER_PARSEC: f64 = 3.262;

/// Output of [`normalize`].
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Complete entries in input order.
    pub entries: Vec<CatalogEntry>,
    /// Rows skipped for missing fields.
    pub dropped: usize,
}

/// Normalizes raw rows, preserving input order and duplicates.
pub fn normalize(raw: Vec<RawRecord>) -> Normalized {
    let mut out = Normalized {
        entries: Vec::with_capacity(raw.len()),
        dropped: 0,
    };

    for record in raw {
        match normalize_record(record) {
            Some(entry) => out.entries.push(entry),
            None => out.dropped += 1,
        }
    }

    out
}

fn normalize_record(record: RawRecord) -> Option<CatalogEntry> {
    let name = record.pl_name.filter(|n| !n.trim().is_empty())?;
    let distance_pc = record.sy_dist?;
    let radius = record.pl_rade?;

    Some(CatalogEntry {
        name,
        distance_ly: round2(distance_pc * LY_PER_PARSEC),
        radius_earth: round2(radius),
        discovery_year: DiscoveryYear::from(record.disc_year),
    })
}

/// Rounds to two decimal places, half to even on the exact binary value.
///
/// `0.125` is exactly representable and rounds to `0.12`; `2.675` is stored
/// slightly below the half and rounds to `2.67`.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    // Exact error of the multiplication: value * 100 == scaled + residual.
    let residual = value.mul_add(100.0, -scaled);

    let rounded = if (scaled - scaled.trunc()).abs() == 0.5 {
        if residual > 0.0 {
            scaled.ceil()
        } else if residual < 0.0 {
            scaled.floor()
        } else {
            scaled.round_ties_even()
        }
    } else {
        scaled.round()
    };

    rounded / 100.0
}
