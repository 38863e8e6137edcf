//! `orbitx query`: load the catalog and print one page of results.

use anyhow::Result;

use crate::catalog::{query, ArchiveSource, CatalogStore, QueryBounds};
use crate::config::Config;

pub async fn run_query(
    config: &Config,
    max_dist: Option<String>,
    max_size: Option<String>,
    limit: Option<usize>,
) -> Result<()> {
    let bounds = QueryBounds::parse_with_defaults(
        max_dist.as_deref(),
        max_size.as_deref(),
        QueryBounds::from_config(&config.catalog),
    )?;
    let limit = limit.unwrap_or(config.catalog.max_results);

    let catalog = CatalogStore::load(&ArchiveSource::from_config(&config.catalog)).await;
    let page = query(catalog.all(), bounds, limit);

    println!(
        "catalog: {} entries ({})",
        catalog.len(),
        catalog.origin().as_str()
    );
    println!(
        "bounds: max_dist={} ly, max_size={} R⊕",
        bounds.max_distance, bounds.max_size
    );
    println!("total matches: {}", page.total_matches);

    if page.data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    println!();
    for (i, entry) in page.data.iter().enumerate() {
        println!(
            "{:>3}. {}  {:.2} ly  {:.2} R⊕  ({})",
            i + 1,
            entry.name,
            entry.distance_ly,
            entry.radius_earth,
            entry.discovery_year
        );
    }
    if page.total_matches > page.data.len() {
        println!();
        println!(
            "showing {} of {} matches",
            page.data.len(),
            page.total_matches
        );
    }

    Ok(())
}
