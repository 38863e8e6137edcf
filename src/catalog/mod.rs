//! Exoplanet catalog: acquisition, normalization and querying.
//!
//! ```text
//! ┌──────────────┐   ┌────────────┐   ┌──────────────┐   ┌─────────┐
//! │ CatalogSource│──▶│ normalize  │──▶│ CatalogStore │──▶│  query  │
//! │ (archive)    │   │ (drop/conv)│   │ (immutable)  │   │ per req │
//! └──────┬───────┘   └────────────┘   └──────▲───────┘   └─────────┘
//!        │ FetchError                        │
//!        └────────────▶ fallback() ──────────┘
//! ```
//!
//! Loading happens once at startup, before the HTTP listener is bound.

pub mod fallback;
pub mod fetch;
pub mod normalize;
pub mod query;
pub mod store;

pub use fallback::fallback;
pub use fetch::{ArchiveSource, CatalogSource, FetchError, StaticSource};
pub use normalize::{normalize, Normalized};
pub use query::{query, QueryBounds};
pub use store::{CatalogOrigin, CatalogStore};
