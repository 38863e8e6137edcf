//! # OrbitX
//!
//! Backend for the OrbitX space explorer: a filterable exoplanet catalog,
//! live and predicted ISS positions, user accounts with saved planets, and a
//! static "classified files" feed, all served as JSON over HTTP.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐  once  ┌──────────────┐
//! │  Archive   │───────▶│ CatalogStore │───┐
//! │ or backup  │        └──────────────┘   │    ┌──────────┐
//! └────────────┘                           ├───▶│   HTTP   │
//! ┌────────────┐  per   ┌──────────────┐   │    │  (axum)  │
//! │   SQLite   │◀──────▶│  Accounts /  │───┘    └──────────┘
//! │  (UNIQUE)  │ request│  Bookmarks   │
//! └────────────┘        └──────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`catalog`] | Catalog fetch, normalization, fallback and queries |
//! | [`accounts`] | Signup and login |
//! | [`bookmarks`] | Saved planets per user |
//! | [`store`] | Persistence traits with SQLite and in-memory backends |
//! | [`satellite`] | ISS position lookups |
//! | [`classified`] | Classified files feed |
//! | [`server`] | HTTP API |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema creation |

pub mod accounts;
pub mod bookmarks;
pub mod catalog;
pub mod catalog_cmd;
pub mod classified;
pub mod config;
pub mod db;
pub mod error;
pub mod migrate;
pub mod models;
pub mod password;
pub mod satellite;
pub mod server;
pub mod store;
