//! SQLite connection pool for accounts and bookmarks.
//!
//! The pool runs in WAL mode with a busy timeout, so concurrent signups queue
//! on the write lock and the loser sees a `UNIQUE` violation rather than
//! `SQLITE_BUSY`.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;

use crate::config::Config;

const MAX_CONNECTIONS: u32 = 5;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

fn connect_options(db_path: &Path) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT)
}

/// Opens (creating if needed) the database at `db.path`.
pub async fn connect(config: &Config) -> Result<SqlitePool> {
    let db_path = config.db.path.as_path();

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create database directory: {}", parent.display())
        })?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(connect_options(db_path))
        .await
        .with_context(|| format!("Failed to open database: {}", db_path.display()))?;

    tracing::debug!(path = %db_path.display(), "database pool opened");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    fn config_for(path: &Path) -> Config {
        toml::from_str(&format!(
            "[db]\npath = {:?}\n[server]\nbind = \"127.0.0.1:0\"\n",
            path
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn test_connect_creates_parent_dirs_in_wal_mode() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested/data/orbitx.sqlite");
        let pool = connect(&config_for(&path)).await.unwrap();
        assert!(path.exists());

        let row = sqlx::query("PRAGMA journal_mode")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(row.get::<String, _>(0).to_lowercase(), "wal");
    }
}
