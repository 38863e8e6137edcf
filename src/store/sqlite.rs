//! SQLite-backed [`UserStore`] and [`BookmarkStore`].
//!
//! Inserts go straight to the database and rely on the `UNIQUE` constraints
//! created by [`migrate`](crate::migrate); there is no read-before-write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::{BookmarkStore, UserStore};
use crate::error::{is_unique_violation, ServiceError};
use crate::models::{NewUser, User};

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn from_unix(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or_default()
}

fn user_from_row(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: from_unix(row.get("created_at")),
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, ServiceError> {
        let now = Utc::now().timestamp();

        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(User {
                id: done.last_insert_rowid(),
                username: user.username,
                email: user.email,
                password_hash: user.password_hash,
                created_at: from_unix(now),
            }),
            Err(e) if is_unique_violation(&e) => Err(ServiceError::DuplicateCredential),
            Err(e) => {
                tracing::error!(error = %e, "failed to insert user");
                Err(e.into())
            }
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to look up user");
            ServiceError::from(e)
        })?;

        Ok(row.as_ref().map(user_from_row))
    }
}

#[async_trait]
impl BookmarkStore for SqliteStore {
    async fn insert_bookmark(&self, username: &str, planet_name: &str) -> Result<(), ServiceError> {
        let result = sqlx::query(
            "INSERT INTO bookmarks (username, planet_name, created_at) VALUES (?, ?, ?)",
        )
        .bind(username)
        .bind(planet_name)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(ServiceError::AlreadyBookmarked),
            Err(e) => {
                tracing::error!(error = %e, "failed to insert bookmark");
                Err(e.into())
            }
        }
    }

    async fn list_bookmarks(&self, username: &str) -> Result<Vec<String>, ServiceError> {
        let rows = sqlx::query("SELECT planet_name FROM bookmarks WHERE username = ? ORDER BY id")
            .bind(username)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to list bookmarks");
                ServiceError::from(e)
            })?;

        Ok(rows
            .iter()
            .map(|r| r.get::<String, _>("planet_name"))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_store() -> SqliteStore {
        // A single connection keeps every query on the same in-memory db.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::migrate::apply(&pool).await.unwrap();
        SqliteStore::new(pool)
    }

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_user() {
        let store = test_store().await;
        let user = store.insert_user(new_user("a", "a@x.com")).await.unwrap();
        assert!(user.id > 0);

        let found = store.find_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.username, "a");
        assert_eq!(found.password_hash, "$argon2id$fake");
        assert!(store.find_user_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = test_store().await;
        store.insert_user(new_user("a", "a@x.com")).await.unwrap();
        let err = store.insert_user(new_user("b", "a@x.com")).await.unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateCredential));
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = test_store().await;
        store.insert_user(new_user("a", "a@x.com")).await.unwrap();
        let err = store.insert_user(new_user("a", "b@x.com")).await.unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateCredential));

        // The first account is untouched.
        let kept = store.find_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(kept.username, "a");
        assert!(store.find_user_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_signups_same_email() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config: crate::config::Config = toml::from_str(&format!(
            "[db]\npath = {:?}\n[server]\nbind = \"127.0.0.1:0\"\n",
            tmp.path().join("race.sqlite")
        ))
        .unwrap();
        let pool = crate::db::connect(&config).await.unwrap();
        crate::migrate::apply(&pool).await.unwrap();
        let store = SqliteStore::new(pool);

        let (first, second) = tokio::join!(
            store.insert_user(new_user("a", "same@x.com")),
            store.insert_user(new_user("b", "same@x.com")),
        );

        let results = [first, second];
        let ok = results.iter().filter(|r| r.is_ok()).count();
        let dup = results
            .iter()
            .filter(|r| matches!(r, Err(ServiceError::DuplicateCredential)))
            .count();
        assert_eq!((ok, dup), (1, 1));

        let kept = store.find_user_by_email("same@x.com").await.unwrap().unwrap();
        assert!(kept.username == "a" || kept.username == "b");
    }

    #[tokio::test]
    async fn test_bookmark_uniqueness_and_order() {
        let store = test_store().await;
        store.insert_bookmark("u", "p").await.unwrap();
        store.insert_bookmark("u", "a").await.unwrap();
        let err = store.insert_bookmark("u", "p").await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyBookmarked));

        // Same planet for another user is a different pair.
        store.insert_bookmark("v", "p").await.unwrap();

        assert_eq!(store.list_bookmarks("u").await.unwrap(), vec!["p", "a"]);
        assert_eq!(store.list_bookmarks("v").await.unwrap(), vec!["p"]);
        assert!(store.list_bookmarks("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_closed_pool_is_storage_unavailable() {
        let store = test_store().await;
        store.pool().close().await;
        let err = store.insert_bookmark("u", "p").await.unwrap_err();
        assert!(matches!(err, ServiceError::StorageUnavailable(_)));
        assert!(err.is_retryable());
    }
}
