//! In-memory [`UserStore`] and [`BookmarkStore`] for tests.
//!
//! Each operation takes a single `Mutex` guard across the uniqueness check and
//! the insert, which makes them atomic for this backend.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{BookmarkStore, UserStore};
use crate::error::ServiceError;
use crate::models::{Bookmark, NewUser, User};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    bookmarks: Vec<Bookmark>,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, ServiceError> {
        self.tables
            .lock()
            .map_err(|_| ServiceError::StorageUnavailable("in-memory store poisoned".to_string()))
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, ServiceError> {
        let mut tables = self.lock()?;
        if tables
            .users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(ServiceError::DuplicateCredential);
        }

        let stored = User {
            id: tables.users.len() as i64 + 1,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(stored.clone());
        Ok(stored)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        let tables = self.lock()?;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl BookmarkStore for InMemoryStore {
    async fn insert_bookmark(&self, username: &str, planet_name: &str) -> Result<(), ServiceError> {
        let mut tables = self.lock()?;
        if tables
            .bookmarks
            .iter()
            .any(|b| b.username == username && b.planet_name == planet_name)
        {
            return Err(ServiceError::AlreadyBookmarked);
        }

        tables.bookmarks.push(Bookmark {
            username: username.to_string(),
            planet_name: planet_name.to_string(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_bookmarks(&self, username: &str) -> Result<Vec<String>, ServiceError> {
        let tables = self.lock()?;
        Ok(tables
            .bookmarks
            .iter()
            .filter(|b| b.username == username)
            .map(|b| b.planet_name.clone())
            .collect())
    }
}
