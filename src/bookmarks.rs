//! Per-user saved planets.

use std::sync::Arc;

use crate::error::ServiceError;
use crate::store::BookmarkStore;

#[derive(Clone)]
pub struct Bookmarks {
    store: Arc<dyn BookmarkStore>,
}

impl Bookmarks {
    pub fn new(store: Arc<dyn BookmarkStore>) -> Self {
        Self { store }
    }

    /// Save `planet_name` for `username`.
    ///
    /// Saving the same pair twice is an expected outcome and returns
    /// `AlreadyBookmarked`, distinct from a storage fault.
    pub async fn save(&self, username: &str, planet_name: &str) -> Result<(), ServiceError> {
        let username = username.trim();
        let planet_name = planet_name.trim();
        if username.is_empty() || planet_name.is_empty() {
            return Err(ServiceError::validation("Missing data!"));
        }
        self.store.insert_bookmark(username, planet_name).await
    }

    /// Planet names saved by `username`, in the order they were saved.
    pub async fn list_for(&self, username: &str) -> Result<Vec<String>, ServiceError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ServiceError::validation("username is required"));
        }
        self.store.list_bookmarks(username).await
    }
}
