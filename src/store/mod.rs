//! Storage abstraction for accounts and bookmarks.
//!
//! The [`UserStore`] and [`BookmarkStore`] traits define the persistence
//! operations the [`accounts`](crate::accounts) and
//! [`bookmarks`](crate::bookmarks) services need. Two backends exist:
//!
//! - [`SqliteStore`] — production backend; uniqueness comes from `UNIQUE`
//!   constraints so concurrent inserts cannot both succeed.
//! - [`InMemoryStore`] — for tests; check and insert happen under one lock.
//!
//! Implementations report a violated uniqueness rule as the matching business
//! error and every other failure as [`ServiceError::StorageUnavailable`].

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::models::{NewUser, User};

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

/// Account persistence.
///
/// | Method | Errors |
/// |--------|--------|
/// | [`insert_user`](UserStore::insert_user) | `DuplicateCredential` on username or email clash |
/// | [`find_user_by_email`](UserStore::find_user_by_email) | storage faults only |
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new account, rejecting (never overwriting) an existing
    /// username or email.
    async fn insert_user(&self, user: NewUser) -> Result<User, ServiceError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, ServiceError>;
}

/// Per-user bookmark persistence.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// Save a (username, planet) pair; `AlreadyBookmarked` if it exists.
    async fn insert_bookmark(&self, username: &str, planet_name: &str) -> Result<(), ServiceError>;

    /// Planet names saved by `username`, oldest first.
    async fn list_bookmarks(&self, username: &str) -> Result<Vec<String>, ServiceError>;
}
