//! Persistence seam for bookmark records.
//!
//! Handlers only see the `BookmarkStore` capability interface; the backing
//! is either the libsql table (production) or an in-memory list (tests).

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{Bookmark, NewBookmark};

#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// All bookmarks in store order.
    async fn list(&self) -> Result<Vec<Bookmark>, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<Bookmark>, StoreError>;

    /// Persists the candidate and returns the record with its assigned id.
    async fn insert(&self, candidate: NewBookmark) -> Result<Bookmark, StoreError>;

    /// Returns false when no record with this id exists.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}
