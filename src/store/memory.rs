use async_trait::async_trait;
use tokio::sync::Mutex;

use super::BookmarkStore;
use crate::error::StoreError;
use crate::model::{Bookmark, NewBookmark};

/// In-memory bookmark list. Ids are handed out sequentially from 1 to match
/// the autoincrement behavior of the sqlite backing. Handlers run on a
/// multithreaded runtime, so the list sits behind a lock.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

struct Inner {
    next_id: i64,
    bookmarks: Vec<Bookmark>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            inner: Mutex::new(Inner {
                next_id: 1,
                bookmarks: vec![],
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Bookmark>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.bookmarks.clone())
    }

    async fn get(&self, id: i64) -> Result<Option<Bookmark>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.bookmarks.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, candidate: NewBookmark) -> Result<Bookmark, StoreError> {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let bookmark = Bookmark {
            id,
            title: candidate.title,
            url: candidate.url,
            description: candidate.description,
            rating: candidate.rating,
        };
        inner.bookmarks.push(bookmark.clone());
        Ok(bookmark)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;
        match inner.bookmarks.iter().position(|b| b.id == id) {
            Some(index) => {
                inner.bookmarks.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str) -> NewBookmark {
        NewBookmark {
            title: title.to_string(),
            url: "https://example.org".to_string(),
            description: String::new(),
            rating: 4,
        }
    }

    #[tokio::test]
    async fn assigns_sequential_ids() {
        let store = MemoryStore::new();
        let first = store.insert(candidate("one")).await.unwrap();
        let second = store.insert(candidate("two")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn lists_in_insertion_order() {
        let store = MemoryStore::new();
        store.insert(candidate("one")).await.unwrap();
        store.insert(candidate("two")).await.unwrap();
        store.insert(candidate("three")).await.unwrap();

        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn get_and_delete_round_trip() {
        let store = MemoryStore::new();
        let created = store.insert(candidate("one")).await.unwrap();

        assert_eq!(store.get(created.id).await.unwrap(), Some(created.clone()));
        assert!(store.delete(created.id).await.unwrap());
        assert_eq!(store.get(created.id).await.unwrap(), None);
        assert!(!store.delete(created.id).await.unwrap());
    }
}
