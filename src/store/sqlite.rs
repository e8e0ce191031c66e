use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use libsql::{Builder, Connection};

use super::BookmarkStore;
use crate::error::StoreError;
use crate::model::{Bookmark, NewBookmark};

const SCHEMA: &str = include_str!("../migrations/001_bookmarks.sql");

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub async fn new(path: &Path) -> Result<Self> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        conn.query("SELECT 1", ()).await?;

        conn.execute_batch(SCHEMA)
            .await
            .map_err(|e| anyhow::anyhow!("failed to apply bookmarks schema: {e}"))?;

        Ok(SqliteStore { conn })
    }
}

#[async_trait]
impl BookmarkStore for SqliteStore {
    async fn list(&self) -> Result<Vec<Bookmark>, StoreError> {
        let query = r#"
SELECT id, title, url, description, rating
FROM bookmarks
ORDER BY id
"#;

        let mut rows = self.conn.query(query, ()).await?;
        let mut bookmarks: Vec<Bookmark> = vec![];

        while let Some(row) = rows.next().await? {
            bookmarks.push(Bookmark {
                id: row.get(0)?,
                title: row.get(1)?,
                url: row.get(2)?,
                description: row.get::<Option<String>>(3)?.unwrap_or_default(),
                rating: row.get(4)?,
            });
        }

        Ok(bookmarks)
    }

    async fn get(&self, id: i64) -> Result<Option<Bookmark>, StoreError> {
        let query = r#"
SELECT id, title, url, description, rating
FROM bookmarks
WHERE id = ?
"#;

        let mut rows = self.conn.query(query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            return Ok(Some(Bookmark {
                id: row.get(0)?,
                title: row.get(1)?,
                url: row.get(2)?,
                description: row.get::<Option<String>>(3)?.unwrap_or_default(),
                rating: row.get(4)?,
            }));
        }

        Ok(None)
    }

    async fn insert(&self, candidate: NewBookmark) -> Result<Bookmark, StoreError> {
        let query = r#"
INSERT INTO bookmarks (title, url, description, rating)
VALUES (?, ?, ?, ?)
"#;

        self.conn
            .execute(
                query,
                libsql::params![
                    candidate.title.clone(),
                    candidate.url.clone(),
                    candidate.description.clone(),
                    candidate.rating
                ],
            )
            .await?;

        let id = self.conn.last_insert_rowid();
        Ok(Bookmark {
            id,
            title: candidate.title,
            url: candidate.url,
            description: candidate.description,
            rating: candidate.rating,
        })
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let affected = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?", libsql::params![id])
            .await?;
        Ok(affected > 0)
    }
}
