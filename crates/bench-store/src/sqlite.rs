//! `SQLite` implementation of [`DocumentStore`].
//!
//! Documents are stored as JSON text in a single `documents` table.

use crate::connection::{StorePool, IN_MEMORY};
use crate::document::{Collection, DocumentStore};
use crate::error::{Result, StoreError};
use crate::migrations;
use async_trait::async_trait;
use bench_core::RecordId;
use serde_json::Value;
use std::path::Path;

/// Document store backed by a `SQLite` file.
#[derive(Debug, Clone)]
pub struct SqliteDocumentStore {
    pool: StorePool,
}

impl SqliteDocumentStore {
    /// Open the database at `path` and apply pending migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let pool = StorePool::new(path).await?;
        migrations::run_migrations(pool.pool()).await?;
        Ok(Self { pool })
    }

    /// Fresh in-memory store, mainly for tests.
    pub async fn in_memory() -> Result<Self> {
        Self::open(IN_MEMORY).await
    }

    /// Current schema version.
    pub async fn schema_version(&self) -> Result<i64> {
        migrations::get_schema_version(self.pool.pool()).await
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: Collection) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM documents WHERE collection = ?",
        )
        .bind(collection.as_str())
        .fetch_one(self.pool.pool())
        .await?;
        Ok(count)
    }

    /// Close the underlying pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn decode(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).map_err(|e| StoreError::Serialization(e.to_string()))
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn put(&self, collection: Collection, id: &RecordId, document: &Value) -> Result<()> {
        let data = serde_json::to_string(document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO documents (collection, id, data, created_at, updated_at)
            VALUES (?, ?, ?, datetime('now'), datetime('now'))
            ON CONFLICT(collection, id) DO UPDATE SET
                data = excluded.data,
                updated_at = datetime('now')
            ",
        )
        .bind(collection.as_str())
        .bind(id.as_str())
        .bind(data)
        .execute(self.pool.pool())
        .await?;

        tracing::debug!(%collection, id = %id, "document stored");
        Ok(())
    }

    async fn get(&self, collection: Collection, id: &RecordId) -> Result<Option<Value>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT data FROM documents WHERE collection = ? AND id = ?")
                .bind(collection.as_str())
                .bind(id.as_str())
                .fetch_optional(self.pool.pool())
                .await?;

        row.map(|(data,)| decode(&data)).transpose()
    }

    async fn delete(&self, collection: Collection, id: &RecordId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection.as_str())
            .bind(id.as_str())
            .execute(self.pool.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Value>> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT data FROM documents WHERE collection = ? ORDER BY rowid")
                .bind(collection.as_str())
                .fetch_all(self.pool.pool())
                .await?;

        rows.iter().map(|(data,)| decode(data)).collect()
    }
}
