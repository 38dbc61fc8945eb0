//! Database connection management.
//!
//! Provides a `StorePool` wrapper around a `SQLx` `SQLite` pool that creates
//! the database file (and its parent directory) on first use.

use crate::error::{Result, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;

/// Path that selects a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

/// `SQLite` connection pool for the document store.
#[derive(Debug, Clone)]
pub struct StorePool {
    pool: Pool<Sqlite>,
}

impl StorePool {
    /// Open (creating if missing) the database at `path`.
    ///
    /// `:memory:` opens an in-memory database on a single connection so that
    /// every query sees the same schema.
    ///
    /// # Errors
    /// Returns `StoreError::Open` if the path is not UTF-8 or the database
    /// cannot be opened.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| StoreError::Open("invalid database path: not valid UTF-8".to_string()))?;
        let in_memory = path_str == IN_MEMORY;

        if !in_memory {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut connect_options = SqliteConnectOptions::from_str(path_str)
            .map_err(|e| StoreError::Open(format!("invalid connection string: {e}")))?
            .create_if_missing(true);
        if !in_memory {
            connect_options = connect_options.journal_mode(SqliteJournalMode::Wal);
        }

        let mut pool_options = SqlitePoolOptions::new().max_connections(5);
        if in_memory {
            // Dropping the only connection would drop the database with it.
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::Open(format!("failed to open {path_str}: {e}")))?;

        tracing::info!(path = %path_str, "document store opened");

        Ok(Self { pool })
    }

    /// Get a reference to the underlying `SQLx` pool.
    #[must_use]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Check that the database answers a trivial query.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the connection pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("document store closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_pool() {
        let pool = StorePool::new(IN_MEMORY).await.expect("open in-memory pool");
        pool.ping().await.expect("ping");
        pool.close().await;
    }

    #[tokio::test]
    async fn test_file_pool_creates_parent_dirs() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("nested").join("bench.db");

        let pool = StorePool::new(&path).await.expect("open file pool");
        pool.ping().await.expect("ping");
        assert!(path.exists());
        pool.close().await;
    }
}
