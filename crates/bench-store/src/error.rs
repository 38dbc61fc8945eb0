//! Document store error types.

use thiserror::Error;

/// Document store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to open or create the database.
    #[error("failed to open database: {0}")]
    Open(String),

    /// Migration execution failed.
    #[error("migration failed: {0}")]
    Migration(String),

    /// Requested document was not found.
    #[error("{collection} document '{id}' not found")]
    NotFound {
        /// Collection searched
        collection: String,
        /// Document identifier
        id: String,
    },

    /// Document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Underlying `SQLx` error.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// I/O error during database operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
