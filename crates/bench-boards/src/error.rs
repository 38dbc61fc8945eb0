//! Error types for the board catalogue.

use thiserror::Error;

/// Errors that can occur while loading or querying the board catalogue.
#[derive(Error, Debug)]
pub enum BoardError {
    /// Platform is not registered
    #[error("unknown platform: {platform_id}")]
    UnknownPlatform {
        /// The platform ID that was looked up
        platform_id: String,
    },

    /// Failed to parse catalogue TOML
    #[error("failed to parse board catalogue TOML in {path}: {source}")]
    ParseError {
        /// Where the catalogue came from
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },

    /// Platform definition failed validation
    #[error("invalid platform definition for {platform_id}: {reason}")]
    ValidationError {
        /// Platform ID being validated
        platform_id: String,
        /// Reason for validation failure
        reason: String,
    },

    /// Same platform ID defined twice
    #[error("duplicate platform ID in catalogue: {platform_id}")]
    DuplicatePlatform {
        /// The repeated ID
        platform_id: String,
    },

    /// I/O error while reading a catalogue file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid platform ID format
    #[error("invalid platform ID: {0}")]
    InvalidId(#[from] bench_core::CoreError),
}

/// Result type for catalogue operations.
pub type Result<T> = std::result::Result<T, BoardError>;
