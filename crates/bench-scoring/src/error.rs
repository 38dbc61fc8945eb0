//! Error types for scoring.

use thiserror::Error;

/// Scoring errors.
///
/// Match scoring never fails; only vendor tier parsing can.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// Vendor tier text did not name a known tier
    #[error("invalid vendor tier '{tier}'")]
    InvalidTier {
        /// Text that failed to parse
        tier: String,
    },
}

/// Result type for scoring operations.
pub type Result<T> = std::result::Result<T, ScoringError>;
