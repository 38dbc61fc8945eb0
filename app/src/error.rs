//! Error types for the command layer.

use bench_boards::BoardError;
use bench_core::{ConfigError, CoreError};
use bench_scoring::ScoringError;
use bench_search::{BackendFailure, DescriptorOutcome, DescriptorReport, SearchError};
use bench_store::StoreError;
use serde::Serialize;
use std::fmt;

/// Serializable error returned by every command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandError {
    /// Error code for callers to branch on (e.g., "UNKNOWN_PLATFORM")
    pub code: String,
    /// User-friendly error message
    pub message: String,
    /// Optional debugging context (never contains credentials)
    pub details: Option<serde_json::Value>,
}

impl CommandError {
    /// Create a new command error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create a command error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for CommandError {}

impl From<BoardError> for CommandError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::UnknownPlatform { platform_id } => Self::with_details(
                "UNKNOWN_PLATFORM",
                format!("Unknown platform: {platform_id}"),
                serde_json::json!({ "platform_id": platform_id }),
            ),
            other => Self::new("CATALOGUE_ERROR", format!("Board catalogue error: {other}")),
        }
    }
}

impl From<SearchError> for CommandError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Board(err) => err.into(),
            SearchError::SearchUnavailable { reports } => Self::with_details(
                "SEARCH_UNAVAILABLE",
                "Every configured search backend failed",
                serde_json::json!({
                    "queries": reports.len(),
                    "failed": reports.iter().map(failure_details).collect::<Vec<_>>(),
                }),
            ),
            SearchError::InvalidConfig(msg) => {
                Self::new("INVALID_CONFIG", format!("Invalid search configuration: {msg}"))
            }
            SearchError::Internal(msg) => Self::new("INTERNAL_ERROR", msg),
        }
    }
}

/// Platform, category and the last backend error of one exhausted query.
fn failure_details(report: &DescriptorReport) -> serde_json::Value {
    let failures: &[BackendFailure] = match &report.outcome {
        DescriptorOutcome::BackendExhausted { failures } => failures,
        _ => &[],
    };
    serde_json::json!({
        "platform": report.descriptor.platform,
        "category": report.descriptor.category,
        "attempts": failures.len(),
        "last_error": failures.last().map(|f| f.error.as_str()),
    })
}

impl From<ScoringError> for CommandError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::InvalidTier { tier } => Self::with_details(
                "INVALID_TIER",
                format!("Invalid vendor tier: {tier}"),
                serde_json::json!({ "tier": tier }),
            ),
        }
    }
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection, id } => Self::with_details(
                "NOT_FOUND",
                format!("No {collection} record with id {id}"),
                serde_json::json!({ "collection": collection, "id": id }),
            ),
            other => Self::new("DATABASE_ERROR", format!("Database error: {other}")),
        }
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        Self::new("CONFIG_ERROR", format!("Configuration error: {err}"))
    }
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::new("INVALID_INPUT", msg),
            other => Self::new("INTERNAL_ERROR", other.to_string()),
        }
    }
}

/// Convert `std::io::Error` to `CommandError`.
impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        Self::new("FILESYSTEM_ERROR", format!("Filesystem error: {err}"))
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::new("INVALID_JSON", format!("Invalid JSON: {err}"))
    }
}
