//! Error types for query generation and search execution.

use crate::executor::DescriptorReport;
use bench_boards::BoardError;
use bench_core::BackendKind;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced to callers of the search subsystem.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Board catalogue error (unknown platform, invalid catalogue)
    #[error("board catalogue error: {0}")]
    Board(#[from] BoardError),

    /// Every descriptor exhausted every configured backend
    #[error(
        "search unavailable: all {} queries failed on every configured backend",
        .reports.len()
    )]
    SearchUnavailable {
        /// One exhausted report per descriptor, with its backend failures
        reports: Vec<DescriptorReport>,
    },

    /// Invalid executor or builder configuration
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),

    /// Internal error (HTTP client construction and similar)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// A single failed backend call.
///
/// These never reach callers directly; the executor turns them into retry,
/// fallback, or a per-descriptor outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Backend needs credentials that are not configured
    #[error("{backend}: credentials not configured")]
    MissingCredentials {
        /// Backend kind
        backend: BackendKind,
    },

    /// Backend turned off by configuration
    #[error("{backend}: disabled by configuration")]
    Disabled {
        /// Backend kind
        backend: BackendKind,
    },

    /// Backend asked us to slow down
    #[error("{backend}: rate limited (retry after {retry_after:?})")]
    RateLimited {
        /// Backend kind
        backend: BackendKind,
        /// Server-supplied minimum wait
        retry_after: Option<Duration>,
    },

    /// Call exceeded the per-call timeout
    #[error("{backend}: timed out after {after:?}")]
    Timeout {
        /// Backend kind
        backend: BackendKind,
        /// Timeout that elapsed
        after: Duration,
    },

    /// Non-success HTTP status
    #[error("{backend}: HTTP {status}: {message}")]
    Http {
        /// Backend kind
        backend: BackendKind,
        /// HTTP status code
        status: u16,
        /// Response body excerpt
        message: String,
    },

    /// Connection-level failure
    #[error("{backend}: transport error: {message}")]
    Transport {
        /// Backend kind
        backend: BackendKind,
        /// Error description
        message: String,
    },

    /// Response could not be interpreted
    #[error("{backend}: unparseable response: {message}")]
    Parse {
        /// Backend kind
        backend: BackendKind,
        /// Error description
        message: String,
    },
}

impl BackendError {
    /// Backend that produced the error.
    #[must_use]
    pub fn backend(&self) -> BackendKind {
        match self {
            Self::MissingCredentials { backend }
            | Self::Disabled { backend }
            | Self::RateLimited { backend, .. }
            | Self::Timeout { backend, .. }
            | Self::Http { backend, .. }
            | Self::Transport { backend, .. }
            | Self::Parse { backend, .. } => *backend,
        }
    }

    /// Backend was never really tried; move on without counting a failure.
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::MissingCredentials { .. } | Self::Disabled { .. })
    }

    /// Worth retrying on the same backend.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Transport { .. } => true,
            Self::Http { status, .. } => *status >= 500,
            Self::MissingCredentials { .. } | Self::Disabled { .. } | Self::Parse { .. } => false,
        }
    }

    /// Whether this is a rate-limit signal.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Server-supplied minimum wait, if any.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}
