//! The capability every search backend provides.

use crate::error::BackendError;
use crate::result::RawHit;
use async_trait::async_trait;
use bench_core::BackendKind;

/// A search backend that can run one query string.
///
/// Implementations must be thread-safe (Send + Sync); the executor shares
/// them as `Arc<dyn SearchBackend>` across concurrent descriptors.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Which kind of backend this is.
    fn kind(&self) -> BackendKind;

    /// Whether the backend can be called at all (credentials present, enabled).
    ///
    /// Unavailable backends are skipped without counting as a failure.
    fn is_available(&self) -> bool;

    /// Run a query and return the raw hits.
    ///
    /// # Errors
    /// Returns a [`BackendError`] that the executor classifies as transient,
    /// permanent, or skip.
    async fn submit(&self, query: &str) -> Result<Vec<RawHit>, BackendError>;
}
