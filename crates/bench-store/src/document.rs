//! Collections and the document-store capability.

use crate::error::Result;
use async_trait::async_trait;
use bench_core::{ConsultantProfile, JobRequirement, RecordId, VendorRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Named group of documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Consultant profiles
    Consultants,
    /// Job requirements
    Jobs,
    /// Vendor records
    Vendors,
}

impl Collection {
    /// Name stored in the `collection` column.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Consultants => "consultants",
            Self::Jobs => "jobs",
            Self::Vendors => "vendors",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Put/get/delete/list of JSON documents addressed by `(collection, id)`.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or replace a document.
    async fn put(&self, collection: Collection, id: &RecordId, document: &Value) -> Result<()>;

    /// Fetch a document, `None` if absent.
    async fn get(&self, collection: Collection, id: &RecordId) -> Result<Option<Value>>;

    /// Remove a document. Returns whether it existed.
    async fn delete(&self, collection: Collection, id: &RecordId) -> Result<bool>;

    /// All documents in a collection, in insertion order.
    async fn list(&self, collection: Collection) -> Result<Vec<Value>>;
}

/// A record type stored in a fixed collection.
pub trait Document: Serialize + for<'de> Deserialize<'de> + Send + Sync {
    /// Collection holding this record type.
    const COLLECTION: Collection;

    /// Identifier of this record.
    fn record_id(&self) -> &RecordId;
}

impl Document for ConsultantProfile {
    const COLLECTION: Collection = Collection::Consultants;

    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

impl Document for JobRequirement {
    const COLLECTION: Collection = Collection::Jobs;

    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

impl Document for VendorRecord {
    const COLLECTION: Collection = Collection::Vendors;

    fn record_id(&self) -> &RecordId {
        &self.id
    }
}
