//! Typed access to one collection.

use crate::document::{Document, DocumentStore};
use crate::error::{Result, StoreError};
use bench_core::RecordId;
use std::marker::PhantomData;
use std::sync::Arc;

/// Serde-converting view of the collection that holds `T`.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> Repository<T> {
    /// Wrap a store.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Insert or replace a record under its own id.
    pub async fn save(&self, record: &T) -> Result<()> {
        let value =
            serde_json::to_value(record).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.put(T::COLLECTION, record.record_id(), &value).await
    }

    /// Fetch a record, `None` if absent.
    pub async fn get(&self, id: &RecordId) -> Result<Option<T>> {
        self.store
            .get(T::COLLECTION, id)
            .await?
            .map(decode)
            .transpose()
    }

    /// Fetch a record that must exist.
    pub async fn require(&self, id: &RecordId) -> Result<T> {
        self.get(id).await?.ok_or_else(|| StoreError::NotFound {
            collection: T::COLLECTION.to_string(),
            id: id.to_string(),
        })
    }

    /// Remove a record. Returns whether it existed.
    pub async fn delete(&self, id: &RecordId) -> Result<bool> {
        self.store.delete(T::COLLECTION, id).await
    }

    /// All records in insertion order.
    pub async fn list(&self) -> Result<Vec<T>> {
        self.store
            .list(T::COLLECTION)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }
}

fn decode<T: Document>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        StoreError::Serialization(format!("invalid {} document: {e}", T::COLLECTION))
    })
}
