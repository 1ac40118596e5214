//! Document store boundary

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// Per-identity key-value document service
///
/// One root document per user (`users/{uid}`) plus named sub-collections
/// of documents keyed by id. `merge = true` writes only the provided
/// fields and leaves the rest of the document untouched; `merge = false`
/// replaces the document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the root document, `None` when it has never been created
    async fn get_root(&self, uid: &str) -> Result<Option<Value>, StoreError>;

    /// Merge fields into the root document, creating it if absent
    async fn set_root_merge(&self, uid: &str, fields: Value) -> Result<(), StoreError>;

    /// Fetch every document of a sub-collection
    async fn get_collection(&self, uid: &str, collection: &str) -> Result<Vec<Value>, StoreError>;

    /// Write one document of a sub-collection
    async fn set_in_collection(
        &self,
        uid: &str,
        collection: &str,
        doc_id: &str,
        fields: Value,
        merge: bool,
    ) -> Result<(), StoreError>;

    /// Delete one document of a sub-collection (no error when absent)
    async fn delete_from_collection(
        &self,
        uid: &str,
        collection: &str,
        doc_id: &str,
    ) -> Result<(), StoreError>;
}
