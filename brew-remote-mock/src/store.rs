//! In-memory document store

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde_json::Value;
use shared::StoreError;
use shared::remote::DocumentStore;

#[derive(Default)]
struct UserSpace {
    root: Option<Value>,
    collections: BTreeMap<String, BTreeMap<String, Value>>,
}

/// Per-user document tree keyed by uid, with field-merge write
/// semantics. Failure injection flips individual operations to
/// `StoreError::Unavailable` so sync error paths can be exercised.
#[derive(Default)]
pub struct MockDocumentStore {
    users: DashMap<String, UserSpace>,
    fail_root: AtomicBool,
    failing_collections: Mutex<BTreeSet<String>>,
}

/// Merge `patch` into `target`: object fields merge recursively,
/// anything else replaces
fn merge_value(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(&key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}

impl MockDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every root read/write fails while set
    pub fn fail_root(&self, fail: bool) {
        self.fail_root.store(fail, Ordering::SeqCst);
    }

    /// Every operation on `collection` fails until cleared via
    /// [`MockDocumentStore::clear_failures`]
    pub fn fail_collection(&self, collection: &str) {
        self.failing_collections
            .lock()
            .insert(collection.to_string());
    }

    pub fn clear_failures(&self) {
        self.fail_root.store(false, Ordering::SeqCst);
        self.failing_collections.lock().clear();
    }

    /// Direct root read for assertions
    pub fn root(&self, uid: &str) -> Option<Value> {
        self.users.get(uid).and_then(|space| space.root.clone())
    }

    /// Direct collection read for assertions, in document-id order
    pub fn collection_docs(&self, uid: &str, collection: &str) -> Vec<Value> {
        self.users
            .get(uid)
            .and_then(|space| {
                space
                    .collections
                    .get(collection)
                    .map(|docs| docs.values().cloned().collect())
            })
            .unwrap_or_default()
    }

    fn check_root(&self) -> Result<(), StoreError> {
        if self.fail_root.load(Ordering::SeqCst) {
            tracing::debug!("injected root failure");
            return Err(StoreError::Unavailable("injected failure".to_string()));
        }
        Ok(())
    }

    fn check_collection(&self, collection: &str) -> Result<(), StoreError> {
        if self.failing_collections.lock().contains(collection) {
            tracing::debug!(collection, "injected collection failure");
            return Err(StoreError::Unavailable("injected failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn get_root(&self, uid: &str) -> Result<Option<Value>, StoreError> {
        self.check_root()?;
        Ok(self.root(uid))
    }

    async fn set_root_merge(&self, uid: &str, fields: Value) -> Result<(), StoreError> {
        self.check_root()?;
        let mut space = self.users.entry(uid.to_string()).or_default();
        match &mut space.root {
            Some(root) => merge_value(root, fields),
            None => space.root = Some(fields),
        }
        Ok(())
    }

    async fn get_collection(&self, uid: &str, collection: &str) -> Result<Vec<Value>, StoreError> {
        self.check_collection(collection)?;
        Ok(self.collection_docs(uid, collection))
    }

    async fn set_in_collection(
        &self,
        uid: &str,
        collection: &str,
        doc_id: &str,
        fields: Value,
        merge: bool,
    ) -> Result<(), StoreError> {
        self.check_collection(collection)?;
        let mut space = self.users.entry(uid.to_string()).or_default();
        let docs = space.collections.entry(collection.to_string()).or_default();
        match docs.get_mut(doc_id) {
            Some(existing) if merge => merge_value(existing, fields),
            _ => {
                docs.insert(doc_id.to_string(), fields);
            }
        }
        Ok(())
    }

    async fn delete_from_collection(
        &self,
        uid: &str,
        collection: &str,
        doc_id: &str,
    ) -> Result<(), StoreError> {
        self.check_collection(collection)?;
        if let Some(mut space) = self.users.get_mut(uid) {
            if let Some(docs) = space.collections.get_mut(collection) {
                docs.remove(doc_id);
            }
        }
        Ok(())
    }
}
