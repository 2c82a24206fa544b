//! Document store abstraction
//!
//! The system persists JSON documents in named collections with no
//! cross-document transactions. `DocumentStore` is the seam the
//! repositories are written against; `MemoryStore` is the in-process
//! implementation used by the server and the test harness.
//!
//! Version-carrying documents (engagements, inboxes) are written through
//! `update_if_version`, which compares the stored `version` field and
//! stores `expected + 1` atomically with respect to other store calls.

use std::collections::HashMap;

use async_trait::async_trait;
use core_kernel::{AdapterHealth, HealthCheckResult, HealthCheckable};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::StoreError;

/// Field map of a JSON document
pub type Fields = serde_json::Map<String, Value>;

/// Async document store over named collections
#[async_trait]
pub trait DocumentStore: HealthCheckable + Send + Sync {
    /// Retrieves one document
    async fn get(&self, collection: &str, id: &str) -> Result<Value, StoreError>;

    /// Lists documents matching an equality filter on top-level fields
    ///
    /// An empty filter matches the whole collection. Ordering is
    /// unspecified; callers sort.
    async fn list(&self, collection: &str, filter: &Fields) -> Result<Vec<Value>, StoreError>;

    /// Creates a document, failing `AlreadyExists` on an id collision
    async fn create(&self, collection: &str, id: &str, fields: Fields)
        -> Result<Value, StoreError>;

    /// Merges fields into an existing document
    async fn update(&self, collection: &str, id: &str, fields: Fields)
        -> Result<Value, StoreError>;

    /// Replaces a document only if its stored `version` matches
    ///
    /// On success the document is stored with `version = expected + 1`
    /// regardless of any `version` value in `fields`.
    async fn update_if_version(
        &self,
        collection: &str,
        id: &str,
        expected: u64,
        fields: Fields,
    ) -> Result<Value, StoreError>;
}

/// In-memory document store
///
/// A single `RwLock` over the collection map gives each call the same
/// atomicity a document database gives a single-document write, which is
/// exactly the consistency the repositories are allowed to assume.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn document_version(doc: &Value) -> Option<u64> {
    doc.get("version").and_then(Value::as_u64)
}

fn matches_filter(doc: &Value, filter: &Fields) -> bool {
    filter.iter().all(|(key, want)| doc.get(key) == Some(want))
}

#[async_trait]
impl HealthCheckable for MemoryStore {
    async fn health_check(&self) -> HealthCheckResult {
        let started = std::time::Instant::now();
        let collections = self.collections.read().await.len();
        HealthCheckResult {
            adapter_id: "memory-store".to_string(),
            status: AdapterHealth::Healthy,
            latency_ms: started.elapsed().as_millis() as u64,
            message: Some(format!("{collections} collections")),
            checked_at: chrono::Utc::now(),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Value, StoreError> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned()
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    async fn list(&self, collection: &str, filter: &Fields) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        let docs = match collections.get(collection) {
            Some(docs) => docs
                .values()
                .filter(|doc| matches_filter(doc, filter))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        Ok(docs)
    }

    async fn create(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<Value, StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.contains_key(id) {
            return Err(StoreError::already_exists(collection, id));
        }
        let doc = Value::Object(fields);
        docs.insert(id.to_string(), doc.clone());
        Ok(doc)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<Value, StoreError> {
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;

        let Value::Object(existing) = doc else {
            return Err(StoreError::Serialization(format!(
                "{}/{} is not an object",
                collection, id
            )));
        };
        for (key, value) in fields {
            existing.insert(key, value);
        }
        Ok(doc.clone())
    }

    async fn update_if_version(
        &self,
        collection: &str,
        id: &str,
        expected: u64,
        mut fields: Fields,
    ) -> Result<Value, StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        let doc = docs
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(collection, id))?;

        let stored = document_version(doc).ok_or_else(|| StoreError::NotVersioned {
            collection: collection.to_string(),
            id: id.to_string(),
        })?;
        if stored != expected {
            return Err(StoreError::VersionConflict {
                collection: collection.to_string(),
                id: id.to_string(),
                expected,
                stored,
            });
        }

        fields.insert("version".to_string(), Value::from(expected + 1));
        *doc = Value::Object(fields);
        Ok(doc.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn test_create_get_roundtrip() {
        let store = MemoryStore::new();
        store
            .create("cases", "c1", fields(json!({"title": "Lease dispute"})))
            .await
            .unwrap();

        let doc = store.get("cases", "c1").await.unwrap();
        assert_eq!(doc["title"], "Lease dispute");
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let store = MemoryStore::new();
        store
            .create("cases", "c1", fields(json!({})))
            .await
            .unwrap();
        let result = store.create("cases", "c1", fields(json!({}))).await;
        assert!(matches!(result, Err(StoreError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = MemoryStore::new();
        let result = store.get("cases", "nope").await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_filters_on_equality() {
        let store = MemoryStore::new();
        store
            .create("events", "e1", fields(json!({"case_id": "a", "n": 1})))
            .await
            .unwrap();
        store
            .create("events", "e2", fields(json!({"case_id": "b", "n": 2})))
            .await
            .unwrap();
        store
            .create("events", "e3", fields(json!({"case_id": "a", "n": 3})))
            .await
            .unwrap();

        let filter = fields(json!({"case_id": "a"}));
        let docs = store.list("events", &filter).await.unwrap();
        assert_eq!(docs.len(), 2);

        let all = store.list("events", &Fields::new()).await.unwrap();
        assert_eq!(all.len(), 3);

        let none = store.list("absent", &Fields::new()).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryStore::new();
        store
            .create("cases", "c1", fields(json!({"title": "A", "status": "pending"})))
            .await
            .unwrap();

        let doc = store
            .update("cases", "c1", fields(json!({"status": "in_progress"})))
            .await
            .unwrap();
        assert_eq!(doc["title"], "A");
        assert_eq!(doc["status"], "in_progress");
    }

    #[tokio::test]
    async fn test_update_if_version_bumps_and_conflicts() {
        let store = MemoryStore::new();
        store
            .create("inboxes", "u1", fields(json!({"version": 0, "unread": 0})))
            .await
            .unwrap();

        let doc = store
            .update_if_version("inboxes", "u1", 0, fields(json!({"unread": 1})))
            .await
            .unwrap();
        assert_eq!(doc["version"], 1);
        assert_eq!(doc["unread"], 1);

        // A writer with the stale version loses
        let result = store
            .update_if_version("inboxes", "u1", 0, fields(json!({"unread": 9})))
            .await;
        assert!(matches!(
            result,
            Err(StoreError::VersionConflict {
                expected: 0,
                stored: 1,
                ..
            })
        ));
        assert_eq!(store.get("inboxes", "u1").await.unwrap()["unread"], 1);
    }

    #[tokio::test]
    async fn test_update_if_version_requires_versioned_document() {
        let store = MemoryStore::new();
        store
            .create("cases", "c1", fields(json!({"title": "A"})))
            .await
            .unwrap();
        let result = store
            .update_if_version("cases", "c1", 0, fields(json!({})))
            .await;
        assert!(matches!(result, Err(StoreError::NotVersioned { .. })));
    }

    #[tokio::test]
    async fn test_concurrent_cas_admits_exactly_one_writer() {
        use std::sync::Arc;

        let store = Arc::new(MemoryStore::new());
        store
            .create("inboxes", "u1", fields(json!({"version": 0})))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for n in 0..8u64 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .update_if_version("inboxes", "u1", 0, fields(json!({"winner": n})))
                    .await
            }));
        }

        let mut wins = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
        assert_eq!(store.get("inboxes", "u1").await.unwrap()["version"], 1);
    }
}
