//! Storage backends

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{StoreError, StoreResult};

/// A record as it crosses the backend seam.
pub type RawRecord = serde_json::Value;

/// Atomic read-modify-write step applied under the backend's lock.
pub type MutateFn = Box<dyn FnOnce(Option<RawRecord>) -> StoreResult<RawRecord> + Send>;

/// Backing store for all entity kinds.
///
/// Every method is one atomic step: a record write and its index update
/// never become visible separately. `update` is serialized per kind, which
/// gives `mutate`/`patch` their per-id linearizability.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Read a record, `None` if absent.
    async fn read(&self, kind: &'static str, id: &str) -> StoreResult<Option<RawRecord>>;

    /// Insert a new record and append its id to the kind's index.
    /// Fails with `Conflict` if the id already exists.
    async fn insert(&self, kind: &'static str, id: &str, record: RawRecord) -> StoreResult<()>;

    /// Atomically read the current record (if any), apply `f`, and write the
    /// result back. A brand-new record is also appended to the index. If `f`
    /// fails, nothing is written.
    async fn update(&self, kind: &'static str, id: &str, f: MutateFn) -> StoreResult<RawRecord>;

    /// Remove a record and its index entry. Idempotent.
    async fn remove(&self, kind: &'static str, id: &str) -> StoreResult<()>;

    /// Snapshot of the kind's index, in insertion order.
    async fn ids(&self, kind: &'static str) -> StoreResult<Vec<String>>;
}

#[derive(Default)]
struct KindTable {
    records: HashMap<String, RawRecord>,
    // Insertion-ordered index; always mirrors `records` exactly.
    order: Vec<String>,
}

/// In-memory backend: one table per kind behind a single lock.
///
/// The lock is held across each whole operation, so the index and the record
/// map can never disagree and read-modify-write steps are serialized.
#[derive(Default)]
pub struct MemoryBackend {
    tables: RwLock<HashMap<&'static str, KindTable>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn read(&self, kind: &'static str, id: &str) -> StoreResult<Option<RawRecord>> {
        let tables = self.tables.read();
        Ok(tables
            .get(kind)
            .and_then(|table| table.records.get(id))
            .cloned())
    }

    async fn insert(&self, kind: &'static str, id: &str, record: RawRecord) -> StoreResult<()> {
        let mut tables = self.tables.write();
        let table = tables.entry(kind).or_default();
        if table.records.contains_key(id) {
            return Err(StoreError::Conflict {
                kind,
                id: id.to_string(),
            });
        }
        table.records.insert(id.to_string(), record);
        table.order.push(id.to_string());
        Ok(())
    }

    async fn update(&self, kind: &'static str, id: &str, f: MutateFn) -> StoreResult<RawRecord> {
        let mut tables = self.tables.write();
        let table = tables.entry(kind).or_default();
        let current = table.records.get(id).cloned();
        let existed = current.is_some();
        let next = f(current)?;
        table.records.insert(id.to_string(), next.clone());
        if !existed {
            table.order.push(id.to_string());
        }
        Ok(next)
    }

    async fn remove(&self, kind: &'static str, id: &str) -> StoreResult<()> {
        let mut tables = self.tables.write();
        if let Some(table) = tables.get_mut(kind) {
            if table.records.remove(id).is_some() {
                table.order.retain(|entry| entry != id);
            }
        }
        Ok(())
    }

    async fn ids(&self, kind: &'static str) -> StoreResult<Vec<String>> {
        let tables = self.tables.read();
        Ok(tables
            .get(kind)
            .map(|table| table.order.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_then_read() {
        let backend = MemoryBackend::new();
        backend
            .insert("widget", "w1", json!({"id": "w1", "size": 3}))
            .await
            .unwrap();

        let read = backend.read("widget", "w1").await.unwrap();
        assert_eq!(read, Some(json!({"id": "w1", "size": 3})));
    }

    #[tokio::test]
    async fn insert_duplicate_conflicts() {
        let backend = MemoryBackend::new();
        backend.insert("widget", "w1", json!({})).await.unwrap();

        let err = backend.insert("widget", "w1", json!({})).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn remove_keeps_index_consistent() {
        let backend = MemoryBackend::new();
        backend.insert("widget", "w1", json!({})).await.unwrap();
        backend.insert("widget", "w2", json!({})).await.unwrap();

        backend.remove("widget", "w1").await.unwrap();

        assert_eq!(backend.read("widget", "w1").await.unwrap(), None);
        assert_eq!(backend.ids("widget").await.unwrap(), vec!["w2"]);

        // Idempotent: removing again is not an error.
        backend.remove("widget", "w1").await.unwrap();
    }

    #[tokio::test]
    async fn failed_update_writes_nothing() {
        let backend = MemoryBackend::new();
        backend
            .insert("widget", "w1", json!({"v": 1}))
            .await
            .unwrap();

        let result = backend
            .update(
                "widget",
                "w1",
                Box::new(|_| Err(StoreError::Io("disk gone".into()))),
            )
            .await;
        assert!(result.is_err());

        // Record and index untouched.
        assert_eq!(
            backend.read("widget", "w1").await.unwrap(),
            Some(json!({"v": 1}))
        );
        assert_eq!(backend.ids("widget").await.unwrap(), vec!["w1"]);
    }

    #[tokio::test]
    async fn update_of_absent_id_indexes_it() {
        let backend = MemoryBackend::new();
        backend
            .update("widget", "w9", Box::new(|_| Ok(json!({"v": 0}))))
            .await
            .unwrap();

        assert_eq!(backend.ids("widget").await.unwrap(), vec!["w9"]);
    }

    #[tokio::test]
    async fn ids_keep_insertion_order() {
        let backend = MemoryBackend::new();
        for id in ["c", "a", "b"] {
            backend.insert("widget", id, json!({})).await.unwrap();
        }
        assert_eq!(backend.ids("widget").await.unwrap(), vec!["c", "a", "b"]);
    }
}
