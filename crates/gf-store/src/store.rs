//! Typed store - one view per entity kind

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;

use crate::backend::Backend;
use crate::entity::Entity;
use crate::error::{StoreError, StoreResult};

/// One page of a listing.
///
/// `next` is an extension point for cursor pagination; at this system's
/// scale every listing returns all items with `next = None`.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Records in insertion order.
    pub items: Vec<T>,
    /// Opaque cursor for the next page, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Typed view of one entity kind over a shared backend.
pub struct EntityStore<T: Entity> {
    backend: Arc<dyn Backend>,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for EntityStore<T> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            _kind: PhantomData,
        }
    }
}

impl<T: Entity> EntityStore<T> {
    /// Create the typed view for `T::KIND`.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            _kind: PhantomData,
        }
    }

    /// Fetch a record; `NotFound` if absent.
    pub async fn get(&self, id: &str) -> StoreResult<T> {
        match self.backend.read(T::KIND, id).await? {
            Some(raw) => Ok(serde_json::from_value(raw)?),
            None => Err(StoreError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            }),
        }
    }

    /// Fetch a record, `None` if absent.
    pub async fn find(&self, id: &str) -> StoreResult<Option<T>> {
        match self.backend.read(T::KIND, id).await? {
            Some(raw) => Ok(Some(serde_json::from_value(raw)?)),
            None => Ok(None),
        }
    }

    /// Insert a record. An empty id is replaced with a freshly generated
    /// one; an existing id fails with `Conflict`. Returns the stored record.
    pub async fn create(&self, mut record: T) -> StoreResult<T> {
        if record.id().is_empty() {
            record.set_id(T::generate_id());
        }
        let raw = serde_json::to_value(&record)?;
        self.backend.insert(T::KIND, record.id(), raw).await?;
        tracing::debug!(kind = T::KIND, id = record.id(), "record created");
        Ok(record)
    }

    /// Read current state (or the kind's initial-state template if absent),
    /// apply `f`, write the result. Linearizable per id: the whole step runs
    /// under the backend's lock, so sequential callers never lose updates.
    pub async fn mutate<F>(&self, id: &str, f: F) -> StoreResult<T>
    where
        F: FnOnce(T) -> T + Send + 'static,
    {
        let template_id = id.to_string();
        let raw = self
            .backend
            .update(
                T::KIND,
                id,
                Box::new(move |current| {
                    let state: T = match current {
                        Some(raw) => serde_json::from_value(raw)?,
                        None => T::initial(&template_id),
                    };
                    Ok(serde_json::to_value(f(state))?)
                }),
            )
            .await?;
        Ok(serde_json::from_value(raw)?)
    }

    /// Shallow-merge `fields` into the current state. Convenience over
    /// `mutate` for partial updates; unknown fields are merged as-is at the
    /// JSON level.
    pub async fn patch(&self, id: &str, fields: serde_json::Value) -> StoreResult<T> {
        let template_id = id.to_string();
        let raw = self
            .backend
            .update(
                T::KIND,
                id,
                Box::new(move |current| {
                    let mut base = match current {
                        Some(raw) => raw,
                        None => serde_json::to_value(T::initial(&template_id))?,
                    };
                    if let (Some(object), Some(patch)) = (base.as_object_mut(), fields.as_object())
                    {
                        for (key, value) in patch {
                            object.insert(key.clone(), value.clone());
                        }
                    }
                    Ok(base)
                }),
            )
            .await?;
        Ok(serde_json::from_value(raw)?)
    }

    /// Remove a record and its index entry. Deleting an absent id is fine.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        self.backend.remove(T::KIND, id).await
    }

    /// List records in insertion order. The cursor is accepted for forward
    /// compatibility only.
    pub async fn list(&self, cursor: Option<&str>) -> StoreResult<Page<T>> {
        let _ = cursor;
        let ids = self.backend.ids(T::KIND).await?;
        let mut items = Vec::with_capacity(ids.len());
        for id in &ids {
            // A concurrent delete between the index snapshot and the read is
            // fine: the record simply drops out of the page.
            if let Some(raw) = self.backend.read(T::KIND, id).await? {
                items.push(serde_json::from_value(raw)?);
            }
        }
        Ok(Page { items, next: None })
    }

    /// Insert the kind's seed set, skipping ids that already exist.
    /// Returns how many records were actually inserted.
    pub async fn seed(&self) -> StoreResult<usize> {
        let mut inserted = 0;
        for record in T::seed() {
            let raw = serde_json::to_value(&record)?;
            match self.backend.insert(T::KIND, record.id(), raw).await {
                Ok(()) => inserted += 1,
                Err(err) if err.is_conflict() => {}
                Err(err) => return Err(err),
            }
        }
        if inserted > 0 {
            tracing::info!(kind = T::KIND, inserted, "seeded");
        }
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Widget {
        id: String,
        label: String,
        count: u32,
    }

    impl Entity for Widget {
        const KIND: &'static str = "widget";

        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: String) {
            self.id = id;
        }

        fn initial(id: &str) -> Self {
            Self {
                id: id.to_string(),
                label: String::new(),
                count: 0,
            }
        }

        fn seed() -> Vec<Self> {
            vec![
                Self {
                    id: "seed-1".into(),
                    label: "first".into(),
                    count: 1,
                },
                Self {
                    id: "seed-2".into(),
                    label: "second".into(),
                    count: 2,
                },
            ]
        }
    }

    fn store() -> EntityStore<Widget> {
        EntityStore::new(Arc::new(MemoryBackend::new()))
    }

    #[tokio::test]
    async fn create_get_round_trip() {
        let store = store();
        let widget = Widget {
            id: "w1".into(),
            label: "gear".into(),
            count: 7,
        };

        let stored = store.create(widget.clone()).await.unwrap();
        assert_eq!(stored, widget);
        assert_eq!(store.get("w1").await.unwrap(), widget);
    }

    #[tokio::test]
    async fn create_assigns_missing_id() {
        let store = store();
        let stored = store
            .create(Widget {
                id: String::new(),
                label: "anon".into(),
                count: 0,
            })
            .await
            .unwrap();

        assert!(!stored.id.is_empty());
        assert_eq!(store.get(&stored.id).await.unwrap().label, "anon");
    }

    #[tokio::test]
    async fn create_existing_id_conflicts() {
        let store = store();
        store.create(Widget::initial("w1")).await.unwrap();

        let err = store.create(Widget::initial("w1")).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn delete_removes_record_and_index_entry() {
        let store = store();
        store.create(Widget::initial("w1")).await.unwrap();
        store.delete("w1").await.unwrap();

        assert!(store.get("w1").await.unwrap_err().is_not_found());
        assert!(store.list(None).await.unwrap().items.is_empty());

        // Idempotent.
        store.delete("w1").await.unwrap();
    }

    #[tokio::test]
    async fn mutate_composes_for_sequential_callers() {
        let store = store();
        store.create(Widget::initial("w1")).await.unwrap();

        store
            .mutate("w1", |mut w| {
                w.count += 3;
                w
            })
            .await
            .unwrap();
        let after = store
            .mutate("w1", |mut w| {
                w.count *= 2;
                w
            })
            .await
            .unwrap();

        // Equivalent to one mutate with the composed function.
        assert_eq!(after.count, 6);
    }

    #[tokio::test]
    async fn mutate_of_absent_id_starts_from_template() {
        let store = store();
        let made = store
            .mutate("fresh", |mut w| {
                w.label = "from template".into();
                w
            })
            .await
            .unwrap();

        assert_eq!(made.id, "fresh");
        assert_eq!(made.label, "from template");
        assert_eq!(store.list(None).await.unwrap().items.len(), 1);
    }

    #[tokio::test]
    async fn patch_shallow_merges_fields() {
        let store = store();
        store
            .create(Widget {
                id: "w1".into(),
                label: "old".into(),
                count: 4,
            })
            .await
            .unwrap();

        let patched = store
            .patch("w1", json!({"label": "new"}))
            .await
            .unwrap();

        assert_eq!(patched.label, "new");
        assert_eq!(patched.count, 4);
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = store();
        for id in ["c", "a", "b"] {
            store.create(Widget::initial(id)).await.unwrap();
        }

        let page = store.list(None).await.unwrap();
        let ids: Vec<&str> = page.items.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert!(page.next.is_none());
    }

    #[tokio::test]
    async fn seeding_twice_never_duplicates() {
        let store = store();
        assert_eq!(store.seed().await.unwrap(), 2);
        assert_eq!(store.seed().await.unwrap(), 0);
        assert_eq!(store.list(None).await.unwrap().items.len(), 2);
    }

    #[tokio::test]
    async fn seeding_fills_gaps_by_id() {
        let store = store();
        store.seed().await.unwrap();
        store.delete("seed-1").await.unwrap();

        assert_eq!(store.seed().await.unwrap(), 1);
        assert_eq!(store.list(None).await.unwrap().items.len(), 2);
    }
}
