use async_trait::async_trait;
use bson::{Bson, Document};
use parking_lot::RwLock;
use std::{collections::HashMap, sync::Arc};

use crate::{
    backend::StoreBackend, error::StoreResult, filter::Filter, handle::StoreEngine, id::ObjectId,
};

type Collection = Vec<Document>;

/// Process-local backend.
///
/// Collections keep insertion order. Clones share the same data. The lock is
/// never held across an await point.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, Vec::len)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

fn has_id(document: &Document, id: &ObjectId) -> bool {
    matches!(document.get("_id"), Some(Bson::ObjectId(stored)) if stored == id)
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    fn engine(&self) -> StoreEngine {
        StoreEngine::Memory
    }

    async fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Document>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> StoreResult<Option<Document>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn find_by_id(&self, collection: &str, id: ObjectId) -> StoreResult<Option<Document>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| has_id(d, &id)).cloned()))
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> StoreResult<ObjectId> {
        let id = match document.get("_id") {
            Some(Bson::ObjectId(id)) => *id,
            _ => {
                let id = ObjectId::new();
                // `_id` leads the document like it does in the real store
                let mut with_id = Document::new();
                with_id.insert("_id", id);
                for (field, value) in document {
                    if field != "_id" {
                        with_id.insert(field, value);
                    }
                }
                document = with_id;
                id
            }
        };

        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(id)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: ObjectId,
        set: Document,
    ) -> StoreResult<Option<Document>> {
        let mut guard = self.collections.write();
        let Some(target) = guard
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| has_id(d, &id)))
        else {
            return Ok(None);
        };

        for (field, value) in set {
            if field != "_id" {
                target.insert(field, value);
            }
        }
        Ok(Some(target.clone()))
    }

    async fn delete_by_id(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> StoreResult<Option<Document>> {
        let mut guard = self.collections.write();
        let Some(docs) = guard.get_mut(collection) else {
            return Ok(None);
        };
        Ok(docs
            .iter()
            .position(|d| has_id(d, &id))
            .map(|idx| docs.remove(idx)))
    }

    async fn delete_many(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        let mut guard = self.collections.write();
        let Some(docs) = guard.get_mut(collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|d| !filter.matches(d));
        Ok((before - docs.len()) as u64)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}
