use async_trait::async_trait;
use bson::Document;
use std::fmt::Debug;

use crate::{error::StoreResult, filter::Filter, handle::StoreEngine, id::ObjectId};

/// Storage backend behind a [`crate::StoreHandle`].
///
/// Object-safe and thread-safe so repositories can hold an `Arc<dyn StoreBackend>`.
/// Every operation is a single round-trip; nothing here is transactional.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    fn engine(&self) -> StoreEngine;

    /// All documents matching `filter`, in storage order.
    async fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Document>>;

    /// First document matching `filter`.
    async fn find_one(&self, collection: &str, filter: &Filter) -> StoreResult<Option<Document>>;

    async fn find_by_id(&self, collection: &str, id: ObjectId) -> StoreResult<Option<Document>> {
        self.find_one(collection, &Filter::eq("_id", id)).await
    }

    /// Insert a document; the store assigns `_id` unless one is present.
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<ObjectId>;

    /// Replace the listed fields of one document (`$set` semantics).
    ///
    /// Returns the document after the update, or `None` if no document has that id.
    async fn update_by_id(
        &self,
        collection: &str,
        id: ObjectId,
        set: Document,
    ) -> StoreResult<Option<Document>>;

    /// Remove one document, returning it if it existed.
    async fn delete_by_id(&self, collection: &str, id: ObjectId)
        -> StoreResult<Option<Document>>;

    /// Remove every matching document; returns how many were removed.
    async fn delete_many(&self, collection: &str, filter: &Filter) -> StoreResult<u64>;

    /// Round-trip to check the store is reachable.
    async fn ping(&self) -> StoreResult<()>;

    /// Release connections. The backend must not be used afterwards.
    async fn close(&self) -> StoreResult<()>;
}
