use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::{
    options::{ClientOptions, ReturnDocument},
    Client, Collection,
};

use crate::{
    backend::StoreBackend,
    error::{StoreError, StoreResult},
    filter::Filter,
    handle::{StoreConfig, StoreEngine},
    id::ObjectId,
};

const APP_NAME: &str = "movie-catalog";

fn backend_err(e: mongodb::error::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// MongoDB backend on the official async driver.
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    database: String,
}

impl MongoStore {
    pub fn new(client: Client, database: impl Into<String>) -> Self {
        Self {
            client,
            database: database.into(),
        }
    }

    /// Build a client from the connection string and pool knobs.
    ///
    /// The driver connects lazily; call [`StoreBackend::ping`] to verify reachability.
    pub async fn connect(cfg: &StoreConfig) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(&cfg.url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        if let Some(timeout) = cfg.connect_timeout {
            options.connect_timeout = Some(timeout);
            options.server_selection_timeout = Some(timeout);
        }
        if let Some(size) = cfg.max_pool_size {
            options.max_pool_size = Some(size);
        }
        if options.app_name.is_none() {
            options.app_name = Some(APP_NAME.to_string());
        }

        let client =
            Client::with_options(options).map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self::new(client, cfg.database.clone()))
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.client.database(&self.database).collection(name)
    }
}

#[async_trait]
impl StoreBackend for MongoStore {
    fn engine(&self) -> StoreEngine {
        StoreEngine::MongoDb
    }

    async fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Document>> {
        self.collection(collection)
            .find(filter.to_document())
            .await
            .map_err(backend_err)?
            .try_collect()
            .await
            .map_err(backend_err)
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> StoreResult<Option<Document>> {
        self.collection(collection)
            .find_one(filter.to_document())
            .await
            .map_err(backend_err)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<ObjectId> {
        let result = self
            .collection(collection)
            .insert_one(document)
            .await
            .map_err(backend_err)?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Backend("inserted document has no ObjectId".to_string()))
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: ObjectId,
        set: Document,
    ) -> StoreResult<Option<Document>> {
        // the server rejects an empty `$set`
        if set.is_empty() {
            return self.find_by_id(collection, id).await;
        }

        self.collection(collection)
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(backend_err)
    }

    async fn delete_by_id(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> StoreResult<Option<Document>> {
        self.collection(collection)
            .find_one_and_delete(doc! { "_id": id })
            .await
            .map_err(backend_err)
    }

    async fn delete_many(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        let result = self
            .collection(collection)
            .delete_many(filter.to_document())
            .await
            .map_err(backend_err)?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| StoreError::Connection(e.to_string()))
    }

    async fn close(&self) -> StoreResult<()> {
        self.client.clone().shutdown().await;
        Ok(())
    }
}
