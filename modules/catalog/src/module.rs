use std::sync::Arc;

use axum::Router;
use docstore::{StoreBackend, StoreHandle};
use modkit::RestModule;
use utoipa::OpenApi;

use crate::api::rest::{openapi::CatalogApi, routes};
use crate::config::CatalogConfig;
use crate::domain::service::Service;
use crate::infra::storage::{DocstoreGenresRepository, DocstoreMoviesRepository};

/// Movies and genres over a document store.
#[derive(Clone)]
pub struct CatalogModule {
    service: Arc<Service>,
}

impl CatalogModule {
    pub fn new(store: Arc<dyn StoreBackend>, cfg: &CatalogConfig) -> Self {
        let movies = Arc::new(DocstoreMoviesRepository::new(
            store.clone(),
            cfg.movies_collection.clone(),
        ));
        let genres = Arc::new(DocstoreGenresRepository::new(
            store,
            cfg.genres_collection.clone(),
        ));
        tracing::debug!(
            movies = %cfg.movies_collection,
            genres = %cfg.genres_collection,
            "catalog module wired"
        );
        Self {
            service: Arc::new(Service::new(movies, genres)),
        }
    }

    pub fn from_handle(store: &StoreHandle, cfg: &CatalogConfig) -> Self {
        Self::new(store.backend(), cfg)
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }
}

impl RestModule for CatalogModule {
    fn name(&self) -> &'static str {
        "catalog"
    }

    fn register_rest(&self, router: Router) -> anyhow::Result<Router> {
        routes::register_routes(router, self.service.clone())
    }

    fn openapi(&self) -> utoipa::openapi::OpenApi {
        CatalogApi::openapi()
    }
}
