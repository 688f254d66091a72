//! HTTP front door: base routes, module routes, API docs, catch-all and the
//! middleware stack, plus the server loop.

use std::{future::Future, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{
    http::header,
    middleware::from_fn,
    response::IntoResponse,
    routing::get,
    Extension, Router,
};
use modkit::RestModule;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod openapi;
pub mod request_id;
pub mod web;

pub use config::{ApiIngressConfig, AuthConfig};

/// Collects [`RestModule`]s and turns them into one served router.
pub struct ApiIngress {
    config: ApiIngressConfig,
    request_timeout: Option<Duration>,
    modules: Vec<Arc<dyn RestModule>>,
}

impl ApiIngress {
    /// `request_timeout` of `None` disables the timeout layer.
    pub fn new(config: ApiIngressConfig, request_timeout: Option<Duration>) -> Self {
        Self {
            config,
            request_timeout,
            modules: Vec::new(),
        }
    }

    pub fn with_module(mut self, module: Arc<dyn RestModule>) -> Self {
        self.modules.push(module);
        self
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    pub fn build_openapi(&self) -> utoipa::openapi::OpenApi {
        openapi::build_openapi(&self.modules)
    }

    /// Base routes, then modules in registration order, then docs and the catch-all.
    pub fn build_router(&self) -> Result<Router> {
        tracing::debug!("Building router");
        let auth = Arc::new(self.config.auth.clone());
        let mut router = Router::new()
            .route("/", get(web::home))
            .route("/health-check", get(web::health_check))
            .route(
                "/auth",
                get(web::auth_status)
                    .post(web::login)
                    .layer(Extension(auth)),
            );

        for module in &self.modules {
            router = module
                .register_rest(router)
                .with_context(|| format!("module '{}' failed to register routes", module.name()))?;
            tracing::debug!(module = module.name(), "REST routes registered");
        }

        if self.config.enable_docs {
            // Build once, serve as static JSON
            let openapi_value = Arc::new(
                serde_json::to_value(self.build_openapi()).context("serialize OpenAPI document")?,
            );
            router = router
                .route(
                    "/openapi.json",
                    get({
                        let v = openapi_value.clone();
                        move || async move {
                            let json = axum::Json((*v).clone());
                            ([(header::CACHE_CONTROL, "no-store")], json).into_response()
                        }
                    }),
                )
                .route("/swagger", get(web::serve_swagger));
        }

        // Must come after every route so it covers all method routers.
        router = router
            .method_not_allowed_fallback(web::not_found)
            .fallback(web::not_found);

        // Layers wrap outward: the last one added sees the request first.
        // Request order: SetRequestId -> PropagateRequestId -> Trace -> extensions -> JSON errors -> Timeout -> CORS -> BodyLimit
        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));
        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }
        if let Some(timeout) = self.request_timeout {
            router = router.layer(TimeoutLayer::new(timeout));
        }

        let x_request_id = request_id::header();
        router = router
            .layer(from_fn(web::json_error_body))
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(request_id::create_trace_layer())
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        Ok(router)
    }

    /// Serve on `listener` until `shutdown` resolves, then drain in-flight requests.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router()?;
        let addr = listener.local_addr()?;
        tracing::info!(%addr, "HTTP server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("HTTP server shutting down gracefully");
            })
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
