use std::sync::Arc;

use modkit::{Message, RestModule};
use utoipa::OpenApi;

use crate::web::{self, AuthReq};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movie Catalog API",
        version = "1.0.0",
        description = "CRUD over movies and genres"
    ),
    paths(web::home, web::health_check, web::auth_status, web::login),
    components(schemas(Message, AuthReq)),
    tags(
        (name = "Health", description = "Greeting and liveness"),
        (name = "Auth", description = "Authorization stub")
    )
)]
struct BaseApi;

/// Base document plus every module's paths and schemas.
pub fn build_openapi(modules: &[Arc<dyn RestModule>]) -> utoipa::openapi::OpenApi {
    let mut doc = BaseApi::openapi();
    for module in modules {
        doc.merge(module.openapi());
    }
    doc
}
