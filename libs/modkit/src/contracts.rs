use axum::Router;

/// A module that contributes HTTP routes and their OpenAPI description.
///
/// Pure wiring; must be sync. The ingress calls it once while building the router.
pub trait RestModule: Send + Sync {
    /// Stable module name, used in logs.
    fn name(&self) -> &'static str;

    /// Add the module's routes to `router`.
    fn register_rest(&self, router: Router) -> anyhow::Result<Router>;

    /// OpenAPI paths and schemas for the routes registered above.
    fn openapi(&self) -> utoipa::openapi::OpenApi;
}
