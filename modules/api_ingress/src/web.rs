use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Request},
    http::{header, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    Extension, Json,
};
use modkit::{ApiError, ApiResult, Message};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::config::AuthConfig;

/// Greeting
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    operation_id = "home",
    responses((status = 200, description = "Greeting", body = String,
        content_type = "text/plain", example = json!("Hello world! =)")))
)]
pub async fn home() -> &'static str {
    "Hello world! =)"
}

/// Health check
#[utoipa::path(
    get,
    path = "/health-check",
    tag = "Health",
    operation_id = "health_check",
    responses((status = 200, description = "Server is up", body = Message,
        example = json!({"message": "Server is running"})))
)]
pub async fn health_check() -> Json<Message> {
    Json(Message::new("Server is running"))
}

/// Credentials for `POST /auth`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[schema(example = json!({"username": "John", "password": "qwerty"}))]
pub struct AuthReq {
    pub username: String,
    pub password: String,
}

/// Authorization status
#[utoipa::path(
    get,
    path = "/auth",
    tag = "Auth",
    operation_id = "auth_status",
    responses((status = 401, description = "Never authorized", body = Message,
        example = json!({"message": "You are not authorized"})))
)]
pub async fn auth_status() -> impl IntoResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(Message::new("You are not authorized")),
    )
}

/// Log in
#[utoipa::path(
    post,
    path = "/auth",
    tag = "Auth",
    operation_id = "login",
    request_body = AuthReq,
    responses(
        (status = 200, description = "Credentials match", body = Message,
            example = json!({"message": "You are authorized"})),
        (status = 401, description = "Unknown user or unreadable body", body = Message,
            example = json!({"message": "User not found"}))
    )
)]
pub async fn login(
    Extension(auth): Extension<Arc<AuthConfig>>,
    body: Result<Json<AuthReq>, JsonRejection>,
) -> ApiResult<Json<Message>> {
    match body {
        Ok(Json(req)) if req.username == auth.username && req.password == auth.password => {
            tracing::debug!(username = %req.username, "login accepted");
            Ok(Json(Message::new("You are authorized")))
        }
        _ => Err(ApiError::unauthorized("User not found")),
    }
}

/// Catch-all for unknown paths and unsupported methods.
pub async fn not_found() -> ApiError {
    ApiError::not_found("Page not found")
}

/// Re-renders error responses produced outside the handlers (body limit,
/// timeout) as `{message}` with the status reason as text.
pub async fn json_error_body(req: Request, next: Next) -> Response {
    let resp = next.run(req).await;
    let status = resp.status();
    let is_json = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));
    if is_json || !(status.is_client_error() || status.is_server_error()) {
        return resp;
    }

    let (parts, _) = resp.into_parts();
    let reason = status.canonical_reason().unwrap_or("Request failed");
    let mut replaced = (status, Json(Message::new(reason))).into_response();
    for (name, value) in &parts.headers {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            replaced.headers_mut().append(name.clone(), value.clone());
        }
    }
    replaced
}

pub async fn serve_swagger() -> Html<&'static str> {
    Html(
        r##"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8"/>
  <title>Movie Catalog API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-bundle.js"></script>
  <script>
    window.ui = SwaggerUIBundle({ url: "/openapi.json", dom_id: "#swagger-ui" });
  </script>
</body>
</html>"##,
    )
}
