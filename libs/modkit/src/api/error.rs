use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::message::Message;

/// Failure outcome of a request, rendered as `{message}` with the matching status.
///
/// The message text reaches the client verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m) | ApiError::Unauthorized(m) | ApiError::NotFound(m) => m,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), error = %self, "request failed");

        let body = match self {
            ApiError::BadRequest(m) | ApiError::Unauthorized(m) | ApiError::NotFound(m) => {
                Message::new(m)
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn renders_status_and_message_body() {
        for (err, status) in [
            (ApiError::bad_request("Not valid ID"), StatusCode::BAD_REQUEST),
            (
                ApiError::unauthorized("You are not authorized"),
                StatusCode::UNAUTHORIZED,
            ),
            (ApiError::not_found("Page not found"), StatusCode::NOT_FOUND),
        ] {
            let expected = err.message().to_string();
            let resp = err.into_response();
            assert_eq!(resp.status(), status);

            let ct = resp
                .headers()
                .get(axum::http::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");
            assert_eq!(ct, "application/json");

            let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
                .await
                .unwrap();
            let body: Message = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body.message, expected);
        }
    }

    #[test]
    fn display_is_the_bare_message() {
        assert_eq!(
            ApiError::bad_request("Title is required").to_string(),
            "Title is required"
        );
    }
}
