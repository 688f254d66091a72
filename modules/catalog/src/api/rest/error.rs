use modkit::ApiError;

use crate::domain::error::DomainError;

/// Map a domain error to the `{message}` response the client sees.
pub fn map_domain_error(e: &DomainError) -> ApiError {
    match e {
        e if e.is_not_found() => ApiError::not_found(e.to_string()),
        DomainError::Store { message } => {
            tracing::error!(error = %message, "document store operation failed");
            ApiError::bad_request(message.clone())
        }
        e => ApiError::bad_request(e.to_string()),
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        map_domain_error(&e)
    }
}
