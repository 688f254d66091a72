use thiserror::Error;

/// Errors surfaced by the document store.
///
/// Display strings carry the underlying message as-is; callers relay them to clients.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unknown store URL: {0}")]
    UnknownDsn(String),

    #[error("Store engine '{0}' is not enabled in this build")]
    FeatureDisabled(&'static str),

    #[error("{0}")]
    Connection(String),

    #[error("{0}")]
    Backend(String),

    #[error("{0}")]
    Serialization(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<bson::error::Error> for StoreError {
    fn from(err: bson::error::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
