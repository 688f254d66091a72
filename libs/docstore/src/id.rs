pub use bson::oid::ObjectId;
use thiserror::Error;

/// A path or body value that is not a 24-character hexadecimal ObjectId.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{raw}' is not a valid object id")]
pub struct InvalidObjectId {
    pub raw: String,
}

/// Parse a record identifier without touching the store.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, InvalidObjectId> {
    ObjectId::parse_str(raw).map_err(|_| InvalidObjectId {
        raw: raw.to_string(),
    })
}
