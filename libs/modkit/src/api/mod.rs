//! Request/response building blocks shared by REST modules.
//!
//! Every non-record response is a [`Message`]; failures go through [`ApiError`].

pub mod error;
pub mod extract;
pub mod message;

pub use error::{ApiError, ApiResult};
pub use extract::{JsonBody, PathParam};
pub use message::{Created, Message};
