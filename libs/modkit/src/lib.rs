//! # ModKit - shared HTTP kit for catalog modules
//!
//! - [`api`]: the `{message}` body, [`ApiError`] and the JSON body and path extractors
//! - [`contracts`]: [`RestModule`], implemented by every module that serves routes
//! - [`runtime`]: process signals
//!
//! ## Example
//!
//! ```rust,ignore
//! use modkit::{ApiError, JsonBody, Message};
//!
//! async fn rename(JsonBody(req): JsonBody<RenameReq>) -> Result<Json<Message>, ApiError> {
//!     let name = req.name.trim();
//!     if name.is_empty() {
//!         return Err(ApiError::bad_request("Not valid name"));
//!     }
//!     Ok(Json(Message::new(format!("renamed to {name}"))))
//! }
//! ```

pub use anyhow::Result;

pub mod api;
pub mod contracts;
pub mod runtime;

pub use api::{ApiError, ApiResult, Created, JsonBody, Message, PathParam};
pub use contracts::RestModule;
