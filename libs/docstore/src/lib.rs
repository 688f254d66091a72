//! Document store client.
//!
//! A thin, collection-oriented layer over a document database. Records are
//! BSON documents keyed by a store-generated `_id` (an ObjectId). Callers get
//! "document or absent" semantics on lookups and typed [`StoreError`]s on
//! failure.
//!
//! # Engines
//! - `memory://`: [`InMemoryStore`], process-local, used by `--mock` and tests
//! - `mongodb://`, `mongodb+srv://`: `MongoStore` (feature `mongodb`, on by default)
//!
//! # Example
//! ```rust,no_run
//! # async fn demo() -> docstore::StoreResult<()> {
//! use docstore::{bson::doc, Filter, StoreBackend, StoreConfig, StoreHandle};
//!
//! let store = StoreHandle::connect(&StoreConfig::new("memory://", "catalog")).await?;
//! let id = store.backend().insert_one("genres", doc! { "name": "comedy" }).await?;
//! let found = store.backend().find_one("genres", &Filter::eq("name", "comedy")).await?;
//! assert_eq!(found.and_then(|d| d.get_object_id("_id").ok()), Some(id));
//! store.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod error;
pub mod filter;
pub mod handle;
pub mod id;
pub mod memory;
#[cfg(feature = "mongodb")]
pub mod mongo;

pub use bson;

pub use backend::StoreBackend;
pub use error::{StoreError, StoreResult};
pub use filter::Filter;
pub use handle::{redact_credentials_in_url, StoreConfig, StoreEngine, StoreHandle};
pub use id::{parse_object_id, InvalidObjectId, ObjectId};
pub use memory::InMemoryStore;
#[cfg(feature = "mongodb")]
pub use mongo::MongoStore;
