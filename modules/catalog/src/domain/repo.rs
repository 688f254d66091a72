use async_trait::async_trait;
use docstore::{ObjectId, StoreResult};

use crate::contract::model::{Genre, Movie, MoviePatch, NewMovie};

/// Persistence the domain needs for movies.
/// Each method is exactly one store operation.
#[async_trait]
pub trait MoviesRepository: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Movie>>;
    /// Movies whose `genre` list contains `genre`.
    async fn list_by_genre(&self, genre: &str) -> StoreResult<Vec<Movie>>;
    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<Movie>>;
    async fn insert(&self, movie: NewMovie) -> StoreResult<ObjectId>;
    /// Returns `None` when no movie has that id.
    async fn update(&self, id: ObjectId, patch: MoviePatch) -> StoreResult<Option<Movie>>;
    /// Returns true if a movie was removed.
    async fn delete(&self, id: ObjectId) -> StoreResult<bool>;
    async fn delete_all(&self) -> StoreResult<u64>;
}

/// Persistence the domain needs for genres.
#[async_trait]
pub trait GenresRepository: Send + Sync {
    async fn list(&self) -> StoreResult<Vec<Genre>>;
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Genre>>;
    async fn insert(&self, name: &str) -> StoreResult<ObjectId>;
    async fn rename(&self, id: ObjectId, name: &str) -> StoreResult<Option<Genre>>;
    async fn delete(&self, id: ObjectId) -> StoreResult<bool>;
    async fn delete_all(&self) -> StoreResult<u64>;
}
