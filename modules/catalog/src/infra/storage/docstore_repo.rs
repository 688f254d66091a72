//! Document-store adapters for the repository ports.
//!
//! Records are mapped field by field so the stored layout stays stable:
//! movies as `{_id, title, description, releaseDate, genre}` and genres as
//! `{_id, name}`.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use docstore::bson::{doc, Bson, DateTime as BsonDateTime, Document};
use docstore::{Filter, ObjectId, StoreBackend, StoreError, StoreResult};

use crate::contract::model::{Genre, Movie, MoviePatch, NewMovie};
use crate::domain::repo::{GenresRepository, MoviesRepository};

fn malformed(collection: &str, e: impl fmt::Display) -> StoreError {
    StoreError::Serialization(format!("malformed {collection} document: {e}"))
}

pub(crate) fn movie_from_document(collection: &str, d: &Document) -> StoreResult<Movie> {
    let genre = d
        .get_array("genre")
        .map_err(|e| malformed(collection, e))?
        .iter()
        .map(|v| match v {
            Bson::String(s) => Ok(s.clone()),
            other => Err(malformed(collection, format!("non-string genre {other}"))),
        })
        .collect::<StoreResult<Vec<_>>>()?;

    Ok(Movie {
        id: d.get_object_id("_id").map_err(|e| malformed(collection, e))?,
        title: d
            .get_str("title")
            .map_err(|e| malformed(collection, e))?
            .to_string(),
        description: d
            .get_str("description")
            .map_err(|e| malformed(collection, e))?
            .to_string(),
        release_date: d
            .get_datetime("releaseDate")
            .map_err(|e| malformed(collection, e))?
            .to_chrono(),
        genre,
    })
}

pub(crate) fn movie_to_document(movie: NewMovie) -> Document {
    doc! {
        "title": movie.title,
        "description": movie.description,
        "releaseDate": BsonDateTime::from_chrono(movie.release_date),
        "genre": movie.genre,
    }
}

pub(crate) fn patch_to_document(patch: MoviePatch) -> Document {
    let mut set = Document::new();
    if let Some(title) = patch.title {
        set.insert("title", title);
    }
    if let Some(description) = patch.description {
        set.insert("description", description);
    }
    if let Some(date) = patch.release_date {
        set.insert("releaseDate", BsonDateTime::from_chrono(date));
    }
    if let Some(genre) = patch.genre {
        set.insert("genre", genre);
    }
    set
}

pub(crate) fn genre_from_document(collection: &str, d: &Document) -> StoreResult<Genre> {
    Ok(Genre {
        id: d.get_object_id("_id").map_err(|e| malformed(collection, e))?,
        name: d
            .get_str("name")
            .map_err(|e| malformed(collection, e))?
            .to_string(),
    })
}

/// Movies stored as documents in one collection.
#[derive(Debug, Clone)]
pub struct DocstoreMoviesRepository {
    store: Arc<dyn StoreBackend>,
    collection: String,
}

impl DocstoreMoviesRepository {
    pub fn new(store: Arc<dyn StoreBackend>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    fn map_all(&self, docs: Vec<Document>) -> StoreResult<Vec<Movie>> {
        docs.iter()
            .map(|d| movie_from_document(&self.collection, d))
            .collect()
    }
}

#[async_trait]
impl MoviesRepository for DocstoreMoviesRepository {
    async fn list(&self) -> StoreResult<Vec<Movie>> {
        let docs = self.store.find(&self.collection, &Filter::all()).await?;
        self.map_all(docs)
    }

    async fn list_by_genre(&self, genre: &str) -> StoreResult<Vec<Movie>> {
        let docs = self
            .store
            .find(&self.collection, &Filter::eq("genre", genre))
            .await?;
        self.map_all(docs)
    }

    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<Movie>> {
        self.store
            .find_by_id(&self.collection, id)
            .await?
            .map(|d| movie_from_document(&self.collection, &d))
            .transpose()
    }

    async fn insert(&self, movie: NewMovie) -> StoreResult<ObjectId> {
        self.store
            .insert_one(&self.collection, movie_to_document(movie))
            .await
    }

    async fn update(&self, id: ObjectId, patch: MoviePatch) -> StoreResult<Option<Movie>> {
        self.store
            .update_by_id(&self.collection, id, patch_to_document(patch))
            .await?
            .map(|d| movie_from_document(&self.collection, &d))
            .transpose()
    }

    async fn delete(&self, id: ObjectId) -> StoreResult<bool> {
        Ok(self
            .store
            .delete_by_id(&self.collection, id)
            .await?
            .is_some())
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        self.store.delete_many(&self.collection, &Filter::all()).await
    }
}

/// Genres stored as documents in one collection.
#[derive(Debug, Clone)]
pub struct DocstoreGenresRepository {
    store: Arc<dyn StoreBackend>,
    collection: String,
}

impl DocstoreGenresRepository {
    pub fn new(store: Arc<dyn StoreBackend>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }
}

#[async_trait]
impl GenresRepository for DocstoreGenresRepository {
    async fn list(&self) -> StoreResult<Vec<Genre>> {
        self.store
            .find(&self.collection, &Filter::all())
            .await?
            .iter()
            .map(|d| genre_from_document(&self.collection, d))
            .collect()
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Genre>> {
        self.store
            .find_one(&self.collection, &Filter::eq("name", name))
            .await?
            .map(|d| genre_from_document(&self.collection, &d))
            .transpose()
    }

    async fn insert(&self, name: &str) -> StoreResult<ObjectId> {
        self.store
            .insert_one(&self.collection, doc! { "name": name })
            .await
    }

    async fn rename(&self, id: ObjectId, name: &str) -> StoreResult<Option<Genre>> {
        self.store
            .update_by_id(&self.collection, id, doc! { "name": name })
            .await?
            .map(|d| genre_from_document(&self.collection, &d))
            .transpose()
    }

    async fn delete(&self, id: ObjectId) -> StoreResult<bool> {
        Ok(self
            .store
            .delete_by_id(&self.collection, id)
            .await?
            .is_some())
    }

    async fn delete_all(&self) -> StoreResult<u64> {
        self.store.delete_many(&self.collection, &Filter::all()).await
    }
}
