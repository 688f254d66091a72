use std::sync::Arc;

use docstore::ObjectId;
use tracing::{debug, info, instrument};

use crate::contract::model::{Genre, Movie, MovieDraft};
use crate::domain::error::DomainError;
use crate::domain::repo::{GenresRepository, MoviesRepository};
use crate::domain::validation;

/// Catalog rules over the two repository ports.
///
/// Every operation validates its inputs first and touches the store only
/// once they pass.
#[derive(Clone)]
pub struct Service {
    movies: Arc<dyn MoviesRepository>,
    genres: Arc<dyn GenresRepository>,
}

impl Service {
    pub fn new(movies: Arc<dyn MoviesRepository>, genres: Arc<dyn GenresRepository>) -> Self {
        Self { movies, genres }
    }

    // --- movies ---

    #[instrument(name = "catalog.service.list_movies", skip(self))]
    pub async fn list_movies(&self) -> Result<Vec<Movie>, DomainError> {
        let movies = self.movies.list().await.map_err(DomainError::store)?;
        if movies.is_empty() {
            return Err(DomainError::NoMovies);
        }
        debug!(count = movies.len(), "listed movies");
        Ok(movies)
    }

    #[instrument(name = "catalog.service.list_movies_by_genre", skip(self))]
    pub async fn list_movies_by_genre(&self, genre: &str) -> Result<Vec<Movie>, DomainError> {
        let movies = self
            .movies
            .list_by_genre(genre)
            .await
            .map_err(DomainError::store)?;
        if movies.is_empty() {
            return Err(DomainError::NoMoviesWithGenre {
                genre: genre.to_string(),
            });
        }
        debug!(count = movies.len(), "listed movies by genre");
        Ok(movies)
    }

    #[instrument(name = "catalog.service.get_movie", skip(self, raw_id), fields(movie_id = %raw_id))]
    pub async fn get_movie(&self, raw_id: &str) -> Result<Movie, DomainError> {
        let id = validation::parse_id(raw_id)?;
        self.movies
            .find_by_id(id)
            .await
            .map_err(DomainError::store)?
            .ok_or(DomainError::MovieNotFound { id })
    }

    #[instrument(name = "catalog.service.create_movie", skip_all)]
    pub async fn create_movie(&self, draft: MovieDraft) -> Result<ObjectId, DomainError> {
        let movie = validation::new_movie(draft)?;
        let title = movie.title.clone();
        let id = self.movies.insert(movie).await.map_err(DomainError::store)?;
        info!(movie_id = %id, %title, "movie created");
        Ok(id)
    }

    #[instrument(name = "catalog.service.update_movie", skip(self, raw_id, draft), fields(movie_id = %raw_id))]
    pub async fn update_movie(&self, raw_id: &str, draft: MovieDraft) -> Result<ObjectId, DomainError> {
        let id = validation::parse_id(raw_id)?;
        let patch = validation::movie_patch(draft)?;
        self.movies
            .update(id, patch)
            .await
            .map_err(DomainError::store)?
            .ok_or(DomainError::MovieNotFound { id })?;
        info!("movie edited");
        Ok(id)
    }

    #[instrument(name = "catalog.service.delete_movie", skip(self, raw_id), fields(movie_id = %raw_id))]
    pub async fn delete_movie(&self, raw_id: &str) -> Result<ObjectId, DomainError> {
        let id = validation::parse_id(raw_id)?;
        if !self.movies.delete(id).await.map_err(DomainError::store)? {
            return Err(DomainError::MovieNotFound { id });
        }
        info!("movie deleted");
        Ok(id)
    }

    #[instrument(name = "catalog.service.delete_all_movies", skip(self))]
    pub async fn delete_all_movies(&self) -> Result<u64, DomainError> {
        let removed = self.movies.delete_all().await.map_err(DomainError::store)?;
        info!(removed, "all movies deleted");
        Ok(removed)
    }

    // --- genres ---

    #[instrument(name = "catalog.service.list_genres", skip(self))]
    pub async fn list_genres(&self) -> Result<Vec<Genre>, DomainError> {
        let genres = self.genres.list().await.map_err(DomainError::store)?;
        if genres.is_empty() {
            return Err(DomainError::NoGenres);
        }
        Ok(genres)
    }

    /// Lookup then insert; two concurrent creators of the same name can both succeed.
    #[instrument(name = "catalog.service.create_genre", skip_all)]
    pub async fn create_genre(&self, name: Option<&str>) -> Result<Genre, DomainError> {
        let name = validation::genre_name(name)?;
        if self
            .genres
            .find_by_name(&name)
            .await
            .map_err(DomainError::store)?
            .is_some()
        {
            return Err(DomainError::GenreAlreadyExists { name });
        }

        let id = self.genres.insert(&name).await.map_err(DomainError::store)?;
        info!(genre_id = %id, %name, "genre created");
        Ok(Genre { id, name })
    }

    #[instrument(name = "catalog.service.rename_genre", skip(self, raw_id, name), fields(genre_id = %raw_id))]
    pub async fn rename_genre(&self, raw_id: &str, name: Option<&str>) -> Result<ObjectId, DomainError> {
        let id = validation::parse_id(raw_id)?;
        let name = validation::genre_rename(name)?;
        self.genres
            .rename(id, &name)
            .await
            .map_err(DomainError::store)?
            .ok_or(DomainError::GenreNotFound { id })?;
        info!(%name, "genre edited");
        Ok(id)
    }

    #[instrument(name = "catalog.service.delete_genre", skip(self, raw_id), fields(genre_id = %raw_id))]
    pub async fn delete_genre(&self, raw_id: &str) -> Result<ObjectId, DomainError> {
        let id = validation::parse_id(raw_id)?;
        if !self.genres.delete(id).await.map_err(DomainError::store)? {
            return Err(DomainError::GenreNotFound { id });
        }
        info!("genre deleted");
        Ok(id)
    }

    #[instrument(name = "catalog.service.delete_all_genres", skip(self))]
    pub async fn delete_all_genres(&self) -> Result<u64, DomainError> {
        let removed = self.genres.delete_all().await.map_err(DomainError::store)?;
        info!(removed, "all genres deleted");
        Ok(removed)
    }
}
