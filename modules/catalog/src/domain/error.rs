use docstore::{ObjectId, StoreError};
use thiserror::Error;

/// Every way a catalog request can fail.
///
/// The `Display` text is the message the client receives.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Not valid ID")]
    InvalidId { raw: String },

    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("Release date is not a valid date")]
    InvalidReleaseDate { raw: String },

    #[error("Genre must be not empty array of strings")]
    InvalidGenreList,

    #[error("Not valid name")]
    InvalidName,

    #[error("This category already exists")]
    GenreAlreadyExists { name: String },

    #[error("Movie with id {id} not found")]
    MovieNotFound { id: ObjectId },

    #[error("Genre with id {id} not found")]
    GenreNotFound { id: ObjectId },

    #[error("There are no films in the catalog")]
    NoMovies,

    #[error("There are no films in the catalog with genre: {genre}")]
    NoMoviesWithGenre { genre: String },

    #[error("There are no genres in the catalog")]
    NoGenres,

    #[error("{message}")]
    Store { message: String },
}

impl DomainError {
    pub fn invalid_id(raw: impl Into<String>) -> Self {
        Self::InvalidId { raw: raw.into() }
    }

    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn store(e: StoreError) -> Self {
        Self::Store {
            message: e.to_string(),
        }
    }

    /// Outcomes that mean "nothing there" rather than "bad request".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MovieNotFound { .. }
                | Self::GenreNotFound { .. }
                | Self::NoMovies
                | Self::NoMoviesWithGenre { .. }
                | Self::NoGenres
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_client_facing() {
        let id = ObjectId::parse_str("6533836e919d683ce4eee559").unwrap();
        assert_eq!(DomainError::missing("Release date").to_string(), "Release date is required");
        assert_eq!(
            DomainError::MovieNotFound { id }.to_string(),
            "Movie with id 6533836e919d683ce4eee559 not found"
        );
        assert_eq!(
            DomainError::NoMoviesWithGenre { genre: "drama".into() }.to_string(),
            "There are no films in the catalog with genre: drama"
        );
        assert_eq!(
            DomainError::store(StoreError::Backend("connection refused".into())).to_string(),
            "connection refused"
        );
    }

    #[test]
    fn not_found_classification() {
        assert!(DomainError::NoGenres.is_not_found());
        assert!(!DomainError::InvalidName.is_not_found());
        assert!(!DomainError::GenreAlreadyExists { name: "x".into() }.is_not_found());
    }
}
