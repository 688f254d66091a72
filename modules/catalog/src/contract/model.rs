use chrono::{DateTime, Utc};
use docstore::ObjectId;

/// A stored movie.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub release_date: DateTime<Utc>,
    pub genre: Vec<String>,
}

/// A stored genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: ObjectId,
    pub name: String,
}

/// A validated movie ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub description: String,
    pub release_date: DateTime<Utc>,
    pub genre: Vec<String>,
}

/// Partial update for a movie; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub genre: Option<Vec<String>>,
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.release_date.is_none()
            && self.genre.is_none()
    }
}

/// Movie fields exactly as the client sent them, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<String>,
    pub genre: Option<GenreField>,
}

/// The `genre` value as received.
#[derive(Debug, Clone, PartialEq)]
pub enum GenreField {
    Strings(Vec<String>),
    /// Present but not a sequence of strings.
    Malformed,
}
