//! Field-level checks run before any store access.

use chrono::{DateTime, NaiveDate, Utc};
use docstore::{parse_object_id, ObjectId};

use crate::contract::model::{GenreField, MovieDraft, MoviePatch, NewMovie};
use crate::domain::error::DomainError;

/// Accepted date-only layouts; the result is UTC midnight of that day.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%B-%Y"];

pub fn parse_id(raw: &str) -> Result<ObjectId, DomainError> {
    parse_object_id(raw).map_err(|_| DomainError::invalid_id(raw))
}

/// Trimmed, non-empty text or `MissingField`.
pub fn required_text(value: Option<&str>, field: &'static str) -> Result<String, DomainError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(DomainError::missing(field)),
    }
}

pub fn parse_release_date(raw: Option<&str>) -> Result<DateTime<Utc>, DomainError> {
    let raw = required_text(raw, "Release date")?;

    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&raw, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or(DomainError::InvalidReleaseDate { raw })
}

pub fn genre_list(value: Option<GenreField>) -> Result<Vec<String>, DomainError> {
    match value {
        Some(GenreField::Strings(list)) if !list.is_empty() => Ok(list),
        _ => Err(DomainError::InvalidGenreList),
    }
}

/// Checks run in field order; the first failure wins.
pub fn new_movie(draft: MovieDraft) -> Result<NewMovie, DomainError> {
    Ok(NewMovie {
        title: required_text(draft.title.as_deref(), "Title")?,
        description: required_text(draft.description.as_deref(), "Description")?,
        release_date: parse_release_date(draft.release_date.as_deref())?,
        genre: genre_list(draft.genre)?,
    })
}

/// Only the fields present in the draft are validated.
pub fn movie_patch(draft: MovieDraft) -> Result<MoviePatch, DomainError> {
    let mut patch = MoviePatch::default();
    if let Some(title) = draft.title.as_deref() {
        patch.title = Some(required_text(Some(title), "Title")?);
    }
    if let Some(description) = draft.description.as_deref() {
        patch.description = Some(required_text(Some(description), "Description")?);
    }
    if let Some(date) = draft.release_date.as_deref() {
        patch.release_date = Some(parse_release_date(Some(date))?);
    }
    if let Some(genre) = draft.genre {
        patch.genre = Some(genre_list(Some(genre))?);
    }
    Ok(patch)
}

pub fn genre_name(value: Option<&str>) -> Result<String, DomainError> {
    required_text(value, "Name")
}

/// Rename uses its own message for a missing name.
pub fn genre_rename(value: Option<&str>) -> Result<String, DomainError> {
    required_text(value, "Name").map_err(|_| DomainError::InvalidName)
}
