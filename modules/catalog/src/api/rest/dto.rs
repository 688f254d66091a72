use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::contract::model::{Genre, GenreField, Movie, MovieDraft};

/// REST DTO for a movie record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieDto {
    #[serde(rename = "_id")]
    #[schema(example = "6533836e919d683ce4eee559")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub release_date: DateTime<Utc>,
    #[schema(example = json!(["crime", "drama"]))]
    pub genre: Vec<String>,
}

/// REST DTO for a genre record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GenreDto {
    #[serde(rename = "_id")]
    #[schema(example = "6533836e919d683ce4eee559")]
    pub id: String,
    #[schema(example = "comedy")]
    pub name: String,
}

/// Body of `POST /movies`.
///
/// Fields are optional at the wire level so that a missing field yields the
/// field-specific message rather than a parse error.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "title": "Heat",
    "description": "A group of professional bank robbers start to feel the heat from police",
    "releaseDate": "1995-12-15",
    "genre": ["crime", "drama"]
}))]
pub struct CreateMovieReq {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `YYYY-MM-DD`, RFC 3339 or `DD-Month-YYYY`.
    pub release_date: Option<String>,
    #[schema(value_type = Option<Vec<String>>)]
    pub genre: Option<Value>,
}

/// Body of `PATCH /movies/{id}`; only the fields present are changed.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"title": "Heat (1995)"}))]
pub struct EditMovieReq {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<String>,
    #[schema(value_type = Option<Vec<String>>)]
    pub genre: Option<Value>,
}

/// Body of `POST /genre`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[schema(example = json!({"name": "comedy"}))]
pub struct CreateGenreReq {
    pub name: Option<String>,
}

/// Body of `PATCH /genre/{id}`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[schema(example = json!({"name": "satire"}))]
pub struct EditGenreReq {
    pub name: Option<String>,
}

fn genre_field(value: Option<Value>) -> Option<GenreField> {
    match value? {
        Value::Null => None,
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map_or(GenreField::Malformed, GenreField::Strings),
        ),
        _ => Some(GenreField::Malformed),
    }
}

// Conversions between DTOs and contract models

impl From<Movie> for MovieDto {
    fn from(m: Movie) -> Self {
        Self {
            id: m.id.to_hex(),
            title: m.title,
            description: m.description,
            release_date: m.release_date,
            genre: m.genre,
        }
    }
}

impl From<Genre> for GenreDto {
    fn from(g: Genre) -> Self {
        Self {
            id: g.id.to_hex(),
            name: g.name,
        }
    }
}

impl From<CreateMovieReq> for MovieDraft {
    fn from(req: CreateMovieReq) -> Self {
        Self {
            title: req.title,
            description: req.description,
            release_date: req.release_date,
            genre: genre_field(req.genre),
        }
    }
}

impl From<EditMovieReq> for MovieDraft {
    fn from(req: EditMovieReq) -> Self {
        Self {
            title: req.title,
            description: req.description,
            release_date: req.release_date,
            genre: genre_field(req.genre),
        }
    }
}
