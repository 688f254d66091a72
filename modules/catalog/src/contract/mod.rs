pub mod model;

pub use model::{Genre, GenreField, Movie, MovieDraft, MoviePatch, NewMovie};
