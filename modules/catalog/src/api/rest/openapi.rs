use modkit::Message;
use utoipa::OpenApi;

use crate::api::rest::dto::{
    CreateGenreReq, CreateMovieReq, EditGenreReq, EditMovieReq, GenreDto, MovieDto,
};
use crate::api::rest::handlers;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_movies,
        handlers::list_movies_by_genre,
        handlers::get_movie,
        handlers::create_movie,
        handlers::update_movie,
        handlers::delete_movie,
        handlers::delete_all_movies,
        handlers::list_genres,
        handlers::create_genre,
        handlers::rename_genre,
        handlers::delete_genre,
        handlers::delete_all_genres,
    ),
    components(schemas(
        MovieDto,
        GenreDto,
        CreateMovieReq,
        EditMovieReq,
        CreateGenreReq,
        EditGenreReq,
        Message
    )),
    tags(
        (name = "Movies", description = "Movie records"),
        (name = "Genres", description = "Genre names")
    )
)]
pub struct CatalogApi;
