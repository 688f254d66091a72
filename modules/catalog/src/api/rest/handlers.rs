use std::sync::Arc;

use axum::{Extension, Json};
use modkit::{ApiResult, Created, JsonBody, Message, PathParam};
use tracing::info;

use crate::api::rest::dto::{
    CreateGenreReq, CreateMovieReq, EditGenreReq, EditMovieReq, GenreDto, MovieDto,
};
use crate::domain::service::Service;

type Svc = Extension<Arc<Service>>;

// ---------- movies ----------

/// Get all movies
#[utoipa::path(
    get,
    path = "/movies",
    tag = "Movies",
    operation_id = "catalog.list_movies",
    responses(
        (status = 200, description = "Every movie in the catalog", body = [MovieDto]),
        (status = 400, description = "Store error", body = Message),
        (status = 404, description = "The catalog is empty", body = Message)
    )
)]
pub async fn list_movies(Extension(svc): Svc) -> ApiResult<Json<Vec<MovieDto>>> {
    let movies = svc.list_movies().await?;
    Ok(Json(movies.into_iter().map(MovieDto::from).collect()))
}

/// Get movies by genre
#[utoipa::path(
    get,
    path = "/movies/genre/{genreName}",
    tag = "Movies",
    operation_id = "catalog.list_movies_by_genre",
    params(("genreName" = String, Path, description = "Genre name", example = "comedy")),
    responses(
        (status = 200, description = "Movies listing that genre", body = [MovieDto]),
        (status = 400, description = "Store error", body = Message),
        (status = 404, description = "No movie has that genre", body = Message)
    )
)]
pub async fn list_movies_by_genre(
    Extension(svc): Svc,
    PathParam(genre): PathParam<String>,
) -> ApiResult<Json<Vec<MovieDto>>> {
    let movies = svc.list_movies_by_genre(&genre).await?;
    Ok(Json(movies.into_iter().map(MovieDto::from).collect()))
}

/// Get movie by id
#[utoipa::path(
    get,
    path = "/movies/{id}",
    tag = "Movies",
    operation_id = "catalog.get_movie",
    params(("id" = String, Path, description = "Movie id (24 hex characters)", example = "6533836e919d683ce4eee559")),
    responses(
        (status = 200, description = "The movie", body = MovieDto),
        (status = 400, description = "Not valid ID or store error", body = Message),
        (status = 404, description = "No movie with that id", body = Message)
    )
)]
pub async fn get_movie(Extension(svc): Svc, PathParam(id): PathParam<String>) -> ApiResult<Json<MovieDto>> {
    let movie = svc.get_movie(&id).await?;
    Ok(Json(movie.into()))
}

/// Create a new movie
#[utoipa::path(
    post,
    path = "/movies",
    tag = "Movies",
    operation_id = "catalog.create_movie",
    request_body = CreateMovieReq,
    responses(
        (status = 201, description = "Created", body = Message,
            example = json!({"message": "Movie created, id: 6533836e919d683ce4eee559"})),
        (status = 400, description = "Validation or store error", body = Message)
    )
)]
pub async fn create_movie(
    Extension(svc): Svc,
    JsonBody(req): JsonBody<CreateMovieReq>,
) -> ApiResult<Created<Message>> {
    info!("creating movie");
    let id = svc.create_movie(req.into()).await?;
    Ok(Created(Message::new(format!("Movie created, id: {id}"))))
}

/// Edit a movie if it exists
#[utoipa::path(
    patch,
    path = "/movies/{id}",
    tag = "Movies",
    operation_id = "catalog.update_movie",
    params(("id" = String, Path, description = "Movie id (24 hex characters)")),
    request_body = EditMovieReq,
    responses(
        (status = 200, description = "Edited", body = Message),
        (status = 400, description = "Not valid ID, validation or store error", body = Message),
        (status = 404, description = "No movie with that id", body = Message)
    )
)]
pub async fn update_movie(
    Extension(svc): Svc,
    PathParam(id): PathParam<String>,
    JsonBody(req): JsonBody<EditMovieReq>,
) -> ApiResult<Json<Message>> {
    let id = svc.update_movie(&id, req.into()).await?;
    Ok(Json(Message::new(format!("Movie with id: {id} edited"))))
}

/// Delete a movie by id
#[utoipa::path(
    delete,
    path = "/movies/{id}",
    tag = "Movies",
    operation_id = "catalog.delete_movie",
    params(("id" = String, Path, description = "Movie id (24 hex characters)")),
    responses(
        (status = 200, description = "Deleted", body = Message),
        (status = 400, description = "Not valid ID or store error", body = Message),
        (status = 404, description = "No movie with that id", body = Message)
    )
)]
pub async fn delete_movie(Extension(svc): Svc, PathParam(id): PathParam<String>) -> ApiResult<Json<Message>> {
    let id = svc.delete_movie(&id).await?;
    Ok(Json(Message::new(format!("Movie with id: {id} deleted"))))
}

/// Delete all movies
#[utoipa::path(
    delete,
    path = "/movies/all",
    tag = "Movies",
    operation_id = "catalog.delete_all_movies",
    responses(
        (status = 200, description = "Deleted", body = Message,
            example = json!({"message": "All movies deleted"})),
        (status = 400, description = "Store error", body = Message)
    )
)]
pub async fn delete_all_movies(Extension(svc): Svc) -> ApiResult<Json<Message>> {
    svc.delete_all_movies().await?;
    Ok(Json(Message::new("All movies deleted")))
}

// ---------- genres ----------

/// Get all genres
#[utoipa::path(
    get,
    path = "/genre",
    tag = "Genres",
    operation_id = "catalog.list_genres",
    responses(
        (status = 200, description = "Every genre", body = [GenreDto]),
        (status = 400, description = "Store error", body = Message),
        (status = 404, description = "No genres yet", body = Message)
    )
)]
pub async fn list_genres(Extension(svc): Svc) -> ApiResult<Json<Vec<GenreDto>>> {
    let genres = svc.list_genres().await?;
    Ok(Json(genres.into_iter().map(GenreDto::from).collect()))
}

/// Create a new genre
#[utoipa::path(
    post,
    path = "/genre",
    tag = "Genres",
    operation_id = "catalog.create_genre",
    request_body = CreateGenreReq,
    responses(
        (status = 201, description = "Created", body = Message,
            example = json!({"message": "Genre comedy created, id: 6533836e919d683ce4eee559"})),
        (status = 400, description = "Duplicate name, validation or store error", body = Message)
    )
)]
pub async fn create_genre(
    Extension(svc): Svc,
    JsonBody(req): JsonBody<CreateGenreReq>,
) -> ApiResult<Created<Message>> {
    let genre = svc.create_genre(req.name.as_deref()).await?;
    Ok(Created(Message::new(format!(
        "Genre {} created, id: {}",
        genre.name, genre.id
    ))))
}

/// Rename a genre if it exists
#[utoipa::path(
    patch,
    path = "/genre/{id}",
    tag = "Genres",
    operation_id = "catalog.rename_genre",
    params(("id" = String, Path, description = "Genre id (24 hex characters)")),
    request_body = EditGenreReq,
    responses(
        (status = 200, description = "Edited", body = Message),
        (status = 400, description = "Not valid ID, not valid name or store error", body = Message),
        (status = 404, description = "No genre with that id", body = Message)
    )
)]
pub async fn rename_genre(
    Extension(svc): Svc,
    PathParam(id): PathParam<String>,
    JsonBody(req): JsonBody<EditGenreReq>,
) -> ApiResult<Json<Message>> {
    let id = svc.rename_genre(&id, req.name.as_deref()).await?;
    Ok(Json(Message::new(format!("Genre with id: {id} edited"))))
}

/// Delete a genre by id
#[utoipa::path(
    delete,
    path = "/genre/{id}",
    tag = "Genres",
    operation_id = "catalog.delete_genre",
    params(("id" = String, Path, description = "Genre id (24 hex characters)")),
    responses(
        (status = 200, description = "Deleted", body = Message),
        (status = 400, description = "Not valid ID or store error", body = Message),
        (status = 404, description = "No genre with that id", body = Message)
    )
)]
pub async fn delete_genre(Extension(svc): Svc, PathParam(id): PathParam<String>) -> ApiResult<Json<Message>> {
    let id = svc.delete_genre(&id).await?;
    Ok(Json(Message::new(format!("Genre with id: {id} deleted"))))
}

/// Delete all genres
#[utoipa::path(
    delete,
    path = "/genre/all",
    tag = "Genres",
    operation_id = "catalog.delete_all_genres",
    responses(
        (status = 200, description = "Deleted", body = Message,
            example = json!({"message": "All genres deleted"})),
        (status = 400, description = "Store error", body = Message)
    )
)]
pub async fn delete_all_genres(Extension(svc): Svc) -> ApiResult<Json<Message>> {
    svc.delete_all_genres().await?;
    Ok(Json(Message::new("All genres deleted")))
}

// ---------- literal `all` segment ----------
//
// `/movies/all` and `/genre/all` are static routes, so they shadow the `{id}`
// routes for every method. The methods other than DELETE still answer as the
// `{id}` route would, with `all` as the (invalid) id.

const ALL: &str = "all";

pub async fn get_movie_all(svc: Svc) -> ApiResult<Json<MovieDto>> {
    get_movie(svc, PathParam(ALL.to_owned())).await
}

pub async fn update_movie_all(svc: Svc, body: JsonBody<EditMovieReq>) -> ApiResult<Json<Message>> {
    update_movie(svc, PathParam(ALL.to_owned()), body).await
}

pub async fn rename_genre_all(svc: Svc, body: JsonBody<EditGenreReq>) -> ApiResult<Json<Message>> {
    rename_genre(svc, PathParam(ALL.to_owned()), body).await
}
