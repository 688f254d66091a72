use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount the movie and genre routes on `router`.
///
/// Static segments (`/movies/all`, `/movies/genre/...`) win over `{id}`; the
/// `all` routes also carry the `{id}` methods so `all` is rejected as an id.
pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let catalog = Router::new()
        .route(
            "/movies",
            get(handlers::list_movies).post(handlers::create_movie),
        )
        .route(
            "/movies/all",
            get(handlers::get_movie_all)
                .patch(handlers::update_movie_all)
                .delete(handlers::delete_all_movies),
        )
        .route(
            "/movies/genre/{genreName}",
            get(handlers::list_movies_by_genre),
        )
        .route(
            "/movies/{id}",
            get(handlers::get_movie)
                .patch(handlers::update_movie)
                .delete(handlers::delete_movie),
        )
        .route(
            "/genre",
            get(handlers::list_genres).post(handlers::create_genre),
        )
        .route(
            "/genre/all",
            patch(handlers::rename_genre_all).delete(handlers::delete_all_genres),
        )
        .route(
            "/genre/{id}",
            patch(handlers::rename_genre).delete(handlers::delete_genre),
        )
        .layer(Extension(service));

    Ok(router.merge(catalog))
}
