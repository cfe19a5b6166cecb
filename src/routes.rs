use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::WithRejection;
use tracing::info;

use crate::{
    AppState,
    catalog::{duplicate_genre, duplicate_title},
    docs,
    entities::{genre, language},
    error::{AppError, AppResult},
    models::{
        CreateMovieRequest, GenreRequest, Message, MovieDetails, MovieFilter, UpdateMovieRequest,
    },
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/{segment}", get(show_movies).put(update_movie).delete(delete_movie))
        .route("/genres", get(list_genres).post(create_genre))
        .route("/genres/{id}", get(show_genre).put(update_genre).delete(delete_genre))
        .route("/languages", get(list_languages))
        .route("/docs", get(docs::swagger_ui))
        .route("/docs/openapi.json", get(docs::openapi))
        .with_state(state)
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<MovieFilter>,
) -> AppResult<Json<Vec<MovieDetails>>> {
    let movies = match filter.genre {
        Some(genre) => state.catalog.movies_by_genre(&genre).await?,
        None => state.catalog.list_movies().await?,
    };
    Ok(Json(movies))
}

/// `/movies/{segment}`: an all-digit segment is a movie id, anything else a
/// genre name.
pub async fn show_movies(
    State(state): State<Arc<AppState>>,
    Path(segment): Path<String>,
) -> AppResult<Response> {
    if !is_numeric(&segment) {
        let movies = state.catalog.movies_by_genre(&segment).await?;
        return Ok(Json(movies).into_response());
    }

    let movie = match segment.parse::<i32>() {
        Ok(id) => state.catalog.find_movie(id).await?,
        Err(_) => None,
    };
    let movie = movie.ok_or_else(|| movie_not_found(&segment))?;
    Ok(Json(movie).into_response())
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(req), _): WithRejection<Json<CreateMovieRequest>, AppError>,
) -> AppResult<StatusCode> {
    let new = req.into_new_movie()?;

    if state.catalog.movie_title_taken(&new.title, None).await? {
        return Err(AppError::Conflict(duplicate_title(&new.title)));
    }

    let movie = state.catalog.create_movie(new).await?;
    info!(id = movie.id, title = %movie.title, "movie created");
    Ok(StatusCode::CREATED)
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateMovieRequest>, AppError>,
) -> AppResult<StatusCode> {
    let changes = req.into_changes()?;
    let movie =
        state.catalog.update_movie(id, changes).await?.ok_or_else(|| movie_not_found(id))?;
    info!(id = movie.id, title = %movie.title, "movie updated");
    Ok(StatusCode::OK)
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    if !state.catalog.delete_movie(id).await? {
        return Err(movie_not_found(id));
    }
    info!(id, "movie deleted");
    Ok(StatusCode::OK)
}

pub async fn list_genres(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<genre::Model>>> {
    Ok(Json(state.catalog.list_genres().await?))
}

pub async fn show_genre(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<genre::Model>> {
    let genre = state.catalog.find_genre(id).await?.ok_or_else(|| genre_not_found(id))?;
    Ok(Json(genre))
}

pub async fn create_genre(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(req), _): WithRejection<Json<GenreRequest>, AppError>,
) -> AppResult<(StatusCode, Json<genre::Model>)> {
    let name = req.into_name()?;

    if state.catalog.genre_name_taken(&name, None).await? {
        return Err(AppError::Conflict(duplicate_genre(&name)));
    }

    let genre = state.catalog.create_genre(name).await?;
    info!(id = genre.id, name = %genre.name, "genre created");
    Ok((StatusCode::CREATED, Json(genre)))
}

pub async fn update_genre(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    WithRejection(Json(req), _): WithRejection<Json<GenreRequest>, AppError>,
) -> AppResult<Json<genre::Model>> {
    let name = req.into_name()?;
    let genre = state.catalog.rename_genre(id, name).await?.ok_or_else(|| genre_not_found(id))?;
    info!(id = genre.id, name = %genre.name, "genre renamed");
    Ok(Json(genre))
}

pub async fn delete_genre(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<Message>> {
    if !state.catalog.delete_genre(id).await? {
        return Err(genre_not_found(id));
    }
    info!(id, "genre deleted");
    Ok(Json(Message::new("genre deleted")))
}

pub async fn list_languages(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<language::Model>>> {
    Ok(Json(state.catalog.list_languages().await?))
}

fn is_numeric(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

fn movie_not_found(id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("movie {id} not found"))
}

fn genre_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("genre {id} not found"))
}
