use axum::extract::State;
use axum::Json;
use tmdb_client::{Genre, Movie};

use crate::error::AppError;
use crate::events::ActorCard;
use crate::state::AppState;

/// GET /api/tmdb/genres
pub async fn genres(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let genres: Vec<Genre> = app.tmdb.genres().await?;
    Ok(Json(serde_json::json!({ "genres": genres })))
}

/// GET /api/tmdb/random-movie: one movie with a poster.
pub async fn random_movie(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let movie: Movie = app.tmdb.random_movie().await?;
    let poster_url = movie.poster_path.as_deref().map(|p| app.tmdb.image_url(p));
    Ok(Json(serde_json::json!({ "movie": movie, "poster_url": poster_url })))
}

/// GET /api/tmdb/popular-actors: up to nine actors across popularity tiers.
pub async fn popular_actors(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let actors = app.tmdb.popular_actors().await?;
    let results: Vec<ActorCard> = actors
        .iter()
        .map(|a| ActorCard::from_actor(a, |p| app.tmdb.image_url(p)))
        .collect();
    Ok(Json(serde_json::json!({ "results": results })))
}
