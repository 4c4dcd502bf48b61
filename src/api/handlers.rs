use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::models::{
    Movie, MovieId, MovieNetwork, MovieSearchResponse, RelatedMovie, StatusCheck,
    StatusCheckCreate,
};
use crate::services::{candidates, recommendations};

use super::AppState;

/// Related movies returned when the client does not ask for a count
const DEFAULT_NETWORK_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct NetworkQuery {
    pub limit: Option<usize>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// API root greeting
pub async fn api_root() -> Json<Value> {
    Json(json!({ "message": "Movie Recommendation API" }))
}

/// Records a client status check
pub async fn create_status_check(
    State(state): State<AppState>,
    Json(request): Json<StatusCheckCreate>,
) -> (StatusCode, Json<StatusCheck>) {
    let check = StatusCheck::new(request.client_name);
    state.status_checks.write().await.push(check.clone());
    (StatusCode::CREATED, Json(check))
}

/// Returns all recorded status checks
pub async fn get_status_checks(State(state): State<AppState>) -> Json<Vec<StatusCheck>> {
    let checks = state.status_checks.read().await;
    Json(checks.clone())
}

/// Searches movies by title
pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<MovieSearchResponse>> {
    let response = state.provider.search_movies(&params.query).await?;
    Ok(Json(response))
}

/// Returns the summary for a single movie
pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<u64>,
) -> AppResult<Json<Movie>> {
    let detail = state.provider.fetch_detail(MovieId(movie_id)).await?;
    Ok(Json(detail.summary()))
}

/// Returns a movie and its ranked related movies for network visualization
pub async fn get_movie_network(
    State(state): State<AppState>,
    Path(movie_id): Path<u64>,
    Query(params): Query<NetworkQuery>,
) -> AppResult<Json<MovieNetwork>> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_NETWORK_LIMIT)
        .clamp(1, candidates::MAX_POOL_SIZE);

    let ranked =
        recommendations::recommend(Arc::clone(&state.provider), MovieId(movie_id), limit).await?;

    let related_movies = ranked
        .related
        .into_iter()
        .map(|entry| RelatedMovie {
            movie: entry.movie.summary(),
            similarity: entry.score,
        })
        .collect();

    Ok(Json(MovieNetwork {
        central_movie: ranked.reference.summary(),
        related_movies,
    }))
}
