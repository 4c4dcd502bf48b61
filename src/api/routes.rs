use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState, cors_origins: &str) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/", get(handlers::api_root))
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(build_cors(cors_origins))
        .with_state(state)
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::api_root))
        .route(
            "/status",
            get(handlers::get_status_checks).post(handlers::create_status_check),
        )
        .route("/movies/search", get(handlers::search_movies))
        .route("/movies/:movie_id", get(handlers::get_movie))
        .route("/movies/:movie_id/network", get(handlers::get_movie_network))
}

/// Builds the CORS layer from a comma-separated origin list, or "*"
///
/// Credentials are only allowed with an explicit origin list; tower-http
/// rejects the wildcard + credentials combination.
fn build_cors(origins: &str) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    if origins.trim() == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Per-request tracing span carrying a generated request id
fn make_request_span(request: &Request<Body>) -> tracing::Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %Uuid::new_v4(),
    )
}
