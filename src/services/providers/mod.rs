/// Movie metadata provider abstraction
///
/// This module wraps the upstream metadata source (TMDB) behind a trait so the
/// recommendation engine can be exercised against mocks. Every method is a
/// fallible, rate-limited, latency-bearing upstream call; callers decide
/// which failures are fatal.
use crate::{
    error::AppResult,
    models::{Movie, MovieDetail, MovieId, MovieSearchResponse},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
///
/// `fetch_detail` hydrates a movie into its full record, including embedded
/// credits, in a single call. The list methods return lightweight summaries
/// suitable for candidate gathering and search results.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Search for movies by title, first page only
    async fn search_movies(&self, query: &str) -> AppResult<MovieSearchResponse>;

    /// Fetch the full detail record for one movie, credits included
    ///
    /// Distinguishes an unknown id (`AppError::NotFound`) from upstream
    /// unavailability. No retries happen here; retry policy, if any, belongs
    /// to the caller.
    async fn fetch_detail(&self, id: MovieId) -> AppResult<MovieDetail>;

    /// Movies the provider flags as similar to the given one
    async fn similar_movies(&self, id: MovieId) -> AppResult<Vec<Movie>>;

    /// Movies the provider recommends alongside the given one
    async fn recommended_movies(&self, id: MovieId) -> AppResult<Vec<Movie>>;

    /// Discover movies matching the given genres, most popular first,
    /// first page only
    async fn discover_by_genres(&self, genre_ids: Vec<u64>) -> AppResult<Vec<Movie>>;
}
