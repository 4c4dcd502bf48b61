/// TMDB (The Movie Database) provider
///
/// Thin request/response client over the TMDB v3 REST API. Raw payloads are
/// converted to domain models at this edge; no business logic lives here.
use std::time::Duration;

use reqwest::{Client as HttpClient, StatusCode};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{Movie, MovieDetail, MovieId, MovieSearchResponse, TmdbMovie, TmdbMovieDetails, TmdbPage},
    services::providers::MovieProvider,
};

const SEARCH_LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
}

impl TmdbProvider {
    /// Creates a TMDB provider from application config
    ///
    /// The underlying client carries a hard per-request timeout so no
    /// upstream call can suspend a request indefinitely.
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.tmdb_api_key.clone(),
            api_url: config.tmdb_api_url.clone(),
            image_base_url: config.tmdb_image_base_url.clone(),
        })
    }

    /// Fetches a TMDB list endpoint and converts its entries
    ///
    /// A malformed entry is skipped with a warning instead of discarding the
    /// whole page.
    async fn fetch_page(&self, url: &str, query: &[(&str, String)]) -> AppResult<TmdbPage> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    fn convert_page(&self, page: TmdbPage) -> Vec<Movie> {
        page.results
            .into_iter()
            .filter_map(|raw| match serde_json::from_value::<TmdbMovie>(raw) {
                Ok(movie) => Some(Movie::from_tmdb(movie, &self.image_base_url)),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed movie entry");
                    None
                }
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl MovieProvider for TmdbProvider {
    async fn search_movies(&self, query: &str) -> AppResult<MovieSearchResponse> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/search/movie", self.api_url);
        let page = self
            .fetch_page(
                &url,
                &[
                    ("query", query.to_string()),
                    ("include_adult", "false".to_string()),
                    ("language", SEARCH_LANGUAGE.to_string()),
                    ("page", "1".to_string()),
                ],
            )
            .await?;

        let total_results = page.total_results;
        let results = self.convert_page(page);

        tracing::info!(
            query = %query,
            results = results.len(),
            provider = "tmdb",
            "Movie search completed"
        );

        Ok(MovieSearchResponse {
            results,
            total_results,
        })
    }

    async fn fetch_detail(&self, id: MovieId) -> AppResult<MovieDetail> {
        let url = format!("{}/movie/{}", self.api_url, id);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&[("append_to_response", "credits")])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("Movie {} not found", id)));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {}: {}",
                status, body
            )));
        }

        let details: TmdbMovieDetails = response.json().await?;
        let detail = MovieDetail::from_tmdb(details, &self.image_base_url);

        tracing::info!(
            movie_id = %id,
            cast = detail.cast.len(),
            provider = "tmdb",
            "Movie detail fetched"
        );

        Ok(detail)
    }

    async fn similar_movies(&self, id: MovieId) -> AppResult<Vec<Movie>> {
        let url = format!("{}/movie/{}/similar", self.api_url, id);
        let page = self.fetch_page(&url, &[("page", "1".to_string())]).await?;
        Ok(self.convert_page(page))
    }

    async fn recommended_movies(&self, id: MovieId) -> AppResult<Vec<Movie>> {
        let url = format!("{}/movie/{}/recommendations", self.api_url, id);
        let page = self.fetch_page(&url, &[("page", "1".to_string())]).await?;
        Ok(self.convert_page(page))
    }

    async fn discover_by_genres(&self, genre_ids: Vec<u64>) -> AppResult<Vec<Movie>> {
        let with_genres = genre_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let url = format!("{}/discover/movie", self.api_url);
        let page = self
            .fetch_page(
                &url,
                &[
                    ("with_genres", with_genres),
                    ("sort_by", "popularity.desc".to_string()),
                    ("page", "1".to_string()),
                ],
            )
            .await?;

        Ok(self.convert_page(page))
    }
}
