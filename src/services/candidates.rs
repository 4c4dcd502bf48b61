//! Candidate gathering for the recommendation engine.
//!
//! Pulls related-movie candidates from TMDB's similar and recommendation
//! lists, topping up from genre discovery when those run thin. A failed
//! source is treated as empty rather than failing the gather.

use std::collections::HashSet;

use crate::models::MovieId;
use crate::services::providers::MovieProvider;

/// Hard cap on the candidate pool, bounding downstream hydration cost
pub const MAX_POOL_SIZE: usize = 30;

/// Genres taken from the reference movie when falling back to discovery
const DISCOVER_GENRE_COUNT: usize = 3;

/// Gathers a deduplicated pool of candidate ids for `reference_id`
///
/// Sources are consulted in order: similar, recommended, then discovery by
/// the reference's top genres when the first two yield fewer than
/// `2 * min_pool_size` entries. First-seen order wins on duplicates; the
/// reference itself is never included. An empty pool is a valid outcome,
/// not an error.
pub async fn gather(
    provider: &dyn MovieProvider,
    reference_id: MovieId,
    min_pool_size: usize,
) -> Vec<MovieId> {
    let similar = provider
        .similar_movies(reference_id)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(movie_id = %reference_id, error = %e, "Similar lookup failed; treating as empty");
            Vec::new()
        });

    let recommended = provider
        .recommended_movies(reference_id)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(movie_id = %reference_id, error = %e, "Recommendations lookup failed; treating as empty");
            Vec::new()
        });

    let mut raw: Vec<MovieId> = similar
        .iter()
        .chain(recommended.iter())
        .map(|movie| movie.id)
        .collect();

    if raw.len() < 2 * min_pool_size {
        raw.extend(discover_candidates(provider, reference_id).await);
    }

    let mut seen = HashSet::new();
    let mut pool = Vec::new();
    for id in raw {
        if id == reference_id || !seen.insert(id) {
            continue;
        }
        pool.push(id);
        if pool.len() == MAX_POOL_SIZE {
            break;
        }
    }

    tracing::debug!(
        movie_id = %reference_id,
        pool_size = pool.len(),
        "Candidate pool gathered"
    );

    pool
}

/// Top-up source: popular movies sharing the reference's leading genres
///
/// Needs a separate detail lookup for the genre list; any failure along the
/// way degrades to an empty contribution.
async fn discover_candidates(provider: &dyn MovieProvider, reference_id: MovieId) -> Vec<MovieId> {
    let genre_ids: Vec<u64> = match provider.fetch_detail(reference_id).await {
        Ok(detail) => detail
            .genres
            .iter()
            .take(DISCOVER_GENRE_COUNT)
            .map(|genre| genre.id)
            .collect(),
        Err(e) => {
            tracing::warn!(movie_id = %reference_id, error = %e, "Genre lookup failed; skipping discovery");
            return Vec::new();
        }
    };

    if genre_ids.is_empty() {
        return Vec::new();
    }

    match provider.discover_by_genres(genre_ids).await {
        Ok(discovered) => discovered.into_iter().map(|movie| movie.id).collect(),
        Err(e) => {
            tracing::warn!(movie_id = %reference_id, error = %e, "Genre discovery failed; treating as empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{Genre, Movie, MovieDetail};
    use crate::services::providers::MockMovieProvider;
    use mockall::predicate::eq;

    fn movie(id: u64) -> Movie {
        Movie {
            id: MovieId(id),
            title: format!("Movie {}", id),
            overview: String::new(),
            poster_path: None,
            release_date: None,
            vote_average: None,
            vote_count: None,
            poster_url: None,
        }
    }

    fn movies(ids: std::ops::RangeInclusive<u64>) -> Vec<Movie> {
        ids.map(movie).collect()
    }

    fn detail_with_genres(id: u64, genre_ids: &[u64]) -> MovieDetail {
        MovieDetail {
            id: MovieId(id),
            title: format!("Movie {}", id),
            overview: String::new(),
            poster_path: None,
            release_date: None,
            vote_average: None,
            vote_count: None,
            poster_url: None,
            genres: genre_ids
                .iter()
                .map(|&gid| Genre {
                    id: gid,
                    name: format!("Genre {}", gid),
                })
                .collect(),
            cast: vec![],
            crew: vec![],
        }
    }

    #[tokio::test]
    async fn test_dedup_and_reference_exclusion() {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_similar_movies()
            .with(eq(MovieId(1)))
            .returning(|_| Ok(vec![movie(2), movie(3), movie(1)]));
        provider
            .expect_recommended_movies()
            .with(eq(MovieId(1)))
            .returning(|_| Ok(vec![movie(3), movie(4)]));

        let pool = gather(&provider, MovieId(1), 2).await;

        assert_eq!(pool, vec![MovieId(2), MovieId(3), MovieId(4)]);
    }

    #[tokio::test]
    async fn test_pool_capped_at_thirty() {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_similar_movies()
            .returning(|_| Ok(movies(1..=25)));
        provider
            .expect_recommended_movies()
            .returning(|_| Ok(movies(26..=40)));

        let pool = gather(&provider, MovieId(100), 5).await;

        assert_eq!(pool.len(), MAX_POOL_SIZE);
        // First-seen order survives the cap
        assert_eq!(pool[0], MovieId(1));
        assert_eq!(pool[29], MovieId(30));
    }

    #[tokio::test]
    async fn test_discovery_tops_up_small_pools() {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_similar_movies()
            .returning(|_| Ok(vec![movie(2)]));
        provider
            .expect_recommended_movies()
            .returning(|_| Ok(vec![]));
        provider
            .expect_fetch_detail()
            .with(eq(MovieId(1)))
            .returning(|_| Ok(detail_with_genres(1, &[28, 878, 53, 12])));
        provider
            .expect_discover_by_genres()
            .with(eq(vec![28, 878, 53]))
            .returning(|_| Ok(vec![movie(5), movie(2), movie(6)]));

        let pool = gather(&provider, MovieId(1), 10).await;

        assert_eq!(pool, vec![MovieId(2), MovieId(5), MovieId(6)]);
    }

    #[tokio::test]
    async fn test_discovery_skipped_when_pool_is_large_enough() {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_similar_movies()
            .returning(|_| Ok(movies(1..=4)));
        provider
            .expect_recommended_movies()
            .returning(|_| Ok(movies(5..=8)));
        provider.expect_fetch_detail().never();
        provider.expect_discover_by_genres().never();

        let pool = gather(&provider, MovieId(100), 4).await;

        assert_eq!(pool.len(), 8);
    }

    #[tokio::test]
    async fn test_failed_sources_degrade_to_empty_pool() {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_similar_movies()
            .returning(|_| Err(AppError::ExternalApi("rate limited".to_string())));
        provider
            .expect_recommended_movies()
            .returning(|_| Err(AppError::ExternalApi("rate limited".to_string())));
        provider
            .expect_fetch_detail()
            .returning(|_| Err(AppError::ExternalApi("rate limited".to_string())));

        let pool = gather(&provider, MovieId(1), 10).await;

        assert!(pool.is_empty());
    }

    #[tokio::test]
    async fn test_discovery_skipped_for_genreless_reference() {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_similar_movies()
            .returning(|_| Ok(vec![movie(2)]));
        provider
            .expect_recommended_movies()
            .returning(|_| Ok(vec![]));
        provider
            .expect_fetch_detail()
            .returning(|_| Ok(detail_with_genres(1, &[])));
        provider.expect_discover_by_genres().never();

        let pool = gather(&provider, MovieId(1), 10).await;

        assert_eq!(pool, vec![MovieId(2)]);
    }
}
