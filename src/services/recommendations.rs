//! Recommendation ranking: the orchestration layer of the engine.
//!
//! Hydrates the reference movie, gathers a candidate pool, hydrates every
//! candidate in parallel, scores each against the reference, and returns the
//! top entries. Only the reference hydration is fatal; every per-candidate
//! failure degrades to a smaller result.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{MovieDetail, MovieId};
use crate::services::{candidates, providers::MovieProvider, scoring};

/// A hydrated candidate with its similarity to the reference
#[derive(Debug, Clone)]
pub struct ScoredMovie {
    pub movie: MovieDetail,
    pub score: f64,
}

/// Ranked recommendation result
///
/// Carries the hydrated reference so callers shaping a response do not need
/// a second detail fetch.
#[derive(Debug, Clone)]
pub struct RankedRecommendations {
    pub reference: MovieDetail,
    pub related: Vec<ScoredMovie>,
}

/// Ranks movies related to `reference_id`, best match first
///
/// Returns at most `limit` entries; fewer (possibly zero) when the pool runs
/// short. Fails only when the reference movie itself cannot be hydrated.
pub async fn recommend(
    provider: Arc<dyn MovieProvider>,
    reference_id: MovieId,
    limit: usize,
) -> AppResult<RankedRecommendations> {
    // The reference is mandatory; NotFound and upstream failures propagate
    let reference = provider.fetch_detail(reference_id).await?;

    let pool = candidates::gather(provider.as_ref(), reference_id, limit).await;

    // Fan out one hydration task per candidate. Tasks are awaited in pool
    // order so the stable sort below keeps first-seen order on ties.
    let mut tasks = Vec::with_capacity(pool.len());
    for candidate_id in pool {
        let provider = Arc::clone(&provider);
        tasks.push((
            candidate_id,
            tokio::spawn(async move { provider.fetch_detail(candidate_id).await }),
        ));
    }

    let mut scored = Vec::with_capacity(tasks.len());
    for (candidate_id, task) in tasks {
        match task.await {
            Ok(Ok(movie)) => {
                let score = scoring::score(&reference, &movie);
                scored.push(ScoredMovie { movie, score });
            }
            Ok(Err(e)) => {
                tracing::warn!(movie_id = %candidate_id, error = %e, "Candidate hydration failed; skipping");
            }
            Err(e) => {
                tracing::warn!(movie_id = %candidate_id, error = %e, "Candidate hydration task failed; skipping");
            }
        }
    }

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(limit);

    tracing::info!(
        movie_id = %reference_id,
        results = scored.len(),
        "Recommendations ranked"
    );

    Ok(RankedRecommendations {
        reference,
        related: scored,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{CastMember, CrewMember, Genre, Movie};
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

    fn detail(id: u64, genre_ids: &[u64], director_id: Option<u64>, cast_ids: &[u64]) -> MovieDetail {
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
            cast: cast_ids
                .iter()
                .map(|&cid| CastMember {
                    id: cid,
                    name: format!("Actor {}", cid),
                    character: None,
                })
                .collect(),
            crew: director_id
                .map(|did| CrewMember {
                    id: did,
                    name: format!("Director {}", did),
                    job: "Director".to_string(),
                })
                .into_iter()
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_ranks_by_score_and_respects_limit() {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_fetch_detail()
            .with(eq(MovieId(1)))
            .returning(|_| Ok(detail(1, &[28, 878], Some(100), &[1, 2, 3])));
        // 4 candidates >= 2 * limit, so no discovery lookups happen
        provider
            .expect_similar_movies()
            .returning(|_| Ok(vec![movie(2), movie(3)]));
        provider
            .expect_recommended_movies()
            .returning(|_| Ok(vec![movie(4), movie(5)]));

        // Candidate 3 matches everything, 4 shares genres, 2 and 5 nothing
        provider
            .expect_fetch_detail()
            .with(eq(MovieId(2)))
            .returning(|_| Ok(detail(2, &[35], None, &[9])));
        provider
            .expect_fetch_detail()
            .with(eq(MovieId(3)))
            .returning(|_| Ok(detail(3, &[28, 878], Some(100), &[1, 2, 3])));
        provider
            .expect_fetch_detail()
            .with(eq(MovieId(4)))
            .returning(|_| Ok(detail(4, &[28, 878], None, &[])));
        provider
            .expect_fetch_detail()
            .with(eq(MovieId(5)))
            .returning(|_| Ok(detail(5, &[99], None, &[])));

        let provider: Arc<dyn MovieProvider> = Arc::new(provider);
        let ranked = recommend(provider, MovieId(1), 2).await.unwrap();

        assert_eq!(ranked.reference.id, MovieId(1));
        assert_eq!(ranked.related.len(), 2);
        assert_eq!(ranked.related[0].movie.id, MovieId(3));
        assert_eq!(ranked.related[1].movie.id, MovieId(4));
        assert!(ranked.related[0].score > ranked.related[1].score);
        for entry in &ranked.related {
            assert!((0.0..=1.0).contains(&entry.score));
        }
    }

    #[tokio::test]
    async fn test_failed_candidates_are_skipped() {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_fetch_detail()
            .with(eq(MovieId(1)))
            .returning(|_| Ok(detail(1, &[28], None, &[])));
        provider
            .expect_similar_movies()
            .returning(|_| Ok(vec![movie(2), movie(3)]));
        provider
            .expect_recommended_movies()
            .returning(|_| Ok(vec![]));

        provider
            .expect_fetch_detail()
            .with(eq(MovieId(2)))
            .returning(|_| Err(AppError::ExternalApi("timeout".to_string())));
        provider
            .expect_fetch_detail()
            .with(eq(MovieId(3)))
            .returning(|_| Ok(detail(3, &[28], None, &[])));

        let provider: Arc<dyn MovieProvider> = Arc::new(provider);
        let ranked = recommend(provider, MovieId(1), 1).await.unwrap();

        assert_eq!(ranked.related.len(), 1);
        assert_eq!(ranked.related[0].movie.id, MovieId(3));
    }

    #[tokio::test]
    async fn test_unknown_reference_propagates_not_found() {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_fetch_detail()
            .with(eq(MovieId(999)))
            .returning(|_| Err(AppError::NotFound("Movie 999 not found".to_string())));

        let provider: Arc<dyn MovieProvider> = Arc::new(provider);
        let result = recommend(provider, MovieId(999), 5).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_pool_yields_empty_result() {
        let mut provider = MockMovieProvider::new();
        // Called once to hydrate the reference, once by the gatherer for its
        // genre list when topping up
        provider
            .expect_fetch_detail()
            .with(eq(MovieId(1)))
            .times(2)
            .returning(|_| Ok(detail(1, &[28], None, &[])));
        provider.expect_similar_movies().returning(|_| Ok(vec![]));
        provider
            .expect_recommended_movies()
            .returning(|_| Ok(vec![]));
        provider
            .expect_discover_by_genres()
            .returning(|_| Ok(vec![]));

        let provider: Arc<dyn MovieProvider> = Arc::new(provider);
        let ranked = recommend(provider, MovieId(1), 10).await.unwrap();

        assert!(ranked.related.is_empty());
    }

    #[tokio::test]
    async fn test_ties_keep_pool_order() {
        let mut provider = MockMovieProvider::new();
        // Reference hydration plus the gatherer's genre lookup for discovery
        provider
            .expect_fetch_detail()
            .with(eq(MovieId(1)))
            .times(2)
            .returning(|_| Ok(detail(1, &[28], None, &[])));
        provider
            .expect_similar_movies()
            .returning(|_| Ok(vec![movie(2), movie(3), movie(4)]));
        provider
            .expect_recommended_movies()
            .returning(|_| Ok(vec![movie(5)]));
        provider
            .expect_discover_by_genres()
            .returning(|_| Ok(vec![]));

        // All candidates score identically
        for id in 2..=5 {
            provider
                .expect_fetch_detail()
                .with(eq(MovieId(id)))
                .returning(move |_| Ok(detail(id, &[28], None, &[])));
        }

        let provider: Arc<dyn MovieProvider> = Arc::new(provider);
        let ranked = recommend(provider, MovieId(1), 4).await.unwrap();

        let ids: Vec<MovieId> = ranked.related.iter().map(|entry| entry.movie.id).collect();
        assert_eq!(ids, vec![MovieId(2), MovieId(3), MovieId(4), MovieId(5)]);
    }
}
