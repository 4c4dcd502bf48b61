//! Hybrid similarity scoring between two hydrated movies.
//!
//! The score is a weighted sum of independent signals. A signal only
//! contributes when both movies carry the relevant data; absent data counts
//! as zero, not as a penalty.

use std::collections::HashSet;

use crate::models::MovieDetail;

const GENRE_WEIGHT: f64 = 0.40;
const DIRECTOR_WEIGHT: f64 = 0.25;
const CAST_WEIGHT: f64 = 0.15;

/// Remaining 0.20 of the nominal 1.0 ceiling is reserved for a
/// provider-native similarity signal that is not wired in yet, so in
/// practice scores top out at 0.80.
#[allow(dead_code)]
const PROVIDER_SIGNAL_WEIGHT: f64 = 0.20;

/// Cast entries considered "top billed" on each side
const TOP_BILLED_COUNT: usize = 10;

/// Shared top-billed actors at which the cast term saturates
const SHARED_CAST_SATURATION: f64 = 5.0;

/// Computes the similarity of `candidate` to `reference`, in [0, 1]
///
/// Pure and deterministic; identical inputs always produce identical output.
pub fn score(reference: &MovieDetail, candidate: &MovieDetail) -> f64 {
    let total = genre_term(reference, candidate)
        + director_term(reference, candidate)
        + cast_term(reference, candidate);

    // Safety net only; the weights above sum to 0.80
    total.min(1.0)
}

/// Genre overlap, normalized by the larger genre list
fn genre_term(reference: &MovieDetail, candidate: &MovieDetail) -> f64 {
    let reference_genres: HashSet<u64> = reference.genres.iter().map(|g| g.id).collect();
    let candidate_genres: HashSet<u64> = candidate.genres.iter().map(|g| g.id).collect();

    if reference_genres.is_empty() || candidate_genres.is_empty() {
        return 0.0;
    }

    let shared = reference_genres.intersection(&candidate_genres).count();
    let larger = reference_genres.len().max(candidate_genres.len());

    GENRE_WEIGHT * shared as f64 / larger as f64
}

/// Full weight when both movies resolve to the same director
fn director_term(reference: &MovieDetail, candidate: &MovieDetail) -> f64 {
    match (reference.director(), candidate.director()) {
        (Some(a), Some(b)) if a.id == b.id => DIRECTOR_WEIGHT,
        _ => 0.0,
    }
}

/// Shared top-billed actors, saturating at five
fn cast_term(reference: &MovieDetail, candidate: &MovieDetail) -> f64 {
    let reference_cast: HashSet<u64> = reference
        .cast
        .iter()
        .take(TOP_BILLED_COUNT)
        .map(|c| c.id)
        .collect();
    let candidate_cast: HashSet<u64> = candidate
        .cast
        .iter()
        .take(TOP_BILLED_COUNT)
        .map(|c| c.id)
        .collect();

    if reference_cast.is_empty() || candidate_cast.is_empty() {
        return 0.0;
    }

    let shared = reference_cast.intersection(&candidate_cast).count();

    CAST_WEIGHT * (shared as f64 / SHARED_CAST_SATURATION).min(1.0)
}
