use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// TMDB-assigned movie identifier
///
/// Opaque and never generated locally; TMDB guarantees ids are not reused
/// across distinct movies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A genre as reported by TMDB (id + display name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// A cast credit, in provider billing order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
}

/// A crew credit (job is free text, e.g. "Director")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    pub job: String,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw movie entry from TMDB list endpoints (search, similar, recommendations,
/// discover)
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
}

/// Raw paged list response from TMDB
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage {
    /// Kept as raw JSON so one malformed entry can be skipped without
    /// discarding the whole page.
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
    #[serde(default)]
    pub total_results: u64,
}

/// Embedded credits payload from `append_to_response=credits`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

/// Raw response from the TMDB single-movie endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub credits: TmdbCredits,
}

// ============================================================================
// Domain Types
// ============================================================================

/// Movie summary returned to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub poster_url: Option<String>,
}

impl Movie {
    /// Converts a raw TMDB list entry, deriving the full poster URL
    pub fn from_tmdb(raw: TmdbMovie, image_base_url: &str) -> Self {
        let poster_url = raw
            .poster_path
            .as_deref()
            .map(|path| format!("{}{}", image_base_url, path));

        Self {
            id: raw.id,
            title: raw.title,
            overview: raw.overview,
            poster_path: raw.poster_path,
            release_date: none_if_empty(raw.release_date),
            vote_average: raw.vote_average,
            vote_count: raw.vote_count,
            poster_url,
        }
    }
}

/// Fully hydrated movie record, including genres and credits
///
/// Built fresh from an upstream call every time it is needed; nothing is
/// cached across requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub poster_url: Option<String>,
    pub genres: Vec<Genre>,
    /// Billing order from TMDB; not guaranteed stable across calls
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}

impl MovieDetail {
    /// Converts a raw TMDB detail payload, deriving the full poster URL
    pub fn from_tmdb(raw: TmdbMovieDetails, image_base_url: &str) -> Self {
        let poster_url = raw
            .poster_path
            .as_deref()
            .map(|path| format!("{}{}", image_base_url, path));

        Self {
            id: raw.id,
            title: raw.title,
            overview: raw.overview,
            poster_path: raw.poster_path,
            release_date: none_if_empty(raw.release_date),
            vote_average: raw.vote_average,
            vote_count: raw.vote_count,
            poster_url,
            genres: raw.genres,
            cast: raw.credits.cast,
            crew: raw.credits.crew,
        }
    }

    /// The movie's director: first crew member credited with the "Director"
    /// job, if any
    pub fn director(&self) -> Option<&CrewMember> {
        self.crew.iter().find(|member| member.job == "Director")
    }

    /// Drops credits and genres down to the client-facing summary
    pub fn summary(&self) -> Movie {
        Movie {
            id: self.id,
            title: self.title.clone(),
            overview: self.overview.clone(),
            poster_path: self.poster_path.clone(),
            release_date: self.release_date.clone(),
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            poster_url: self.poster_url.clone(),
        }
    }
}

// TMDB reports missing release dates as "" on some list endpoints
fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for the movie search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieSearchResponse {
    pub results: Vec<Movie>,
    pub total_results: u64,
}

/// A related movie with its similarity to the central movie, used as an edge
/// weight by the graph front end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedMovie {
    #[serde(flatten)]
    pub movie: Movie,
    pub similarity: f64,
}

/// A movie and its ranked related movies for network visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieNetwork {
    pub central_movie: Movie,
    pub related_movies: Vec<RelatedMovie>,
}
