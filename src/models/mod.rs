mod movie;
mod status;

pub use movie::{
    CastMember, CrewMember, Genre, Movie, MovieDetail, MovieId, MovieNetwork, MovieSearchResponse,
    RelatedMovie, TmdbCredits, TmdbMovie, TmdbMovieDetails, TmdbPage,
};
pub use status::{StatusCheck, StatusCheckCreate};
