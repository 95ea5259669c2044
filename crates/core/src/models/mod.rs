//! Domain models for the CineMatch recommender

pub mod movie;
pub mod rating;

pub use movie::{ContentIndex, MovieLensId, MovieLensMovie, MovieProfile, TmdbId};
pub use rating::{Rating, UserId};
