//! Movie models and typed identifiers
//!
//! The recommender bridges four distinct identifier spaces: content
//! catalog row indices, MovieLens movie ids, TMDB catalog ids, and
//! title strings. The first three are newtypes so a value from one
//! space can never stand in for another; every cross-space hop goes
//! through an explicit, fallible lookup.

use serde::{Deserialize, Serialize};

/// TMDB catalog id, the join key between the content catalog and the
/// MovieLens link table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TmdbId(pub u64);

/// MovieLens movie id, the item key of the rating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieLensId(pub u32);

/// Row index into the deduplicated content catalog, `[0..N)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentIndex(pub usize);

/// A movie's normalized text profile, the output of the profile builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieProfile {
    pub tmdb_id: TmdbId,
    pub title: String,
    /// Synopsis tokens followed by genre, keyword, cast and director
    /// tokens, space-joined
    pub profile: String,
}

/// An entry in the MovieLens movie catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieLensMovie {
    pub id: MovieLensId,
    pub title: String,
}
