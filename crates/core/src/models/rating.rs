//! Rating models

use crate::models::movie::MovieLensId;
use serde::{Deserialize, Serialize};

/// MovieLens user id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

/// A single user rating of a movie
///
/// Ratings are consumed only in aggregate to build the user-item matrix;
/// they are not retained afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieLensId,
    pub value: f32,
}
