//! Source table loading
//!
//! The engine is built from five CSV tables: TMDB movie metadata, TMDB
//! credits, MovieLens ratings, the MovieLens movie catalog, and the
//! MovieLens-to-TMDB link table. A missing or unreadable file is fatal
//! (the engine cannot serve without its matrices); a malformed row in
//! the metadata tables is skipped with a warning.

use cinematch_core::{
    CineMatchError, DataConfig, MovieLensId, MovieLensMovie, Rating, Result, UserId,
};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Row of `tmdb_5000_movies.csv`. The structured columns hold JSON
/// arrays; they stay raw strings here and are parsed leniently by the
/// profile builder.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieRow {
    pub id: u64,
    #[serde(rename = "original_title")]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub keywords: String,
}

/// Row of `tmdb_5000_credits.csv`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCreditsRow {
    pub movie_id: u64,
    #[serde(default)]
    pub cast: String,
    #[serde(default)]
    pub crew: String,
}

/// Row of `ratings.csv`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RatingRow {
    #[serde(rename = "userId")]
    pub user_id: u32,
    #[serde(rename = "movieId")]
    pub movie_id: u32,
    pub rating: f32,
}

impl From<&RatingRow> for Rating {
    fn from(row: &RatingRow) -> Self {
        Self {
            user_id: UserId(row.user_id),
            movie_id: MovieLensId(row.movie_id),
            value: row.rating,
        }
    }
}

/// Row of `movies.csv` (MovieLens catalog)
#[derive(Debug, Clone, Deserialize)]
pub struct MovieLensRow {
    #[serde(rename = "movieId")]
    pub movie_id: u32,
    pub title: String,
}

impl From<&MovieLensRow> for MovieLensMovie {
    fn from(row: &MovieLensRow) -> Self {
        Self {
            id: MovieLensId(row.movie_id),
            title: row.title.clone(),
        }
    }
}

/// Row of `links.csv`. An absent TMDB id deserializes to `None` and is
/// filtered out by the linker.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LinkRow {
    #[serde(rename = "movieId")]
    pub movie_id: u32,
    #[serde(rename = "tmdbId")]
    pub tmdb_id: Option<u64>,
}

/// In-memory aggregate of the five source tables
#[derive(Debug, Clone)]
pub struct Dataset {
    pub movies: Vec<TmdbMovieRow>,
    pub credits: Vec<TmdbCreditsRow>,
    pub ratings: Vec<RatingRow>,
    pub movielens_movies: Vec<MovieLensRow>,
    pub links: Vec<LinkRow>,
}

impl Dataset {
    /// Load all five source tables from the configured data directory
    pub fn load(config: &DataConfig) -> Result<Self> {
        let movies = read_table(&config.movies_path())?;
        let credits = read_table(&config.credits_path())?;
        let ratings = read_table(&config.ratings_path())?;
        let movielens_movies = read_table(&config.movielens_movies_path())?;
        let links = read_table(&config.links_path())?;

        info!(
            movies = movies.len(),
            credits = credits.len(),
            ratings = ratings.len(),
            movielens = movielens_movies.len(),
            links = links.len(),
            "Loaded source tables"
        );

        Ok(Self {
            movies,
            credits,
            ratings,
            movielens_movies,
            links,
        })
    }
}

/// Read one CSV table, skipping rows that fail to deserialize
fn read_table<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    let path_str = path.display().to_string();
    let mut reader = csv::Reader::from_path(path).map_err(|source| CineMatchError::Dataset {
        path: path_str.clone(),
        source,
    })?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => warn!(path = %path_str, error = %e, "Skipping malformed row"),
        }
    }
    Ok(rows)
}
