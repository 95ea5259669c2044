//! Configuration loading for CineMatch services
//!
//! Unified configuration loading with environment variable parsing,
//! validation, and `.env` file support. All configuration uses the
//! `CINEMATCH_` prefix for environment variables.
//!
//! Override hierarchy: defaults < .env < environment.

use crate::error::{CineMatchError, Result};
use std::path::PathBuf;

/// Load a `.env` file if one is present. Missing files are fine.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Configuration loader trait
///
/// Standardized methods for loading and validating configuration from
/// environment variables.
pub trait ConfigLoader: Sized {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    fn from_env() -> Result<Self>;

    /// Validate configuration values.
    fn validate(&self) -> Result<()>;
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| CineMatchError::Configuration(format!("invalid value for {key}: {raw}"))),
        Err(_) => Ok(None),
    }
}

/// Locations of the five source tables the engine is built from
///
/// # Environment Variables
///
/// - `CINEMATCH_DATA_DIR` (optional): directory holding the CSV tables
///   (default: `data`)
#[derive(Debug, Clone)]
pub struct DataConfig {
    /// Directory containing the source CSV tables
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

impl DataConfig {
    /// TMDB movie metadata (id, title, genres, keywords, overview)
    pub fn movies_path(&self) -> PathBuf {
        self.data_dir.join("tmdb_5000_movies.csv")
    }

    /// TMDB credits (cast and crew per movie)
    pub fn credits_path(&self) -> PathBuf {
        self.data_dir.join("tmdb_5000_credits.csv")
    }

    /// MovieLens ratings (userId, movieId, rating)
    pub fn ratings_path(&self) -> PathBuf {
        self.data_dir.join("ratings.csv")
    }

    /// MovieLens movie catalog (movieId, title)
    pub fn movielens_movies_path(&self) -> PathBuf {
        self.data_dir.join("movies.csv")
    }

    /// MovieLens -> TMDB link table
    pub fn links_path(&self) -> PathBuf {
        self.data_dir.join("links.csv")
    }
}

impl ConfigLoader for DataConfig {
    fn from_env() -> Result<Self> {
        let data_dir = std::env::var("CINEMATCH_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default().data_dir);
        Ok(Self { data_dir })
    }

    fn validate(&self) -> Result<()> {
        if !self.data_dir.is_dir() {
            return Err(CineMatchError::Configuration(format!(
                "data directory does not exist: {}",
                self.data_dir.display()
            )));
        }
        Ok(())
    }
}

/// Tunables for the recommendation engine
///
/// # Environment Variables
///
/// - `CINEMATCH_DEFAULT_ALPHA` (optional): content weight in [0, 1]
///   (default: 0.6)
/// - `CINEMATCH_VOCABULARY_SIZE` (optional): bag-of-terms vocabulary cap
///   (default: 5000)
/// - `CINEMATCH_NEIGHBORHOOD_SIZE` (optional): collaborative neighbors
///   considered per query (default: 10)
/// - `CINEMATCH_WEIGHTED_COLLABORATIVE` (optional): carry the real
///   collaborative similarity through the blend instead of a uniform
///   credit (default: false)
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Weight given to the content signal; collaborative weight is `1 - alpha`
    pub default_alpha: f32,
    /// Maximum number of vocabulary terms for the content vectorizer
    pub vocabulary_size: usize,
    /// Collaborative neighborhood size per query
    pub neighborhood_size: usize,
    /// Use the collaborative similarity magnitude instead of a uniform credit
    pub weighted_collaborative: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_alpha: 0.6,
            vocabulary_size: 5000,
            neighborhood_size: 10,
            weighted_collaborative: false,
        }
    }
}

impl ConfigLoader for EngineConfig {
    fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            default_alpha: env_parse("CINEMATCH_DEFAULT_ALPHA")?.unwrap_or(defaults.default_alpha),
            vocabulary_size: env_parse("CINEMATCH_VOCABULARY_SIZE")?
                .unwrap_or(defaults.vocabulary_size),
            neighborhood_size: env_parse("CINEMATCH_NEIGHBORHOOD_SIZE")?
                .unwrap_or(defaults.neighborhood_size),
            weighted_collaborative: env_parse("CINEMATCH_WEIGHTED_COLLABORATIVE")?
                .unwrap_or(defaults.weighted_collaborative),
        })
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.default_alpha) {
            return Err(CineMatchError::Configuration(format!(
                "default_alpha must be in [0, 1], got {}",
                self.default_alpha
            )));
        }
        if self.vocabulary_size == 0 {
            return Err(CineMatchError::Configuration(
                "vocabulary_size must be positive".to_string(),
            ));
        }
        if self.neighborhood_size == 0 {
            return Err(CineMatchError::Configuration(
                "neighborhood_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// HTTP service configuration
///
/// # Environment Variables
///
/// - `CINEMATCH_HOST` (optional): bind address (default: `0.0.0.0`)
/// - `CINEMATCH_PORT` (optional): bind port (default: 8082)
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8082,
        }
    }
}

impl ConfigLoader for ServiceConfig {
    fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            host: std::env::var("CINEMATCH_HOST").unwrap_or(defaults.host),
            port: env_parse("CINEMATCH_PORT")?.unwrap_or(defaults.port),
        })
    }

    fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(CineMatchError::Configuration(
                "host must not be empty".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(CineMatchError::Configuration(
                "port must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
