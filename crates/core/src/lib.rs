//! # CineMatch Core
//!
//! Shared building blocks for the CineMatch hybrid movie recommender.
//!
//! ## Modules
//!
//! - `config`: Configuration loading and validation
//! - `error`: Error types and handling
//! - `math`: Vector operations and pairwise cosine similarity
//! - `models`: Domain models and typed identifiers

pub mod config;
pub mod error;
pub mod math;
pub mod models;

// Re-export commonly used types
pub use config::{load_dotenv, ConfigLoader, DataConfig, EngineConfig, ServiceConfig};
pub use error::{CineMatchError, Result};
pub use math::{cosine_similarity, dot_product, pairwise_cosine};
pub use models::{
    ContentIndex, MovieLensId, MovieLensMovie, MovieProfile, Rating, TmdbId, UserId,
};
