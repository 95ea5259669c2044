//! CineMatch Recommendation Engine
//!
//! Blends two similarity signals into one ranked list of movies:
//! a content signal computed from bag-of-terms movie profiles, and a
//! collaborative signal computed from MovieLens rating patterns. The
//! two catalogs use different identifier spaces and are reconciled
//! through the TMDB id carried by the link table.
//!
//! All matrices are built once at load time; every query afterwards is
//! a pure read over immutable state.

pub mod collaborative;
pub mod content_based;
pub mod dataset;
pub mod hybrid;
pub mod linking;
pub mod profile;
pub mod routes;
mod stopwords;

// Re-export key types
pub use collaborative::CollaborativeSimilarityEngine;
pub use content_based::ContentSimilarityEngine;
pub use dataset::Dataset;
pub use hybrid::{HybridRecommender, MAX_RECOMMENDATIONS};
pub use linking::CatalogLinker;
pub use profile::build_profiles;
