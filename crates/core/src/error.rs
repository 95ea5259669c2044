//! Error types for the CineMatch recommender
//!
//! Construction of the engine (reading source tables, building matrices)
//! is the only fallible phase. Query-time lookups degrade to empty
//! results instead of surfacing errors.

/// Common error type for CineMatch crates
#[derive(Debug, thiserror::Error)]
pub enum CineMatchError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to read dataset {path}: {source}")]
    Dataset {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Catalog is empty: {0}")]
    EmptyCatalog(&'static str),

    #[error("Similarity matrix shape {rows}x{cols} does not match catalog size {expected}")]
    MatrixShape {
        rows: usize,
        cols: usize,
        expected: usize,
    },
}

pub type Result<T> = std::result::Result<T, CineMatchError>;
