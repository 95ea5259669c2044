//! Hybrid recommendation scorer
//!
//! Blends the content similarity row for a query title with a
//! collaborative neighborhood resolved into content-catalog space:
//! `score(i) = alpha * content(i) + (1 - alpha) * cf(i)`.
//!
//! Nothing on the scoring path returns an error; absent data at any
//! stage degrades to an empty contribution, and the worst observable
//! outcome is an empty result list.

use crate::collaborative::CollaborativeSimilarityEngine;
use crate::content_based::ContentSimilarityEngine;
use crate::dataset::Dataset;
use crate::linking::CatalogLinker;
use crate::profile::build_profiles;
use cinematch_core::{ContentIndex, DataConfig, EngineConfig, MovieLensMovie, Rating, Result};
use std::collections::HashMap;
use tracing::{debug, info};

/// Maximum number of titles returned per query
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Hybrid recommender over immutable precomputed matrices
///
/// Construct once (the one fallible, I/O-bound phase) and share across
/// requests; every query afterwards is a pure in-memory read.
pub struct HybridRecommender {
    content: ContentSimilarityEngine,
    collaborative: CollaborativeSimilarityEngine,
    linker: CatalogLinker,
    default_alpha: f32,
    weighted_collaborative: bool,
}

impl HybridRecommender {
    /// Load the source tables and build all matrices and mappings
    pub fn load(data: &DataConfig, config: &EngineConfig) -> Result<Self> {
        let dataset = Dataset::load(data)?;
        Self::from_dataset(&dataset, config)
    }

    /// Build the engine from an already-loaded dataset
    pub fn from_dataset(dataset: &Dataset, config: &EngineConfig) -> Result<Self> {
        let profiles = build_profiles(&dataset.movies, &dataset.credits);
        let content = ContentSimilarityEngine::build(&profiles, config.vocabulary_size)?;
        let ratings: Vec<Rating> = dataset.ratings.iter().map(Rating::from).collect();
        let catalog: Vec<MovieLensMovie> = dataset
            .movielens_movies
            .iter()
            .map(MovieLensMovie::from)
            .collect();
        let collaborative =
            CollaborativeSimilarityEngine::build(&ratings, catalog, config.neighborhood_size)?;
        let linker = CatalogLinker::build(&dataset.links, &content);

        info!(
            content_movies = content.len(),
            collaborative_items = collaborative.len(),
            "Hybrid recommender ready"
        );

        Ok(Self::from_parts(content, collaborative, linker, config))
    }

    /// Assemble the recommender from prebuilt components
    pub fn from_parts(
        content: ContentSimilarityEngine,
        collaborative: CollaborativeSimilarityEngine,
        linker: CatalogLinker,
        config: &EngineConfig,
    ) -> Self {
        Self {
            content,
            collaborative,
            linker,
            default_alpha: config.default_alpha,
            weighted_collaborative: config.weighted_collaborative,
        }
    }

    /// Recommend up to ten titles similar to `title`.
    ///
    /// `alpha` is the content weight, clamped to [0, 1]; the
    /// collaborative weight is `1 - alpha`. A title absent from the
    /// content catalog yields an empty list.
    pub fn recommend(&self, title: &str, alpha: f32) -> Vec<String> {
        let alpha = alpha.clamp(0.0, 1.0);

        let Some(query_index) = self.content.index_of(title) else {
            debug!(title, "Query title not in content catalog");
            return Vec::new();
        };

        let content_row = self.content.similarity_row(query_index);
        let cf_scores = self.collaborative_contributions(title);

        let mut scored: Vec<(usize, f32)> = content_row
            .iter()
            .enumerate()
            .map(|(i, &content_score)| {
                let cf = cf_scores.get(&ContentIndex(i)).copied().unwrap_or(0.0);
                (i, alpha * content_score + (1.0 - alpha) * cf)
            })
            .collect();

        // Stable sort keeps ties in row order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        scored
            .into_iter()
            .filter(|&(i, _)| i != query_index.0)
            .take(MAX_RECOMMENDATIONS)
            .map(|(i, _)| self.content.title(ContentIndex(i)).to_string())
            .collect()
    }

    /// All titles in the content catalog, in row order
    pub fn titles(&self) -> Vec<&str> {
        self.content.titles().collect()
    }

    pub fn default_alpha(&self) -> f32 {
        self.default_alpha
    }

    /// Collaborative contributions keyed by content row.
    ///
    /// Each collaborative neighbor is resolved through the link table;
    /// unresolvable ids are dropped silently. By default every linked
    /// neighbor gets a uniform 1.0 credit regardless of its similarity
    /// magnitude; with `weighted_collaborative` the actual cosine score
    /// is carried through instead.
    fn collaborative_contributions(&self, title: &str) -> HashMap<ContentIndex, f32> {
        let mut contributions = HashMap::new();
        for (neighbor, similarity) in self.collaborative.neighbors(title) {
            let Some(content_index) = self.linker.resolve(neighbor) else {
                continue;
            };
            let value = if self.weighted_collaborative {
                similarity
            } else {
                1.0
            };
            contributions.entry(content_index).or_insert(value);
        }
        contributions
    }
}
