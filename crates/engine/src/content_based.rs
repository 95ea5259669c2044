//! Content-based similarity engine
//!
//! Vectorizes movie profiles into a capped bag-of-terms space and holds
//! the dense pairwise cosine matrix, together with the title and TMDB-id
//! lookups into the deduplicated catalog.

use crate::stopwords;
use cinematch_core::{
    pairwise_cosine, CineMatchError, ContentIndex, MovieProfile, Result, TmdbId,
};
use ndarray::{Array2, ArrayView1};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Leading "12. " style numbering some source exports carry on titles
static TITLE_NUMBERING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("Failed to compile title numbering regex"));

static STOP_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| stopwords::ENGLISH.iter().copied().collect());

/// A movie retained in the content catalog after title dedup
#[derive(Debug, Clone)]
struct CatalogEntry {
    tmdb_id: TmdbId,
    title: String,
}

/// Content similarity engine
///
/// Immutable after construction; all queries are reads.
pub struct ContentSimilarityEngine {
    catalog: Vec<CatalogEntry>,
    title_index: HashMap<String, ContentIndex>,
    tmdb_index: HashMap<TmdbId, ContentIndex>,
    similarity: Array2<f32>,
}

impl ContentSimilarityEngine {
    /// Build the engine from movie profiles.
    ///
    /// Titles are cleaned of numbering prefixes and deduplicated with a
    /// keep-first policy: later rows with an already-seen title are
    /// dropped entirely before vectorization, so the matrix is sized to
    /// the deduplicated catalog.
    pub fn build(profiles: &[MovieProfile], vocabulary_size: usize) -> Result<Self> {
        let mut catalog = Vec::new();
        let mut kept_profiles = Vec::new();
        let mut seen = HashSet::new();

        for profile in profiles {
            let title = clean_title(&profile.title);
            if !seen.insert(title.clone()) {
                continue;
            }
            catalog.push(CatalogEntry {
                tmdb_id: profile.tmdb_id,
                title,
            });
            kept_profiles.push(profile.profile.as_str());
        }

        if catalog.is_empty() {
            return Err(CineMatchError::EmptyCatalog("content"));
        }

        let counts = vectorize(&kept_profiles, vocabulary_size);
        let similarity = pairwise_cosine(&counts);
        info!(
            movies = catalog.len(),
            terms = counts.ncols(),
            "Built content similarity matrix"
        );

        Ok(Self::assemble(catalog, similarity))
    }

    /// Build the engine around a precomputed similarity matrix.
    ///
    /// `entries` must already be deduplicated and aligned with the
    /// matrix rows.
    pub fn from_precomputed(
        entries: Vec<(TmdbId, String)>,
        similarity: Array2<f32>,
    ) -> Result<Self> {
        if entries.is_empty() {
            return Err(CineMatchError::EmptyCatalog("content"));
        }
        if similarity.nrows() != entries.len() || similarity.ncols() != entries.len() {
            return Err(CineMatchError::MatrixShape {
                rows: similarity.nrows(),
                cols: similarity.ncols(),
                expected: entries.len(),
            });
        }

        let catalog = entries
            .into_iter()
            .map(|(tmdb_id, title)| CatalogEntry {
                tmdb_id,
                title: clean_title(&title),
            })
            .collect();
        Ok(Self::assemble(catalog, similarity))
    }

    fn assemble(catalog: Vec<CatalogEntry>, similarity: Array2<f32>) -> Self {
        let mut title_index = HashMap::new();
        let mut tmdb_index = HashMap::new();
        for (i, entry) in catalog.iter().enumerate() {
            // Keep-first on both lookups
            title_index
                .entry(entry.title.clone())
                .or_insert(ContentIndex(i));
            tmdb_index.entry(entry.tmdb_id).or_insert(ContentIndex(i));
        }

        Self {
            catalog,
            title_index,
            tmdb_index,
            similarity,
        }
    }

    /// Resolve an exact title to its catalog row. Absent titles are
    /// `None`, never an error.
    pub fn index_of(&self, title: &str) -> Option<ContentIndex> {
        self.title_index.get(title).copied()
    }

    /// Resolve a TMDB id to its catalog row
    pub fn index_of_tmdb(&self, id: TmdbId) -> Option<ContentIndex> {
        self.tmdb_index.get(&id).copied()
    }

    /// Full similarity row for a catalog entry: one score per candidate
    pub fn similarity_row(&self, index: ContentIndex) -> ArrayView1<f32> {
        self.similarity.row(index.0)
    }

    /// Title of a catalog row
    pub fn title(&self, index: ContentIndex) -> &str {
        &self.catalog[index.0].title
    }

    /// All catalog titles in row order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.catalog.iter().map(|e| e.title.as_str())
    }

    /// Number of movies in the deduplicated catalog
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}

/// Strip a leading "N. " numbering prefix from a title
fn clean_title(title: &str) -> String {
    TITLE_NUMBERING.replace(title, "").into_owned()
}

/// Alphanumeric runs of length >= 2, lower-cased, stop words excluded
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Count-vectorize documents over a frequency-capped vocabulary
///
/// The vocabulary is the `vocabulary_size` most frequent terms across
/// the corpus (ties broken alphabetically); cell values are raw counts.
fn vectorize(documents: &[&str], vocabulary_size: usize) -> Array2<f32> {
    let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();

    let mut corpus_counts: HashMap<&str, u64> = HashMap::new();
    for doc in &tokenized {
        for token in doc {
            *corpus_counts.entry(token.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, u64)> = corpus_counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(vocabulary_size);

    let vocabulary: HashMap<&str, usize> = ranked
        .iter()
        .enumerate()
        .map(|(col, (term, _))| (*term, col))
        .collect();

    let mut counts = Array2::<f32>::zeros((documents.len(), vocabulary.len()));
    for (row, doc) in tokenized.iter().enumerate() {
        for token in doc {
            if let Some(&col) = vocabulary.get(token.as_str()) {
                counts[[row, col]] += 1.0;
            }
        }
    }
    counts
}
