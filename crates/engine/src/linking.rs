//! Identity reconciliation across the three movie catalogs
//!
//! The collaborative engine speaks MovieLens ids, the content engine
//! speaks catalog row indices, and the link table joins them through
//! TMDB ids. Both hops are explicit and fallible: an id that fails to
//! resolve at either hop is silently dropped from the collaborative
//! contribution and never aborts a recommendation.

use crate::content_based::ContentSimilarityEngine;
use crate::dataset::LinkRow;
use cinematch_core::{ContentIndex, MovieLensId, TmdbId};
use std::collections::HashMap;
use tracing::info;

/// Cross-catalog link table
pub struct CatalogLinker {
    ml_to_tmdb: HashMap<MovieLensId, TmdbId>,
    tmdb_to_content: HashMap<TmdbId, ContentIndex>,
}

impl CatalogLinker {
    /// Build both mappings at load time. Links without a known TMDB id
    /// are filtered out; content rows are captured from the
    /// deduplicated catalog.
    pub fn build(links: &[LinkRow], content: &ContentSimilarityEngine) -> Self {
        let ml_to_tmdb: HashMap<MovieLensId, TmdbId> = links
            .iter()
            .filter_map(|link| {
                link.tmdb_id
                    .map(|tmdb| (MovieLensId(link.movie_id), TmdbId(tmdb)))
            })
            .collect();

        let tmdb_to_content: HashMap<TmdbId, ContentIndex> = ml_to_tmdb
            .values()
            .filter_map(|&tmdb| content.index_of_tmdb(tmdb).map(|idx| (tmdb, idx)))
            .collect();

        info!(
            linked = ml_to_tmdb.len(),
            resolvable = tmdb_to_content.len(),
            "Built cross-catalog link table"
        );

        Self {
            ml_to_tmdb,
            tmdb_to_content,
        }
    }

    /// MovieLens id -> TMDB id, if the link table knows it
    pub fn tmdb_of(&self, id: MovieLensId) -> Option<TmdbId> {
        self.ml_to_tmdb.get(&id).copied()
    }

    /// Resolve a MovieLens id all the way to a content catalog row.
    /// `None` at either hop means the id is unmappable.
    pub fn resolve(&self, id: MovieLensId) -> Option<ContentIndex> {
        let tmdb = self.tmdb_of(id)?;
        self.tmdb_to_content.get(&tmdb).copied()
    }
}
