//! Collaborative similarity engine
//!
//! Pivots raw ratings into a user-item matrix and holds the dense
//! item-item cosine matrix. Unobserved cells are treated as 0 when
//! computing similarity: zero is "no signal", not "dislike", and the
//! choice changes the magnitude of the computed similarities, not just
//! their presence.

use cinematch_core::{
    pairwise_cosine, CineMatchError, MovieLensId, MovieLensMovie, Rating, Result, UserId,
};
use ndarray::Array2;
use std::collections::{BTreeSet, HashMap};
use tracing::info;

/// Collaborative similarity engine
///
/// Immutable after construction; all queries are reads.
pub struct CollaborativeSimilarityEngine {
    /// MovieLens catalog in input order (containment matching order)
    movies: Vec<MovieLensMovie>,
    /// Column order of the similarity matrix
    column_ids: Vec<MovieLensId>,
    column_index: HashMap<MovieLensId, usize>,
    /// Item-item cosine matrix, indexed by column order
    similarity: Array2<f32>,
    neighborhood_size: usize,
}

impl CollaborativeSimilarityEngine {
    /// Build the engine from raw ratings and the MovieLens catalog.
    ///
    /// Users and movie ids are assigned rows/columns in ascending id
    /// order; only movies with at least one rating get a column.
    pub fn build(
        ratings: &[Rating],
        movies: Vec<MovieLensMovie>,
        neighborhood_size: usize,
    ) -> Result<Self> {
        if ratings.is_empty() {
            return Err(CineMatchError::EmptyCatalog("ratings"));
        }

        let user_ids: BTreeSet<UserId> = ratings.iter().map(|r| r.user_id).collect();
        let movie_ids: BTreeSet<MovieLensId> = ratings.iter().map(|r| r.movie_id).collect();

        let user_row: HashMap<UserId, usize> =
            user_ids.iter().enumerate().map(|(i, &u)| (u, i)).collect();
        let column_ids: Vec<MovieLensId> = movie_ids.into_iter().collect();
        let column_index: HashMap<MovieLensId, usize> = column_ids
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();

        // Items as rows so pairwise cosine runs over item vectors
        let mut item_matrix = Array2::<f32>::zeros((column_ids.len(), user_ids.len()));
        for rating in ratings {
            let row = column_index[&rating.movie_id];
            let col = user_row[&rating.user_id];
            item_matrix[[row, col]] = rating.value;
        }

        let similarity = pairwise_cosine(&item_matrix);
        info!(
            items = column_ids.len(),
            users = user_ids.len(),
            "Built collaborative similarity matrix"
        );

        Ok(Self {
            movies,
            column_ids,
            column_index,
            similarity,
            neighborhood_size,
        })
    }

    /// Build the engine around a precomputed item-item matrix
    pub fn from_precomputed(
        movies: Vec<MovieLensMovie>,
        column_ids: Vec<MovieLensId>,
        similarity: Array2<f32>,
        neighborhood_size: usize,
    ) -> Result<Self> {
        if similarity.nrows() != column_ids.len() || similarity.ncols() != column_ids.len() {
            return Err(CineMatchError::MatrixShape {
                rows: similarity.nrows(),
                cols: similarity.ncols(),
                expected: column_ids.len(),
            });
        }
        let column_index = column_ids
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();
        Ok(Self {
            movies,
            column_ids,
            column_index,
            similarity,
            neighborhood_size,
        })
    }

    /// Resolve a query title by case-insensitive substring containment,
    /// first match in catalog order. No match is `None`, not an error.
    pub fn resolve_title(&self, query: &str) -> Option<MovieLensId> {
        let needle = query.to_lowercase();
        self.movies
            .iter()
            .find(|m| m.title.to_lowercase().contains(&needle))
            .map(|m| m.id)
    }

    /// Most similar items to the query title, as `(id, similarity)`
    /// pairs in descending order, query item excluded, capped at the
    /// neighborhood size.
    ///
    /// An unresolvable title, or one with no rated column, yields an
    /// empty neighborhood.
    pub fn neighbors(&self, query: &str) -> Vec<(MovieLensId, f32)> {
        let Some(movie_id) = self.resolve_title(query) else {
            return Vec::new();
        };
        let Some(&column) = self.column_index.get(&movie_id) else {
            return Vec::new();
        };

        let row = self.similarity.row(column);
        let mut scored: Vec<(usize, f32)> = row.iter().copied().enumerate().collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        scored
            .into_iter()
            .filter(|&(i, _)| i != column)
            .take(self.neighborhood_size)
            .map(|(i, score)| (self.column_ids[i], score))
            .collect()
    }

    /// Number of items with at least one rating
    pub fn len(&self) -> usize {
        self.column_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.column_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u32, title: &str) -> MovieLensMovie {
        MovieLensMovie {
            id: MovieLensId(id),
            title: title.to_string(),
        }
    }

    fn rating(user: u32, movie: u32, value: f32) -> Rating {
        Rating {
            user_id: UserId(user),
            movie_id: MovieLensId(movie),
            value,
        }
    }

    fn fixture() -> CollaborativeSimilarityEngine {
        // Users 1 and 2 rate movies 10 and 20 identically; movie 30 is
        // rated by user 3 only.
        let ratings = vec![
            rating(1, 10, 5.0),
            rating(1, 20, 5.0),
            rating(2, 10, 4.0),
            rating(2, 20, 4.0),
            rating(3, 30, 3.0),
        ];
        let movies = vec![
            movie(10, "Toy Story (1995)"),
            movie(20, "Toy Story 2 (1999)"),
            movie(30, "Heat (1995)"),
        ];
        CollaborativeSimilarityEngine::build(&ratings, movies, 10).unwrap()
    }

    #[test]
    fn test_matrix_size_is_rated_items() {
        let engine = fixture();
        assert_eq!(engine.len(), 3);
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let engine = fixture();
        for i in 0..engine.len() {
            for j in 0..engine.len() {
                let ij = engine.similarity[[i, j]];
                let ji = engine.similarity[[j, i]];
                assert!((ij - ji).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_identical_rating_columns_are_fully_similar() {
        let engine = fixture();
        // Movies 10 and 20 have proportional rating vectors
        assert!((engine.similarity[[0, 1]] - 1.0).abs() < 1e-5);
        // Movie 30 shares no raters with movie 10
        assert!(engine.similarity[[0, 2]].abs() < 1e-6);
    }

    #[test]
    fn test_resolve_title_containment_first_match() {
        let engine = fixture();
        // "toy story" is contained in both titles; catalog order wins
        assert_eq!(engine.resolve_title("toy story"), Some(MovieLensId(10)));
        assert_eq!(engine.resolve_title("TOY STORY 2"), Some(MovieLensId(20)));
        assert_eq!(engine.resolve_title("heat"), Some(MovieLensId(30)));
        assert_eq!(engine.resolve_title("nonexistent"), None);
    }

    #[test]
    fn test_neighbors_exclude_self_and_rank_desc() {
        let engine = fixture();
        let neighbors = engine.neighbors("Toy Story (1995)");
        assert!(!neighbors.is_empty());
        assert!(neighbors.iter().all(|&(id, _)| id != MovieLensId(10)));
        assert_eq!(neighbors[0].0, MovieLensId(20));
        for pair in neighbors.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn test_neighbors_unresolvable_title_is_empty() {
        let engine = fixture();
        assert!(engine.neighbors("no such movie").is_empty());
    }

    #[test]
    fn test_neighbors_title_without_rated_column_is_empty() {
        let ratings = vec![rating(1, 10, 5.0), rating(2, 10, 3.0)];
        let movies = vec![movie(10, "Rated (1995)"), movie(99, "Unrated (2001)")];
        let engine = CollaborativeSimilarityEngine::build(&ratings, movies, 10).unwrap();
        assert!(engine.neighbors("Unrated").is_empty());
    }

    #[test]
    fn test_neighborhood_cap() {
        let mut ratings = Vec::new();
        let mut movies = Vec::new();
        for m in 1..=15u32 {
            ratings.push(rating(1, m, 4.0));
            movies.push(movie(m, &format!("Movie {m} (2000)")));
        }
        let engine = CollaborativeSimilarityEngine::build(&ratings, movies, 10).unwrap();
        assert_eq!(engine.neighbors("Movie 1 ").len(), 10);
    }

    #[test]
    fn test_empty_ratings_is_fatal() {
        let movies = vec![movie(1, "Lonely (2001)")];
        assert!(CollaborativeSimilarityEngine::build(&[], movies, 10).is_err());
    }
}
