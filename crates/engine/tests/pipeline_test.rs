//! End-to-end pipeline test: raw dataset rows through profile building,
//! both similarity matrices, identity reconciliation and the hybrid
//! blend.

use cinematch_core::{ContentIndex, EngineConfig};
use cinematch_engine::dataset::{
    Dataset, LinkRow, MovieLensRow, RatingRow, TmdbCreditsRow, TmdbMovieRow,
};
use cinematch_engine::{ContentSimilarityEngine, HybridRecommender};
use cinematch_engine::profile::build_profiles;

fn movie(id: u64, title: &str, overview: &str, genres: &str, keywords: &str) -> TmdbMovieRow {
    TmdbMovieRow {
        id,
        title: title.to_string(),
        overview: overview.to_string(),
        genres: genres.to_string(),
        keywords: keywords.to_string(),
    }
}

fn credits(movie_id: u64, cast: &str, crew: &str) -> TmdbCreditsRow {
    TmdbCreditsRow {
        movie_id,
        cast: cast.to_string(),
        crew: crew.to_string(),
    }
}

fn dataset() -> Dataset {
    Dataset {
        movies: vec![
            movie(
                862,
                "Toy Story",
                "A cowboy doll is profoundly threatened by a new spaceman figure.",
                r#"[{"id": 16, "name": "Animation"}, {"id": 35, "name": "Comedy"}]"#,
                r#"[{"id": 931, "name": "jealousy"}, {"id": 4290, "name": "toy"}]"#,
            ),
            movie(
                863,
                "Toy Story 2",
                "The toys mount a daring rescue of their kidnapped cowboy doll.",
                r#"[{"id": 16, "name": "Animation"}, {"id": 35, "name": "Comedy"}]"#,
                r#"[{"id": 4290, "name": "toy"}]"#,
            ),
            movie(
                603,
                "The Matrix",
                "A computer hacker learns about the true nature of reality.",
                r#"[{"id": 878, "name": "Science Fiction"}]"#,
                // Malformed on purpose: degrades to an empty keyword list
                "not valid json",
            ),
            // Duplicate title: must be dropped entirely, keep-first
            movie(
                9999,
                "Toy Story",
                "An impostor entry with a duplicate title.",
                "[]",
                "[]",
            ),
        ],
        credits: vec![
            credits(
                862,
                r#"[{"name": "Tom Hanks"}, {"name": "Tim Allen"}, {"name": "Don Rickles"}, {"name": "Jim Varney"}]"#,
                r#"[{"name": "John Lasseter", "job": "Director"}, {"name": "Joe Ranft", "job": "Story"}]"#,
            ),
            credits(
                863,
                r#"[{"name": "Tom Hanks"}, {"name": "Tim Allen"}]"#,
                r#"[{"name": "John Lasseter", "job": "Director"}, {"name": "Ash Brannon", "job": "Director"}]"#,
            ),
        ],
        ratings: vec![
            RatingRow { user_id: 1, movie_id: 1, rating: 5.0 },
            RatingRow { user_id: 1, movie_id: 3114, rating: 5.0 },
            RatingRow { user_id: 2, movie_id: 1, rating: 4.0 },
            RatingRow { user_id: 2, movie_id: 3114, rating: 4.5 },
            RatingRow { user_id: 3, movie_id: 2571, rating: 5.0 },
        ],
        movielens_movies: vec![
            MovieLensRow { movie_id: 1, title: "Toy Story (1995)".to_string() },
            MovieLensRow { movie_id: 3114, title: "Toy Story 2 (1999)".to_string() },
            MovieLensRow { movie_id: 2571, title: "Matrix, The (1999)".to_string() },
        ],
        links: vec![
            LinkRow { movie_id: 1, tmdb_id: Some(862) },
            LinkRow { movie_id: 3114, tmdb_id: Some(863) },
            // Unresolvable on purpose: no TMDB id in the link table
            LinkRow { movie_id: 2571, tmdb_id: None },
        ],
    }
}

#[test]
fn engine_builds_from_raw_tables() {
    let engine = HybridRecommender::from_dataset(&dataset(), &EngineConfig::default()).unwrap();
    // Duplicate "Toy Story" dropped: 4 raw rows, 3 catalog entries
    assert_eq!(engine.titles().len(), 3);
}

#[test]
fn duplicate_title_queries_use_the_first_row() {
    let engine = HybridRecommender::from_dataset(&dataset(), &EngineConfig::default()).unwrap();
    let recs = engine.recommend("Toy Story", 0.6);

    assert!(!recs.is_empty());
    assert!(recs.iter().all(|t| t != "Toy Story"));
    // Shared cast, director, genres and keywords make the sequel the
    // top content match
    assert_eq!(recs[0], "Toy Story 2");
}

#[test]
fn profile_builder_feeds_content_engine() {
    let data = dataset();
    let profiles = build_profiles(&data.movies, &data.credits);

    let toy_story = &profiles[0];
    assert!(toy_story.profile.contains("animation"));
    assert!(toy_story.profile.contains("jealousy"));
    assert!(toy_story.profile.contains("tomhanks"));
    assert!(toy_story.profile.contains("johnlasseter"));
    // Fourth credited cast member does not contribute
    assert!(!toy_story.profile.contains("jimvarney"));

    // Malformed keywords degrade to nothing; the record itself survives
    let matrix = &profiles[2];
    assert!(matrix.profile.contains("sciencefiction"));
    assert!(matrix.profile.contains("hacker"));
}

#[test]
fn content_matrix_is_symmetric_with_unit_diagonal() {
    let data = dataset();
    let profiles = build_profiles(&data.movies, &data.credits);
    let content = ContentSimilarityEngine::build(&profiles, 5000).unwrap();

    for i in 0..content.len() {
        let row_i = content.similarity_row(ContentIndex(i));
        assert!((row_i[i] - 1.0).abs() < 1e-5);
        for j in 0..content.len() {
            let row_j = content.similarity_row(ContentIndex(j));
            assert!((row_i[j] - row_j[i]).abs() < 1e-6);
        }
    }
}

#[test]
fn unresolvable_collaborative_ids_never_abort_the_query() {
    // "The Matrix" has ratings but its link row lacks a TMDB id, so its
    // collaborative signal drops out silently.
    let engine = HybridRecommender::from_dataset(&dataset(), &EngineConfig::default()).unwrap();
    let recs = engine.recommend("The Matrix", 0.0);
    assert!(recs.len() <= 10);
    assert!(recs.iter().all(|t| t != "The Matrix"));
}

#[test]
fn recommend_is_consistent_across_repeated_calls() {
    // The engine is immutable after construction: repeated reads of the
    // same query must agree.
    let engine = HybridRecommender::from_dataset(&dataset(), &EngineConfig::default()).unwrap();
    let first = engine.recommend("Toy Story", 0.6);
    for _ in 0..5 {
        assert_eq!(engine.recommend("Toy Story", 0.6), first);
    }
}
