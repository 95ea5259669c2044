//! Movie profile builder
//!
//! Collapses each movie's metadata (synopsis, genres, keywords, cast,
//! directors) into one normalized text profile for the content
//! vectorizer. The structured columns are JSON arrays embedded in the
//! CSV; anything unparsable degrades to an empty list so a single bad
//! field never drops the record.

use crate::dataset::{TmdbCreditsRow, TmdbMovieRow};
use cinematch_core::{MovieProfile, TmdbId};
use serde::Deserialize;
use std::collections::HashMap;

/// Only the first three credited cast members contribute to a profile.
const TOP_CAST: usize = 3;

#[derive(Debug, Deserialize)]
struct NamedEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CrewEntry {
    name: String,
    job: String,
}

/// Multi-word names become single tokens so "Science Fiction" and
/// "Sam Worthington" match as whole units rather than by word.
fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<String>()
}

/// Extract normalized `name` fields from a JSON list. Malformed input
/// yields an empty list.
pub fn extract_names(raw: &str) -> Vec<String> {
    serde_json::from_str::<Vec<NamedEntry>>(raw)
        .map(|entries| entries.iter().map(|e| normalize_name(&e.name)).collect())
        .unwrap_or_default()
}

/// Extract the first three credited cast members
pub fn top_cast(raw: &str) -> Vec<String> {
    serde_json::from_str::<Vec<NamedEntry>>(raw)
        .map(|entries| {
            entries
                .iter()
                .take(TOP_CAST)
                .map(|e| normalize_name(&e.name))
                .collect()
        })
        .unwrap_or_default()
}

/// Extract every crew member credited as Director
pub fn directors(raw: &str) -> Vec<String> {
    serde_json::from_str::<Vec<CrewEntry>>(raw)
        .map(|entries| {
            entries
                .iter()
                .filter(|e| e.job == "Director")
                .map(|e| normalize_name(&e.name))
                .collect()
        })
        .unwrap_or_default()
}

/// Lower-cased whitespace tokens of the synopsis; empty input yields an
/// empty list
fn synopsis_tokens(overview: &str) -> Vec<String> {
    overview
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Build one profile per movie: synopsis tokens, then genre, keyword,
/// cast and director tokens, joined by single spaces.
///
/// Movies without a credits row keep their metadata tokens and get
/// empty cast/director lists.
pub fn build_profiles(
    movies: &[TmdbMovieRow],
    credits: &[TmdbCreditsRow],
) -> Vec<MovieProfile> {
    let credits_by_movie: HashMap<u64, &TmdbCreditsRow> =
        credits.iter().map(|c| (c.movie_id, c)).collect();

    movies
        .iter()
        .map(|movie| {
            let mut tokens = synopsis_tokens(&movie.overview);
            tokens.extend(extract_names(&movie.genres));
            tokens.extend(extract_names(&movie.keywords));

            if let Some(credit) = credits_by_movie.get(&movie.id) {
                tokens.extend(top_cast(&credit.cast));
                tokens.extend(directors(&credit.crew));
            }

            MovieProfile {
                tmdb_id: TmdbId(movie.id),
                title: movie.title.clone(),
                profile: tokens.join(" "),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_names_normalizes() {
        let raw = r#"[{"id": 878, "name": "Science Fiction"}, {"id": 28, "name": "Action"}]"#;
        assert_eq!(extract_names(raw), vec!["sciencefiction", "action"]);
    }

    #[test]
    fn test_extract_names_malformed_is_empty() {
        assert!(extract_names("not json").is_empty());
        assert!(extract_names("").is_empty());
        assert!(extract_names(r#"{"name": "object not list"}"#).is_empty());
    }

    #[test]
    fn test_top_cast_limits_to_three() {
        let raw = r#"[
            {"name": "Sam Worthington"},
            {"name": "Zoe Saldana"},
            {"name": "Sigourney Weaver"},
            {"name": "Stephen Lang"}
        ]"#;
        assert_eq!(
            top_cast(raw),
            vec!["samworthington", "zoesaldana", "sigourneyweaver"]
        );
    }

    #[test]
    fn test_directors_collects_all() {
        let raw = r#"[
            {"name": "Lana Wachowski", "job": "Director"},
            {"name": "Some Editor", "job": "Editor"},
            {"name": "Lilly Wachowski", "job": "Director"}
        ]"#;
        assert_eq!(directors(raw), vec!["lanawachowski", "lillywachowski"]);
    }

    #[test]
    fn test_profile_token_order() {
        let movies = vec![TmdbMovieRow {
            id: 1,
            title: "Test".to_string(),
            overview: "A Space story".to_string(),
            genres: r#"[{"name": "Science Fiction"}]"#.to_string(),
            keywords: r#"[{"name": "alien"}]"#.to_string(),
        }];
        let credits = vec![TmdbCreditsRow {
            movie_id: 1,
            cast: r#"[{"name": "Jane Doe"}]"#.to_string(),
            crew: r#"[{"name": "John Roe", "job": "Director"}]"#.to_string(),
        }];

        let profiles = build_profiles(&movies, &credits);
        assert_eq!(profiles.len(), 1);
        assert_eq!(
            profiles[0].profile,
            "a space story sciencefiction alien janedoe johnroe"
        );
    }

    #[test]
    fn test_profile_without_credits_row() {
        let movies = vec![TmdbMovieRow {
            id: 2,
            title: "Orphan".to_string(),
            overview: "".to_string(),
            genres: r#"[{"name": "Drama"}]"#.to_string(),
            keywords: "".to_string(),
        }];

        let profiles = build_profiles(&movies, &[]);
        assert_eq!(profiles[0].profile, "drama");
    }
}
