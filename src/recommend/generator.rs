//! Tempo-window playlist generation.
//!
//! Builds a fresh candidate list from the catalog: tracks whose tempo
//! falls inside an inclusive window around the user's mean tempo,
//! minus anything the user already has, ranked by popularity.

use std::collections::HashSet;

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::model::{CatalogTrack, EnrichedTrack};

use super::mean_tempo;

/// Default half-width of the tempo window in BPM.
///
/// Narrow enough to keep a consistent rhythmic feel, wide enough to
/// avoid returning near-duplicates of the input. A policy knob, not a
/// derived value.
pub const DEFAULT_TEMPO_WINDOW: f64 = 15.0;

/// Default number of tracks in a generated playlist.
pub const DEFAULT_PLAYLIST_SIZE: usize = 10;

/// Tunable parameters for playlist generation.
#[derive(Debug, Clone)]
pub struct RecommendOptions {
    /// Half-width of the tempo window in BPM
    pub tempo_window: f64,
    /// Maximum number of tracks to return
    pub size: usize,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            tempo_window: DEFAULT_TEMPO_WINDOW,
            size: DEFAULT_PLAYLIST_SIZE,
        }
    }
}

/// Generate a fresh playlist around the user's mean tempo.
///
/// Candidates are catalog tracks with tempo in the inclusive window
/// `[mean - w, mean + w]` whose identifier is not excluded. When
/// `exclude` is `None`, the identifiers of the user's own (enriched)
/// tracks are excluded. The result is sorted by popularity descending
/// with a stable sort, so equally popular tracks keep their catalog
/// order, and truncated to `options.size`.
pub fn generate_custom_playlist<'a>(
    catalog: &'a Catalog,
    user: &[EnrichedTrack],
    exclude: Option<&HashSet<String>>,
    options: &RecommendOptions,
) -> Result<Vec<&'a CatalogTrack>> {
    let target = mean_tempo(user)?;
    let lower = target - options.tempo_window;
    let upper = target + options.tempo_window;

    let own_ids: HashSet<String>;
    let exclude = match exclude {
        Some(set) => set,
        None => {
            own_ids = user.iter().map(|t| t.id.clone()).collect();
            &own_ids
        }
    };

    let mut candidates: Vec<&CatalogTrack> = catalog
        .tracks()
        .iter()
        .filter(|t| t.tempo >= lower && t.tempo <= upper)
        .filter(|t| !exclude.contains(t.id.as_str()))
        .collect();

    candidates.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    candidates.truncate(options.size);

    debug!(
        target: "recommend::generator",
        mean = target,
        lower,
        upper,
        returned = candidates.len(),
        "generated playlist"
    );

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_utils::{catalog_track, enriched_track};

    fn windowed_catalog() -> Catalog {
        Catalog::from_tracks(vec![
            catalog_track("in1", "Inside Low", "A", 90.0, 50, "p"),
            catalog_track("out1", "Way Fast", "B", 200.0, 99, "p"),
            catalog_track("in2", "Inside High", "C", 110.0, 70, "p"),
        ])
    }

    #[test]
    fn test_window_filters_catalog() {
        // User mean 101 -> inclusive window [86, 116].
        let catalog = windowed_catalog();
        let user = vec![enriched_track("u1", 100.0), enriched_track("u2", 102.0)];

        let result =
            generate_custom_playlist(&catalog, &user, None, &RecommendOptions::default()).unwrap();
        let ids: Vec<&str> = result.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["in2", "in1"]);
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let catalog = Catalog::from_tracks(vec![
            catalog_track("lo", "Lower Edge", "A", 85.0, 10, "p"),
            catalog_track("hi", "Upper Edge", "B", 115.0, 20, "p"),
            catalog_track("below", "Just Below", "C", 84.9, 30, "p"),
        ]);
        let user = vec![enriched_track("u1", 100.0)];

        let result =
            generate_custom_playlist(&catalog, &user, None, &RecommendOptions::default()).unwrap();
        let ids: Vec<&str> = result.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["hi", "lo"]);
    }

    #[test]
    fn test_user_tracks_are_excluded_by_default() {
        let catalog = Catalog::from_tracks(vec![
            catalog_track("t1", "Known", "A", 100.0, 90, "p"),
            catalog_track("t2", "New", "B", 102.0, 50, "p"),
        ]);
        let user = vec![enriched_track("t1", 100.0)];

        let result =
            generate_custom_playlist(&catalog, &user, None, &RecommendOptions::default()).unwrap();
        let ids: Vec<&str> = result.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t2"]);
    }

    #[test]
    fn test_explicit_exclusion_set() {
        let catalog = Catalog::from_tracks(vec![
            catalog_track("t1", "One", "A", 100.0, 90, "p"),
            catalog_track("t2", "Two", "B", 102.0, 50, "p"),
        ]);
        let user = vec![enriched_track("u1", 100.0)];
        let exclude: HashSet<String> = ["t2".to_string()].into();

        let result =
            generate_custom_playlist(&catalog, &user, Some(&exclude), &RecommendOptions::default())
                .unwrap();
        let ids: Vec<&str> = result.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1"]);
    }

    #[test]
    fn test_sorted_by_popularity_descending_stable() {
        let catalog = Catalog::from_tracks(vec![
            catalog_track("t1", "First Tie", "A", 100.0, 50, "p"),
            catalog_track("t2", "Popular", "B", 101.0, 80, "p"),
            catalog_track("t3", "Second Tie", "C", 102.0, 50, "p"),
        ]);
        let user = vec![enriched_track("u1", 100.0)];

        let result =
            generate_custom_playlist(&catalog, &user, None, &RecommendOptions::default()).unwrap();
        let ids: Vec<&str> = result.iter().map(|t| t.id.as_str()).collect();
        // Ties keep catalog order: t1 before t3.
        assert_eq!(ids, vec!["t2", "t1", "t3"]);
    }

    #[test]
    fn test_truncates_to_requested_size() {
        let tracks = (0..30)
            .map(|i| catalog_track(&format!("t{i}"), "Song", "Artist", 100.0, i, "p"))
            .collect();
        let catalog = Catalog::from_tracks(tracks);
        let user = vec![enriched_track("u1", 100.0)];

        let options = RecommendOptions {
            size: 5,
            ..Default::default()
        };
        let result = generate_custom_playlist(&catalog, &user, None, &options).unwrap();
        assert_eq!(result.len(), 5);
        assert_eq!(result[0].popularity, 29);
    }

    #[test]
    fn test_empty_user_table_fails() {
        let catalog = windowed_catalog();
        let err = generate_custom_playlist(&catalog, &[], None, &RecommendOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
    }

    #[test]
    fn test_no_candidates_is_empty_not_error() {
        let catalog = Catalog::from_tracks(vec![catalog_track(
            "far", "Very Fast", "A", 220.0, 99, "p",
        )]);
        let user = vec![enriched_track("u1", 100.0)];

        let result =
            generate_custom_playlist(&catalog, &user, None, &RecommendOptions::default()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_generation_is_idempotent() {
        let catalog = windowed_catalog();
        let user = vec![enriched_track("u1", 101.0)];

        let first =
            generate_custom_playlist(&catalog, &user, None, &RecommendOptions::default()).unwrap();
        let second =
            generate_custom_playlist(&catalog, &user, None, &RecommendOptions::default()).unwrap();
        let first_ids: Vec<&str> = first.iter().map(|t| t.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
    }
}
