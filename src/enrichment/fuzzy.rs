//! Fuzzy title+artist matching against the catalog.
//!
//! Tracks are compared through a normalized lookup key,
//! `"title - artist"` in lowercase. The similarity scorer sorts the
//! key's tokens before measuring normalized Levenshtein distance, so
//! reorderings ("artist - title" exports, swapped word order) still
//! line up. Scores are on a 0-100 scale and a match is accepted only
//! strictly above the configured threshold.

use crate::catalog::Catalog;
use crate::model::CatalogTrack;

/// Default acceptance threshold on the 0-100 similarity scale.
pub const DEFAULT_THRESHOLD: f64 = 80.0;

/// Normalized lookup key for a track.
pub fn match_key(title: &str, artist: &str) -> String {
    format!(
        "{} - {}",
        title.trim().to_lowercase(),
        artist.trim().to_lowercase()
    )
    .trim()
    .to_string()
}

/// Token-order-insensitive similarity between two keys, 0-100.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&token_sort(a), &token_sort(b)) * 100.0
}

fn token_sort(key: &str) -> String {
    let mut tokens: Vec<&str> = key.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Pre-computed match keys for every catalog track.
///
/// Building the keys once per enrichment pass keeps the fallback at one
/// key construction per catalog row instead of one per comparison. The
/// scan itself is still catalog-size × unmatched-rows, which is fine
/// for catalogs in the low thousands.
pub struct CatalogKeys<'a> {
    keys: Vec<(String, &'a CatalogTrack)>,
}

impl<'a> CatalogKeys<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        let keys = catalog
            .tracks()
            .iter()
            .map(|track| (match_key(&track.title, &track.artist), track))
            .collect();
        Self { keys }
    }

    /// Best-scoring catalog track for a user key.
    ///
    /// Ties keep the earlier catalog row: only a strictly greater score
    /// replaces the current best.
    pub fn best_match(&self, key: &str) -> Option<(&'a CatalogTrack, f64)> {
        let mut best: Option<(&CatalogTrack, f64)> = None;
        for (candidate, track) in &self.keys {
            let score = similarity(key, candidate);
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((track, score)),
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::catalog_track;

    #[test]
    fn test_match_key_normalizes_case() {
        assert_eq!(
            match_key("Bohemian Rhapsody", "Queen"),
            "bohemian rhapsody - queen"
        );
    }

    #[test]
    fn test_match_key_with_empty_artist() {
        assert_eq!(match_key("Solo", ""), "solo -");
    }

    #[test]
    fn test_similarity_identical_keys() {
        assert_eq!(similarity("karma police - radiohead", "karma police - radiohead"), 100.0);
    }

    #[test]
    fn test_similarity_ignores_token_order() {
        let a = "karma police - radiohead";
        let b = "radiohead - karma police";
        assert_eq!(similarity(a, b), 100.0);
    }

    #[test]
    fn test_similarity_penalizes_different_tracks() {
        let score = similarity("karma police - radiohead", "one more time - daft punk");
        assert!(score < 50.0, "score was {score}");
    }

    #[test]
    fn test_best_match_picks_highest_score() {
        let catalog = Catalog::from_tracks(vec![
            catalog_track("t1", "One More Time", "Daft Punk", 123.0, 80, "p"),
            catalog_track("t2", "Karma Police", "Radiohead", 75.0, 85, "p"),
        ]);
        let keys = CatalogKeys::new(&catalog);
        let (track, score) = keys.best_match("karma police - radiohead").unwrap();
        assert_eq!(track.id, "t2");
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_best_match_tie_keeps_first_catalog_row() {
        let catalog = Catalog::from_tracks(vec![
            catalog_track("t1", "Same Song", "Same Artist", 100.0, 10, "p"),
            catalog_track("t2", "Same Song", "Same Artist", 120.0, 90, "p"),
        ]);
        let keys = CatalogKeys::new(&catalog);
        let (track, _) = keys.best_match("same song - same artist").unwrap();
        assert_eq!(track.id, "t1");
    }

    #[test]
    fn test_best_match_empty_catalog() {
        let catalog = Catalog::from_tracks(vec![]);
        let keys = CatalogKeys::new(&catalog);
        assert!(keys.best_match("anything - at all").is_none());
    }
}
