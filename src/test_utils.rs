//! Test utilities and fixtures for tempo-scout tests.
//!
//! This module provides common fixtures and file helpers to reduce
//! boilerplate in tests: canned catalogs, track builders, and temp CSV
//! files.

use std::path::PathBuf;

use tempfile::TempDir;

use crate::catalog::Catalog;
use crate::model::{AudioFeatures, CatalogTrack, EnrichedTrack, MatchKind, UserTrack};

/// Build a catalog track with no secondary features.
pub fn catalog_track(
    id: &str,
    title: &str,
    artist: &str,
    tempo: f64,
    popularity: i64,
    playlist: &str,
) -> CatalogTrack {
    CatalogTrack {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        tempo,
        popularity,
        playlist: playlist.to_string(),
        features: AudioFeatures::default(),
    }
}

/// Build an enriched track with sensible defaults.
///
/// Customize with struct update syntax:
///
/// ```ignore
/// let track = EnrichedTrack { popularity: 90, ..enriched_track("t1", 120.0) };
/// ```
pub fn enriched_track(id: &str, tempo: f64) -> EnrichedTrack {
    EnrichedTrack {
        id: id.to_string(),
        title: format!("Track {id}"),
        artist: "Test Artist".to_string(),
        tempo,
        popularity: 50,
        playlist: "p".to_string(),
        features: AudioFeatures::default(),
        matched: MatchKind::Exact,
    }
}

/// User track referencing a catalog identifier only.
pub fn user_track_by_id(id: &str) -> UserTrack {
    UserTrack {
        id: Some(id.to_string()),
        title: None,
        artist: None,
    }
}

/// User track referencing a title+artist pair only.
pub fn user_track_named(title: &str, artist: &str) -> UserTrack {
    UserTrack {
        id: None,
        title: Some(title.to_string()),
        artist: Some(artist.to_string()),
    }
}

/// Two playlists with well-separated tempo profiles:
/// "A" at tempos [100, 102] and "B" at [140, 142].
pub fn two_playlist_catalog() -> Catalog {
    Catalog::from_tracks(vec![
        catalog_track("a1", "Slow One", "Artist A", 100.0, 70, "A"),
        catalog_track("a2", "Slow Two", "Artist A", 102.0, 60, "A"),
        catalog_track("b1", "Fast One", "Artist B", 140.0, 80, "B"),
        catalog_track("b2", "Fast Two", "Artist B", 142.0, 50, "B"),
    ])
}

/// Write a CSV fixture into a fresh temp directory.
///
/// Keep the returned `TempDir` alive for the duration of the test; the
/// file is deleted when it drops.
pub fn write_csv(name: &str, contents: &str) -> (PathBuf, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write CSV fixture");
    (path, dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_playlist_catalog_means() {
        let catalog = two_playlist_catalog();
        let playlists = catalog.playlists();
        assert_eq!(playlists.len(), 2);

        let mean = |tracks: &[&CatalogTrack]| {
            tracks.iter().map(|t| t.tempo).sum::<f64>() / tracks.len() as f64
        };
        assert_eq!(mean(&playlists[0].1), 101.0);
        assert_eq!(mean(&playlists[1].1), 141.0);
    }

    #[test]
    fn test_write_csv_roundtrip() {
        let (path, _dir) = write_csv("fixture.csv", "id\nt1\n");
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("t1"));
    }
}
