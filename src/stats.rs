//! Catalog and playlist summaries.
//!
//! Pure aggregate helpers behind the CLI's overview output: per-playlist
//! tempo profiles for the catalog, and a tempo summary plus a
//! top-by-popularity listing for an enriched user playlist.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::model::EnrichedTrack;

/// Tempo profile of one catalog playlist.
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistSummary {
    pub name: String,
    pub tracks: usize,
    pub mean_tempo: f64,
    pub min_tempo: f64,
    pub max_tempo: f64,
}

/// Per-playlist tempo profiles, in catalog first-encounter order.
pub fn playlist_summaries(catalog: &Catalog) -> Vec<PlaylistSummary> {
    catalog
        .playlists()
        .into_iter()
        .map(|(name, tracks)| {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            let mut sum = 0.0;
            for track in &tracks {
                min = min.min(track.tempo);
                max = max.max(track.tempo);
                sum += track.tempo;
            }
            PlaylistSummary {
                name: name.to_string(),
                tracks: tracks.len(),
                mean_tempo: sum / tracks.len() as f64,
                min_tempo: min,
                max_tempo: max,
            }
        })
        .collect()
}

/// Tempo distribution summary of an enriched playlist.
#[derive(Debug, Clone, Serialize)]
pub struct TempoSummary {
    pub tracks: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Summarize the tempo distribution of an enriched playlist.
pub fn tempo_summary(tracks: &[EnrichedTrack]) -> Result<TempoSummary> {
    if tracks.is_empty() {
        return Err(Error::empty_input("tempo summary"));
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for track in tracks {
        min = min.min(track.tempo);
        max = max.max(track.tempo);
        sum += track.tempo;
    }
    Ok(TempoSummary {
        tracks: tracks.len(),
        mean: sum / tracks.len() as f64,
        min,
        max,
    })
}

/// The `n` most popular tracks of an enriched playlist, most popular
/// first. Ties keep playlist order.
pub fn top_by_popularity(tracks: &[EnrichedTrack], n: usize) -> Vec<&EnrichedTrack> {
    let mut sorted: Vec<&EnrichedTrack> = tracks.iter().collect();
    sorted.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    sorted.truncate(n);
    sorted
}
