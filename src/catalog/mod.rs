//! Reference catalog loading and grouping.
//!
//! The catalog is the read-only ground truth for the whole pipeline: a
//! delimited file of tracks with tempo, popularity, and a playlist
//! label per row. Loading normalizes header aliases, validates the
//! required schema, collapses duplicate identifiers (first occurrence
//! wins), drops rows without tempo or popularity, and synthesizes
//! sequential playlist labels when the file has none.
//!
//! The loaded [`Catalog`] is passed by reference to every downstream
//! stage; nothing mutates it after load.

pub mod columns;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result, ResultExt};
use crate::model::{AudioFeatures, CatalogTrack};
use columns::{ARTIST, ColumnMap, ID, PLAYLIST, POPULARITY, TEMPO, TITLE};

/// Default number of tracks per synthesized playlist chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// The loaded reference catalog.
///
/// Tracks keep the file's row order; playlist groups iterate in
/// first-encounter order, which downstream tie-breaks rely on.
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<CatalogTrack>,
}

impl Catalog {
    /// Build a catalog from already-validated tracks.
    ///
    /// Callers are responsible for the catalog invariants (unique
    /// identifiers, labels assigned). The CSV loader is the normal
    /// entry point; this exists for fixtures and programmatic use.
    pub fn from_tracks(tracks: Vec<CatalogTrack>) -> Self {
        Self { tracks }
    }

    /// All tracks in file order.
    pub fn tracks(&self) -> &[CatalogTrack] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Playlist groups in first-encounter order.
    ///
    /// Each group's tracks keep their catalog order.
    pub fn playlists(&self) -> Vec<(&str, Vec<&CatalogTrack>)> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(&str, Vec<&CatalogTrack>)> = Vec::new();
        for track in &self.tracks {
            let slot = *index.entry(track.playlist.as_str()).or_insert_with(|| {
                groups.push((track.playlist.as_str(), Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(track);
        }
        groups
    }
}

/// Load a catalog with the default playlist chunk size.
pub fn load(path: &Path) -> Result<Catalog> {
    load_with_chunk_size(path, DEFAULT_CHUNK_SIZE)
}

/// Load a catalog, synthesizing `playlist_<k>` labels in chunks of
/// `chunk_size` when the file carries no playlist column (or leaves it
/// blank on every row).
pub fn load_with_chunk_size(path: &Path, chunk_size: usize) -> Result<Catalog> {
    if !path.exists() {
        return Err(Error::not_found(path));
    }
    let chunk_size = chunk_size.max(1);

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(format!("opening catalog {}", path.display()))?;
    let headers = reader.headers()?.clone();
    let cols = ColumnMap::from_headers(headers.iter());
    cols.require(&[ID, TITLE, ARTIST, TEMPO, POPULARITY])?;

    let has_playlist_column = cols.contains(PLAYLIST);
    let mut seen: HashSet<String> = HashSet::new();
    let mut tracks: Vec<CatalogTrack> = Vec::new();
    let mut dropped_incomplete = 0usize;
    let mut dropped_duplicate = 0usize;

    for record in reader.records() {
        let record = record?;
        let Some(id) = cols.field(&record, ID) else {
            dropped_incomplete += 1;
            continue;
        };
        let (Some(tempo), Some(popularity)) = (
            cols.parse_f64(&record, TEMPO),
            cols.parse_i64(&record, POPULARITY),
        ) else {
            dropped_incomplete += 1;
            continue;
        };
        if !seen.insert(id.to_string()) {
            dropped_duplicate += 1;
            continue;
        }

        tracks.push(CatalogTrack {
            id: id.to_string(),
            title: cols.field(&record, TITLE).unwrap_or_default().to_string(),
            artist: cols.field(&record, ARTIST).unwrap_or_default().to_string(),
            tempo,
            popularity,
            playlist: cols
                .field(&record, PLAYLIST)
                .unwrap_or_default()
                .to_string(),
            features: parse_features(&cols, &record),
        });
    }

    if !has_playlist_column || tracks.iter().all(|t| t.playlist.is_empty()) {
        debug!(
            target: "catalog::load",
            chunk_size,
            "no playlist labels in file, synthesizing sequential chunks"
        );
        for (i, track) in tracks.iter_mut().enumerate() {
            track.playlist = format!("playlist_{}", i / chunk_size + 1);
        }
    }

    info!(
        target: "catalog::load",
        path = %path.display(),
        tracks = tracks.len(),
        dropped_incomplete,
        dropped_duplicate,
        "catalog loaded"
    );

    Ok(Catalog { tracks })
}

fn parse_features(cols: &ColumnMap, record: &csv::StringRecord) -> AudioFeatures {
    AudioFeatures {
        danceability: cols.parse_f64(record, "danceability"),
        energy: cols.parse_f64(record, "energy"),
        key: cols.parse_f64(record, "key"),
        loudness: cols.parse_f64(record, "loudness"),
        mode: cols.parse_f64(record, "mode"),
        speechiness: cols.parse_f64(record, "speechiness"),
        acousticness: cols.parse_f64(record, "acousticness"),
        liveness: cols.parse_f64(record, "liveness"),
    }
}
