//! Core data models for the recommendation pipeline.
//!
//! Defines the primary entities: [`CatalogTrack`], [`UserTrack`], and
//! [`EnrichedTrack`]. Catalog rows are parsed once by the loader and
//! treated as read-only afterwards; enriched rows are derived per
//! interaction and carry the provenance of their catalog match.

use serde::Serialize;

/// A track in the reference catalog.
///
/// Invariants (enforced by the loader): `id` is unique within a catalog,
/// `tempo` and `popularity` are always present, and every track belongs
/// to exactly one playlist.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogTrack {
    /// Catalog identifier (unique)
    pub id: String,
    /// Track title
    pub title: String,
    /// Artist name
    pub artist: String,
    /// Tempo in beats per minute
    pub tempo: f64,
    /// Popularity score (catalog-defined scale, typically 0-100)
    pub popularity: i64,
    /// Playlist label this track belongs to
    pub playlist: String,
    /// Secondary audio features, when the catalog file carries them
    #[serde(skip_serializing_if = "AudioFeatures::is_empty")]
    pub features: AudioFeatures,
}

/// Secondary audio features of a catalog track.
///
/// All fields are optional: catalogs differ in which feature columns
/// they export, and absent columns simply stay `None` on every row.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct AudioFeatures {
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub key: Option<f64>,
    pub loudness: Option<f64>,
    pub mode: Option<f64>,
    pub speechiness: Option<f64>,
    pub acousticness: Option<f64>,
    pub liveness: Option<f64>,
}

impl AudioFeatures {
    /// True when no secondary feature carries a value.
    pub fn is_empty(&self) -> bool {
        self.danceability.is_none()
            && self.energy.is_none()
            && self.key.is_none()
            && self.loudness.is_none()
            && self.mode.is_none()
            && self.speechiness.is_none()
            && self.acousticness.is_none()
            && self.liveness.is_none()
    }
}

/// A track reference from a user-supplied playlist file.
///
/// Before enrichment only identification data is available; any of the
/// fields may be missing on a given row, though the reader guarantees
/// the file as a whole resolves to an identifier column or a
/// title+artist pair.
#[derive(Debug, Clone, Default)]
pub struct UserTrack {
    /// Shared catalog identifier, when the file carries one
    pub id: Option<String>,
    /// Track title
    pub title: Option<String>,
    /// Artist name
    pub artist: Option<String>,
}

/// How an enriched row was matched to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MatchKind {
    /// Joined on the shared identifier
    Exact,
    /// Accepted fuzzy title+artist match, with its similarity score (0-100)
    Fuzzy { score: f64 },
}

/// A user track joined to its catalog match.
///
/// Invariant: `tempo` is always present. Rows that match no catalog
/// track are dropped during enrichment, never kept with missing values.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedTrack {
    /// Identifier of the matched catalog track
    pub id: String,
    /// Track title (as supplied by the user, falling back to the catalog)
    pub title: String,
    /// Artist name (as supplied by the user, falling back to the catalog)
    pub artist: String,
    /// Tempo in beats per minute, from the catalog
    pub tempo: f64,
    /// Popularity score, from the catalog
    pub popularity: i64,
    /// Playlist label of the matched catalog track
    pub playlist: String,
    /// Secondary audio features of the matched catalog track
    #[serde(skip_serializing_if = "AudioFeatures::is_empty")]
    pub features: AudioFeatures,
    /// Match provenance
    pub matched: MatchKind,
}
