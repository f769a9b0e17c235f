//! Recommendation stages.
//!
//! Everything here consumes an already-enriched user table and the
//! read-only catalog:
//!
//! - [`matcher`] - find the catalog playlist closest to the user's
//!   mean tempo
//! - [`generator`] - build a fresh playlist from a tempo window around
//!   the user's mean, ranked by popularity
//! - [`feature`] - rank catalog tracks by closeness to the user's mean
//!   of one numeric audio feature
//!
//! All stages assume the enricher upheld its invariants (every row has
//! a tempo); the only failure they add is [`Error::EmptyInput`] when an
//! aggregate is requested over zero rows. Callers should check for an
//! empty enrichment result first and report it as "no recommendations
//! possible" rather than calling in.
//!
//! [`Error::EmptyInput`]: crate::error::Error::EmptyInput

pub mod feature;
pub mod generator;
pub mod matcher;

pub use feature::{Feature, FeatureMatch, recommend_by_feature};
pub use generator::{
    DEFAULT_PLAYLIST_SIZE, DEFAULT_TEMPO_WINDOW, RecommendOptions, generate_custom_playlist,
};
pub use matcher::{ClosestPlaylist, closest_playlist};

use crate::error::{Error, Result};
use crate::model::EnrichedTrack;

/// Arithmetic mean tempo of an enriched user table.
pub fn mean_tempo(tracks: &[EnrichedTrack]) -> Result<f64> {
    if tracks.is_empty() {
        return Err(Error::empty_input("mean tempo"));
    }
    Ok(tracks.iter().map(|t| t.tempo).sum::<f64>() / tracks.len() as f64)
}
