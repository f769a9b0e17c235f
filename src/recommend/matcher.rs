//! Closest-playlist selection.

use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::model::{CatalogTrack, EnrichedTrack};

use super::mean_tempo;

/// The catalog playlist whose mean tempo sits closest to the user's.
#[derive(Debug, Serialize)]
pub struct ClosestPlaylist<'a> {
    /// Playlist label
    pub name: &'a str,
    /// The playlist's own mean tempo
    pub mean_tempo: f64,
    /// Member tracks, in catalog order
    pub tracks: Vec<&'a CatalogTrack>,
}

/// Find the catalog playlist with the smallest absolute mean-tempo
/// distance to the user's mean tempo.
///
/// Groups are compared in catalog first-encounter order and a tie
/// keeps the earlier group. Fails with [`Error::EmptyInput`] when the
/// user table or the catalog is empty.
pub fn closest_playlist<'a>(
    catalog: &'a Catalog,
    user: &[EnrichedTrack],
) -> Result<ClosestPlaylist<'a>> {
    let target = mean_tempo(user)?;

    let mut groups = catalog.playlists();
    let mut best: Option<(usize, f64, f64)> = None;
    for (idx, (name, tracks)) in groups.iter().enumerate() {
        let mean = tracks.iter().map(|t| t.tempo).sum::<f64>() / tracks.len() as f64;
        let diff = (mean - target).abs();
        debug!(target: "recommend::matcher", playlist = name, mean, diff, "playlist candidate");
        match best {
            Some((_, _, top)) if diff >= top => {}
            _ => best = Some((idx, mean, diff)),
        }
    }

    let Some((idx, mean, _)) = best else {
        return Err(Error::empty_input("playlist mean tempo"));
    };
    let (name, tracks) = groups.swap_remove(idx);
    Ok(ClosestPlaylist {
        name,
        mean_tempo: mean,
        tracks,
    })
}
