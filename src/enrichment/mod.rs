//! Playlist enrichment - attaches catalog features to user tracks.
//!
//! # Architecture
//!
//! A user playlist row carries identification data only; everything the
//! recommenders need (tempo, popularity, playlist label, secondary
//! features) comes from the catalog. Two matching strategies exist
//! behind the single [`enrich`] entry point, selected by the shape of
//! the input:
//!
//! - **Identifier join** ([`enrich_by_id`]) - used when every user row
//!   carries an identifier; a plain hash join against the catalog.
//! - **Fuzzy matching** ([`enrich_by_similarity`]) - used as a fallback
//!   for rows the join misses, and as the only strategy when the file
//!   has no identifiers. Matches a normalized `"title - artist"` key
//!   with a token-order-insensitive scorer (see [`fuzzy`]); accepted
//!   only strictly above the threshold.
//!
//! Rows that match nothing are dropped, never kept with missing
//! values, so every [`EnrichedTrack`] has a tempo. An empty result is
//! a valid outcome ("no recommendations possible"), not an error.

pub mod fuzzy;

pub use fuzzy::DEFAULT_THRESHOLD;

use std::collections::HashMap;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::model::{CatalogTrack, EnrichedTrack, MatchKind, UserTrack};

/// Enrich a user playlist against the catalog.
///
/// `threshold` is the fuzzy acceptance score on a 0-100 scale; see
/// [`DEFAULT_THRESHOLD`].
///
/// Fails with [`Error::Schema`] when the rows carry neither
/// identifiers nor title+artist pairs, leaving no matching strategy
/// applicable.
pub fn enrich(
    user: &[UserTrack],
    catalog: &Catalog,
    threshold: f64,
) -> Result<Vec<EnrichedTrack>> {
    if user.is_empty() {
        return Ok(Vec::new());
    }

    let any_id = user.iter().any(|t| t.id.is_some());
    let any_pair = user.iter().any(|t| t.title.is_some() && t.artist.is_some());
    if !any_id && !any_pair {
        return Err(Error::schema(["id (or title and artist)"]));
    }

    // The identifier join only applies when the column is fully
    // populated; a partially filled column falls through to fuzzy
    // matching row by row.
    let join_on_id = user.iter().all(|t| t.id.is_some());
    let index: HashMap<&str, &CatalogTrack> = catalog
        .tracks()
        .iter()
        .map(|t| (t.id.as_str(), t))
        .collect();
    let keys = fuzzy::CatalogKeys::new(catalog);

    let mut enriched = Vec::new();
    let mut dropped = 0usize;
    for track in user {
        let hit = if join_on_id {
            enrich_by_id(track, &index)
                .or_else(|| enrich_by_similarity(track, &keys, threshold))
        } else {
            enrich_by_similarity(track, &keys, threshold)
        };
        match hit {
            Some(row) => enriched.push(row),
            None => {
                dropped += 1;
                debug!(
                    target: "enrichment",
                    id = track.id.as_deref().unwrap_or("-"),
                    title = track.title.as_deref().unwrap_or("-"),
                    "no catalog match, dropping row"
                );
            }
        }
    }

    info!(
        target: "enrichment",
        matched = enriched.len(),
        dropped,
        join_on_id,
        "playlist enriched"
    );

    Ok(enriched)
}

/// Exact identifier join against the catalog index.
pub fn enrich_by_id(
    track: &UserTrack,
    index: &HashMap<&str, &CatalogTrack>,
) -> Option<EnrichedTrack> {
    let id = track.id.as_deref()?;
    let hit = index.get(id)?;
    Some(enriched_from(track, hit, MatchKind::Exact))
}

/// Fuzzy title+artist match against pre-computed catalog keys.
///
/// Rows without both a title and an artist cannot build a match key and
/// return `None`.
pub fn enrich_by_similarity(
    track: &UserTrack,
    keys: &fuzzy::CatalogKeys<'_>,
    threshold: f64,
) -> Option<EnrichedTrack> {
    let title = track.title.as_deref()?;
    let artist = track.artist.as_deref()?;
    let key = fuzzy::match_key(title, artist);
    let (hit, score) = keys.best_match(&key)?;
    if score > threshold {
        Some(enriched_from(track, hit, MatchKind::Fuzzy { score }))
    } else {
        debug!(
            target: "enrichment",
            key,
            score,
            threshold,
            "best fuzzy candidate below threshold"
        );
        None
    }
}

fn enriched_from(user: &UserTrack, hit: &CatalogTrack, matched: MatchKind) -> EnrichedTrack {
    EnrichedTrack {
        id: hit.id.clone(),
        title: user.title.clone().unwrap_or_else(|| hit.title.clone()),
        artist: user.artist.clone().unwrap_or_else(|| hit.artist.clone()),
        tempo: hit.tempo,
        popularity: hit.popularity,
        playlist: hit.playlist.clone(),
        features: hit.features,
        matched,
    }
}
