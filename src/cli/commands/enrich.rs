//! Playlist enrichment report command.

use std::path::Path;

use crate::config::Config;
use crate::model::MatchKind;
use crate::playlist;
use crate::stats;

use super::load_catalog;

/// Enrich a user playlist and print the matched rows with provenance,
/// a tempo summary, and the most popular matches.
pub fn cmd_enrich(
    config: &Config,
    playlist_path: &Path,
    catalog_path: Option<&Path>,
    threshold: Option<f64>,
) -> anyhow::Result<()> {
    let catalog = load_catalog(config, catalog_path, None)?;
    let user = playlist::read(playlist_path)?;
    let total = user.len();
    let threshold = threshold.unwrap_or(config.matching.fuzzy_threshold);
    let enriched = crate::enrichment::enrich(&user, &catalog, threshold)?;

    if enriched.is_empty() {
        println!("No matching songs found in the catalog.");
        return Ok(());
    }

    println!("Matched {} of {} tracks:", enriched.len(), total);
    for track in &enriched {
        match track.matched {
            MatchKind::Exact => println!(
                "  {} - {}  [{:.0} BPM, popularity {}]  ({})",
                track.artist, track.title, track.tempo, track.popularity, track.playlist
            ),
            MatchKind::Fuzzy { score } => println!(
                "  {} - {}  [{:.0} BPM, popularity {}]  ({})  ~fuzzy {:.1}",
                track.artist, track.title, track.tempo, track.popularity, track.playlist, score
            ),
        }
    }

    let summary = stats::tempo_summary(&enriched)?;
    println!();
    println!(
        "Tempo: mean {:.1} BPM, range {:.1}-{:.1} over {} tracks",
        summary.mean, summary.min, summary.max, summary.tracks
    );

    println!();
    println!("Most popular matches:");
    for track in stats::top_by_popularity(&enriched, 10) {
        println!(
            "  {:>3}  {} - {}",
            track.popularity, track.artist, track.title
        );
    }

    Ok(())
}
