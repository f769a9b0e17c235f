//! Reference catalog overview command.

use std::path::Path;

use crate::config::{self, Config};
use crate::stats;

use super::{load_catalog, resolve_catalog_path};

/// Print a summary of the catalog and its playlist groups.
///
/// With `save_default`, the resolved catalog path is also written to
/// the config file so later invocations can omit `--catalog`.
pub fn cmd_catalog(
    config: &Config,
    catalog_path: Option<&Path>,
    chunk_size: Option<usize>,
    save_default: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(config, catalog_path, chunk_size)?;

    if save_default {
        let mut updated = config.clone();
        updated.catalog.path = Some(resolve_catalog_path(config, catalog_path)?);
        config::save(&updated)?;
    }

    if catalog.is_empty() {
        println!("Catalog is empty.");
        return Ok(());
    }

    let summaries = stats::playlist_summaries(&catalog);

    println!(
        "Catalog: {} tracks in {} playlists",
        catalog.len(),
        summaries.len()
    );
    println!();
    println!(
        "{:<28} {:>7} {:>12} {:>16}",
        "playlist", "tracks", "mean tempo", "tempo range"
    );
    for summary in &summaries {
        println!(
            "{:<28} {:>7} {:>8.1} BPM {:>8.1}-{:.1}",
            summary.name, summary.tracks, summary.mean_tempo, summary.min_tempo, summary.max_tempo
        );
    }

    Ok(())
}
