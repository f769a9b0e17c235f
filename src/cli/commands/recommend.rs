//! Recommendation commands: closest playlist, generated playlist, and
//! feature ranking.

use std::path::Path;

use crate::config::Config;
use crate::recommend::{self, Feature, RecommendOptions};

use super::{load_catalog, load_enriched, report_no_matches};

/// Find and print the catalog playlist closest to the user's mean tempo.
pub fn cmd_closest(
    config: &Config,
    playlist_path: &Path,
    catalog_path: Option<&Path>,
    threshold: Option<f64>,
    format: &str,
) -> anyhow::Result<()> {
    let catalog = load_catalog(config, catalog_path, None)?;
    let enriched = load_enriched(config, &catalog, playlist_path, threshold)?;
    if enriched.is_empty() {
        report_no_matches();
        return Ok(());
    }

    let closest = recommend::closest_playlist(&catalog, &enriched)?;
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&closest)?),
        "text" => {
            let user_mean = recommend::mean_tempo(&enriched)?;
            println!(
                "Closest playlist: {} (mean {:.1} BPM vs your {:.1} BPM)",
                closest.name, closest.mean_tempo, user_mean
            );
            for track in &closest.tracks {
                println!(
                    "  {} - {}  [{:.0} BPM, popularity {}]",
                    track.artist, track.title, track.tempo, track.popularity
                );
            }
        }
        other => anyhow::bail!("unknown output format '{other}' (expected text or json)"),
    }

    Ok(())
}

/// Generate and print a fresh playlist around the user's mean tempo.
pub fn cmd_recommend(
    config: &Config,
    playlist_path: &Path,
    catalog_path: Option<&Path>,
    threshold: Option<f64>,
    size: Option<usize>,
    window: Option<f64>,
    keep_known: bool,
    format: &str,
) -> anyhow::Result<()> {
    let catalog = load_catalog(config, catalog_path, None)?;
    let enriched = load_enriched(config, &catalog, playlist_path, threshold)?;
    if enriched.is_empty() {
        report_no_matches();
        return Ok(());
    }

    let options = RecommendOptions {
        tempo_window: window.unwrap_or(config.recommend.tempo_window),
        size: size.unwrap_or(config.recommend.playlist_size),
    };
    let exclude = keep_known.then(std::collections::HashSet::new);
    let generated =
        recommend::generate_custom_playlist(&catalog, &enriched, exclude.as_ref(), &options)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&generated)?),
        "text" => {
            if generated.is_empty() {
                println!(
                    "No catalog tracks within {:.0} BPM of your playlist's mean tempo.",
                    options.tempo_window
                );
                return Ok(());
            }
            println!("New playlist for you:");
            for (i, track) in generated.iter().enumerate() {
                println!(
                    "  {:>2}. {} - {}  [{:.0} BPM, popularity {}]",
                    i + 1,
                    track.artist,
                    track.title,
                    track.tempo,
                    track.popularity
                );
            }
        }
        other => anyhow::bail!("unknown output format '{other}' (expected text or json)"),
    }

    Ok(())
}

/// Rank catalog tracks by closeness to the playlist's mean of one feature.
pub fn cmd_feature(
    config: &Config,
    playlist_path: &Path,
    feature: &str,
    catalog_path: Option<&Path>,
    threshold: Option<f64>,
    size: Option<usize>,
    format: &str,
) -> anyhow::Result<()> {
    let feature: Feature = feature.parse()?;
    let catalog = load_catalog(config, catalog_path, None)?;
    let enriched = load_enriched(config, &catalog, playlist_path, threshold)?;
    if enriched.is_empty() {
        report_no_matches();
        return Ok(());
    }

    let size = size.unwrap_or(config.recommend.playlist_size);
    let matches = recommend::recommend_by_feature(&catalog, &enriched, feature, size)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&matches)?),
        "text" => {
            println!("Tracks closest to your playlist's mean {feature}:");
            for (i, hit) in matches.iter().enumerate() {
                println!(
                    "  {:>2}. {} - {}  [{} {:.3}]",
                    i + 1,
                    hit.artist,
                    hit.title,
                    feature,
                    hit.value
                );
            }
        }
        other => anyhow::bail!("unknown output format '{other}' (expected text or json)"),
    }

    Ok(())
}
