//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `catalog`: reference catalog overview
//! - `enrich`: playlist enrichment report
//! - `recommend`: closest playlist, generated playlist, feature ranking

mod catalog;
mod enrich;
mod recommend;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

pub use catalog::cmd_catalog;
pub use enrich::cmd_enrich;
pub use recommend::{cmd_closest, cmd_feature, cmd_recommend};

use crate::config::{self, Config};
use crate::error::Error;
use crate::model::EnrichedTrack;

/// Tempo Scout CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Summarize the reference catalog and its playlists
    Catalog {
        /// Path to the catalog CSV (or set catalog.path in the config file)
        #[arg(short, long, env = "TEMPO_SCOUT_CATALOG")]
        catalog: Option<PathBuf>,
        /// Tracks per synthesized playlist when the file has no labels
        #[arg(long)]
        chunk_size: Option<usize>,
        /// Remember this catalog path as the configured default
        #[arg(long)]
        save_default: bool,
    },
    /// Enrich a user playlist with catalog audio features
    Enrich {
        /// Path to the user playlist CSV
        playlist: PathBuf,
        /// Path to the catalog CSV
        #[arg(short, long, env = "TEMPO_SCOUT_CATALOG")]
        catalog: Option<PathBuf>,
        /// Fuzzy match acceptance threshold (0-100)
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Find the catalog playlist closest to the playlist's mean tempo
    Closest {
        /// Path to the user playlist CSV
        playlist: PathBuf,
        /// Path to the catalog CSV
        #[arg(short, long, env = "TEMPO_SCOUT_CATALOG")]
        catalog: Option<PathBuf>,
        /// Fuzzy match acceptance threshold (0-100)
        #[arg(long)]
        threshold: Option<f64>,
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Generate a fresh playlist around the playlist's mean tempo
    Recommend {
        /// Path to the user playlist CSV
        playlist: PathBuf,
        /// Path to the catalog CSV
        #[arg(short, long, env = "TEMPO_SCOUT_CATALOG")]
        catalog: Option<PathBuf>,
        /// Fuzzy match acceptance threshold (0-100)
        #[arg(long)]
        threshold: Option<f64>,
        /// Number of tracks to return
        #[arg(short, long)]
        size: Option<usize>,
        /// Half-width of the tempo window in BPM
        #[arg(long)]
        window: Option<f64>,
        /// Keep tracks the playlist already contains instead of excluding them
        #[arg(long)]
        keep_known: bool,
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Rank catalog tracks by closeness to the playlist's mean of one feature
    Feature {
        /// Path to the user playlist CSV
        playlist: PathBuf,
        /// Feature name (tempo, popularity, energy, danceability, ...)
        feature: String,
        /// Path to the catalog CSV
        #[arg(short, long, env = "TEMPO_SCOUT_CATALOG")]
        catalog: Option<PathBuf>,
        /// Fuzzy match acceptance threshold (0-100)
        #[arg(long)]
        threshold: Option<f64>,
        /// Number of tracks to return
        #[arg(short, long)]
        size: Option<usize>,
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = config::load();

    match &cli.command {
        Commands::Catalog {
            catalog,
            chunk_size,
            save_default,
        } => cmd_catalog(&config, catalog.as_deref(), *chunk_size, *save_default),
        Commands::Enrich {
            playlist,
            catalog,
            threshold,
        } => cmd_enrich(&config, playlist, catalog.as_deref(), *threshold),
        Commands::Closest {
            playlist,
            catalog,
            threshold,
            format,
        } => cmd_closest(&config, playlist, catalog.as_deref(), *threshold, format),
        Commands::Recommend {
            playlist,
            catalog,
            threshold,
            size,
            window,
            keep_known,
            format,
        } => cmd_recommend(
            &config,
            playlist,
            catalog.as_deref(),
            *threshold,
            *size,
            *window,
            *keep_known,
            format,
        ),
        Commands::Feature {
            playlist,
            feature,
            catalog,
            threshold,
            size,
            format,
        } => cmd_feature(
            &config,
            playlist,
            feature,
            catalog.as_deref(),
            *threshold,
            *size,
            format,
        ),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Resolve the catalog path from the CLI flag or the config file.
pub(crate) fn resolve_catalog_path(
    config: &Config,
    flag: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    let path = flag.map(Path::to_path_buf)
        .or_else(|| config.catalog.path.clone())
        .ok_or_else(|| {
            Error::config(format!(
                "no catalog path given; pass --catalog or set catalog.path in {}",
                config::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "the config file".to_string())
            ))
        })?;
    Ok(path)
}

/// Load the catalog with CLI overrides applied.
pub(crate) fn load_catalog(
    config: &Config,
    flag: Option<&Path>,
    chunk_size: Option<usize>,
) -> anyhow::Result<crate::catalog::Catalog> {
    let path = resolve_catalog_path(config, flag)?;
    let chunk_size = chunk_size.unwrap_or(config.catalog.chunk_size);
    Ok(crate::catalog::load_with_chunk_size(&path, chunk_size)?)
}

/// Read and enrich a user playlist against an already-loaded catalog.
pub(crate) fn load_enriched(
    config: &Config,
    catalog: &crate::catalog::Catalog,
    playlist: &Path,
    threshold: Option<f64>,
) -> anyhow::Result<Vec<EnrichedTrack>> {
    let user = crate::playlist::read(playlist)?;
    let threshold = threshold.unwrap_or(config.matching.fuzzy_threshold);
    Ok(crate::enrichment::enrich(&user, catalog, threshold)?)
}

/// Print the no-matches notice used by every recommendation command.
pub(crate) fn report_no_matches() {
    println!("No matching songs found in the catalog; nothing to recommend.");
}
