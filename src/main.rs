//! Tempo Scout - playlist recommendations from tempo and popularity.
//!
//! This tool compares a user-supplied playlist against a reference
//! catalog of tracks grouped into playlists: it enriches the user's
//! tracks with catalog audio features, finds the catalog playlist with
//! the closest mean tempo, and generates fresh candidate playlists
//! filtered by a tempo window (or any single audio feature) and ranked
//! by popularity.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod model;
pub mod playlist;
pub mod recommend;
pub mod stats;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("tempo_scout=info".parse().unwrap()))
        .init();

    cli::run_command(&args)
}
