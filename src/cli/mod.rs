//! Command-line interface for tempo-scout.
//!
//! The CLI is the presentation layer: it reads the input files, calls
//! into the pipeline modules, and renders their outputs as text or
//! JSON. No recommendation logic lives here.

mod commands;

pub use commands::{Cli, Commands, run_command};
