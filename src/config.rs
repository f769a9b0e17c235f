//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\tempo-scout\config.toml
//! - macOS: ~/Library/Application Support/tempo-scout/config.toml
//! - Linux: ~/.config/tempo-scout/config.toml
//!
//! The config file is human-readable and editable. It holds the default
//! catalog location and the pipeline's tunable knobs; every setting can
//! still be overridden per invocation with CLI flags.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::DEFAULT_CHUNK_SIZE;
use crate::enrichment::DEFAULT_THRESHOLD;
use crate::recommend::{DEFAULT_PLAYLIST_SIZE, DEFAULT_TEMPO_WINDOW};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reference catalog settings
    pub catalog: CatalogConfig,

    /// Enrichment/matching settings
    pub matching: MatchingConfig,

    /// Recommendation settings
    pub recommend: RecommendConfig,
}

/// Reference catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Default catalog CSV path (None = must be passed on the command line)
    pub path: Option<PathBuf>,

    /// Tracks per synthesized playlist chunk when the file has no labels
    pub chunk_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Enrichment/matching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Fuzzy match acceptance threshold (0-100)
    pub fuzzy_threshold: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Recommendation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Half-width of the tempo window in BPM
    pub tempo_window: f64,

    /// Number of tracks in a generated playlist
    pub playlist_size: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            tempo_window: DEFAULT_TEMPO_WINDOW,
            playlist_size: DEFAULT_PLAYLIST_SIZE,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tempo-scout"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let dir = config_dir().ok_or(ConfigError::NoConfigDir)?;
    let path = dir.join("config.toml");

    // Ensure directory exists
    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::CreateDir(dir.clone(), e))?;

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, &path)
        .map_err(|e| ConfigError::Rename(temp_path, path.clone(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[catalog]"));
        assert!(toml.contains("[matching]"));
        assert!(toml.contains("[recommend]"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.catalog.path = Some(PathBuf::from("/data/songs.csv"));
        config.matching.fuzzy_threshold = 72.5;
        config.recommend.playlist_size = 25;

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(parsed.catalog.path, Some(PathBuf::from("/data/songs.csv")));
        assert_eq!(parsed.matching.fuzzy_threshold, 72.5);
        assert_eq!(parsed.recommend.playlist_size, 25);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        // Config with only some fields
        let toml = r#"
[catalog]
path = "/data/songs.csv"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        // Specified field is set
        assert_eq!(config.catalog.path, Some(PathBuf::from("/data/songs.csv")));

        // Other fields use defaults
        assert_eq!(config.catalog.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.matching.fuzzy_threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.recommend.tempo_window, DEFAULT_TEMPO_WINDOW);
        assert_eq!(config.recommend.playlist_size, DEFAULT_PLAYLIST_SIZE);
    }
}
