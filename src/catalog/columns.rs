//! CSV header alias resolution.
//!
//! Catalog exports differ in how they spell their headers (`track_name`
//! vs `name` vs `Song`). Everything downstream works against the
//! canonical names defined here; raw headers are mapped once when a
//! file is opened.

use std::collections::HashMap;

use crate::error::{Error, Result};

pub const ID: &str = "id";
pub const TITLE: &str = "title";
pub const ARTIST: &str = "artist";
pub const TEMPO: &str = "tempo";
pub const POPULARITY: &str = "popularity";
pub const PLAYLIST: &str = "playlist";

/// Map a raw CSV header to its canonical column name.
///
/// Matching is case-insensitive and tolerant of surrounding whitespace.
/// Unrecognized headers return `None` and are ignored by the readers.
pub fn canonical(header: &str) -> Option<&'static str> {
    let normalized = header.trim().to_ascii_lowercase();
    let name = match normalized.as_str() {
        "id" | "track_id" => ID,
        "title" | "name" | "track_name" | "song" => TITLE,
        "artist" | "artists" | "track_artist" => ARTIST,
        "tempo" => TEMPO,
        "popularity" | "track_popularity" => POPULARITY,
        "playlist" | "playlist_name" => PLAYLIST,
        "danceability" => "danceability",
        "energy" => "energy",
        "key" => "key",
        "loudness" => "loudness",
        "mode" => "mode",
        "speechiness" => "speechiness",
        "acousticness" => "acousticness",
        "liveness" => "liveness",
        _ => return None,
    };
    Some(name)
}

/// Resolved header layout of a CSV file: canonical name to column index.
///
/// When a file repeats a header (or two raw headers resolve to the same
/// canonical name), the first occurrence wins.
#[derive(Debug, Default)]
pub struct ColumnMap {
    indices: HashMap<&'static str, usize>,
}

impl ColumnMap {
    /// Resolve a header row into a column map.
    pub fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut indices = HashMap::new();
        for (idx, header) in headers.into_iter().enumerate() {
            if let Some(name) = canonical(header) {
                indices.entry(name).or_insert(idx);
            }
        }
        Self { indices }
    }

    /// Column index of a canonical name, if the file has it.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// True when the file resolved a column for this canonical name.
    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// Verify that all `required` columns resolved, reporting the
    /// missing canonical names otherwise.
    pub fn require(&self, required: &[&'static str]) -> Result<()> {
        let missing: Vec<String> = required
            .iter()
            .filter(|name| !self.contains(name))
            .map(|name| name.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Schema(missing))
        }
    }

    /// Fetch a trimmed, non-empty field from a record.
    ///
    /// Returns `None` for absent columns, short records, and blank
    /// values alike: a blank cell is a missing value.
    pub fn field<'r>(&self, record: &'r csv::StringRecord, name: &str) -> Option<&'r str> {
        let idx = self.get(name)?;
        let value = record.get(idx)?.trim();
        (!value.is_empty()).then_some(value)
    }

    /// Fetch and parse a numeric field.
    pub fn parse_f64(&self, record: &csv::StringRecord, name: &str) -> Option<f64> {
        self.field(record, name)?.parse().ok()
    }

    /// Fetch and parse an integer field.
    ///
    /// Accepts a float spelling (`"82.0"`) since some exports write
    /// integer columns that way.
    pub fn parse_i64(&self, record: &csv::StringRecord, name: &str) -> Option<i64> {
        let value = self.field(record, name)?;
        value
            .parse::<i64>()
            .ok()
            .or_else(|| value.parse::<f64>().ok().map(|v| v as i64))
    }
}
