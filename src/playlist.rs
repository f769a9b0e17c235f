//! User playlist ingestion.
//!
//! A user playlist is a delimited file naming tracks the user already
//! listens to. Unlike the catalog it carries no audio features; rows
//! only need to be identifiable, either through a shared catalog
//! identifier or through a title+artist pair the enricher can fuzzy
//! match. Header aliases are resolved with the same rules as the
//! catalog loader.

use std::path::Path;

use tracing::info;

use crate::catalog::columns::{ARTIST, ColumnMap, ID, TITLE};
use crate::error::{Error, Result};
use crate::model::UserTrack;

/// Read a user playlist file.
///
/// Fails with [`Error::Schema`] when the file resolves neither an
/// identifier column nor a title+artist pair; the enricher would have
/// no way to line its rows up with the catalog.
pub fn read(path: &Path) -> Result<Vec<UserTrack>> {
    if !path.exists() {
        return Err(Error::not_found(path));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let cols = ColumnMap::from_headers(headers.iter());

    if !cols.contains(ID) && !(cols.contains(TITLE) && cols.contains(ARTIST)) {
        return Err(Error::schema(["id (or title and artist)"]));
    }

    let mut tracks = Vec::new();
    let mut skipped_blank = 0usize;
    for record in reader.records() {
        let record = record?;
        let track = UserTrack {
            id: cols.field(&record, ID).map(str::to_string),
            title: cols.field(&record, TITLE).map(str::to_string),
            artist: cols.field(&record, ARTIST).map(str::to_string),
        };
        if track.id.is_none() && track.title.is_none() && track.artist.is_none() {
            skipped_blank += 1;
            continue;
        }
        tracks.push(track);
    }

    info!(
        target: "playlist::read",
        path = %path.display(),
        tracks = tracks.len(),
        skipped_blank,
        "user playlist read"
    );

    Ok(tracks)
}
