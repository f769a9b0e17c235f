//! Application-wide error types.
//!
//! This module provides a unified error hierarchy for the application.
//! Library modules return [`Error`] via `thiserror`, while CLI/main uses
//! `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Validation failures ([`Error::Schema`]) carry the missing column
//!   names so they can be surfaced verbatim to the user
//! - Empty-table aggregates and unknown features get their own variants
//!   so callers can distinguish them from I/O faults
//!
//! Note that an *empty result* (no fuzzy matches, no candidates in the
//! tempo window) is not an error at all: those come back as empty
//! collections and the caller decides how to report them.

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
///
/// Aggregates errors from all pipeline stages for unified handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Required columns absent after alias resolution
    #[error("missing required columns: {}", .0.join(", "))]
    Schema(Vec<String>),

    /// An aggregate (e.g. mean tempo) was requested over zero rows
    #[error("cannot compute {0} over an empty table")]
    EmptyInput(String),

    /// Unknown or unavailable audio feature
    #[error("invalid audio feature: {0}")]
    InvalidFeature(String),

    /// File not found
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a schema error from the missing canonical column names.
    pub fn schema<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Schema(missing.into_iter().map(Into::into).collect())
    }

    /// Create an empty-input error naming the requested aggregate.
    pub fn empty_input(aggregate: impl Into<String>) -> Self {
        Self::EmptyInput(aggregate.into())
    }

    /// Create an invalid-feature error.
    pub fn invalid_feature(message: impl Into<String>) -> Self {
        Self::InvalidFeature(message.into())
    }

    /// Create a not found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, csv::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Csv(e).context(ctx))
    }
}
