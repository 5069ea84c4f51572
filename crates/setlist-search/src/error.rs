//! Error types for index building, loading and searching.

use std::path::PathBuf;

use thiserror::Error;

use crate::query::QueryError;

/// Errors raised while encoding or decoding a persisted index.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed index data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported index format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// The failure surface seen by callers of the index.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The index file does not exist.
    #[error(
        "index not found: {}. Build it with: setlist build -i songs.json -o {}",
        path.display(),
        path.display()
    )]
    NotFound { path: PathBuf },

    /// The index file exists but could not be read or decoded.
    #[error("failed to load index '{}': {source}", path.display())]
    LoadFailed {
        path: PathBuf,
        source: PersistError,
    },

    /// Parsing or evaluating a query failed.
    #[error("search failed for query '{query}': {source}")]
    SearchFailed { query: String, source: QueryError },

    /// The caller supplied input the engine cannot work with.
    #[error("usage error: {0}")]
    Usage(String),

    /// The catalog could not be read.
    #[error("failed to read catalog: {0}")]
    Catalog(#[source] setlist_core::Error),

    /// The index file could not be written.
    #[error("failed to write index '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: PersistError,
    },
}

impl SearchError {
    /// Returns `true` when the index file is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for errors caused by invalid caller input.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

impl From<setlist_core::Error> for SearchError {
    fn from(err: setlist_core::Error) -> Self {
        match err {
            setlist_core::Error::UnsupportedCatalog { .. } => Self::Usage(err.to_string()),
            other => Self::Catalog(other),
        }
    }
}

/// Convenience alias for index and search results.
pub type SearchResult<T> = std::result::Result<T, SearchError>;
