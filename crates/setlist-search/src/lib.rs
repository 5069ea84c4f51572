//! Fuzzy track search for setlist.
//!
//! Builds a [`TrackIndex`] from catalog tracks, persists it as a single file
//! and answers queries with a two-stage pipeline: a fuzzy shortlist over
//! coarse text, exact filters, then a weighted per-field rescore.
//!
//! ```
//! use setlist_core::TrackRecord;
//! use setlist_search::TrackIndex;
//!
//! let index = TrackIndex::build(vec![
//!     TrackRecord::new("Once in a Lifetime", "Talking Heads").with_bpm("118"),
//!     TrackRecord::new("Take On Me", "a-ha").with_bpm("169"),
//! ]);
//! let hits = index.search("bpm:100..130 'once in a lifetime'", 10, 60.0).unwrap();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].track.artist, "Talking Heads");
//! ```

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

use std::path::Path;

pub mod error;
pub mod hit;
pub mod index;
pub mod persist;
pub mod pipeline;
pub mod query;
pub mod similarity;

pub use error::{PersistError, SearchError, SearchResult};
pub use hit::SearchHit;
pub use index::TrackIndex;
pub use query::{BpmRange, Field, Filters, ParsedQuery, QueryError};

/// Default maximum number of results.
pub const DEFAULT_LIMIT: usize = 10;
/// Default minimum score (0–100) for a result to be returned.
pub const DEFAULT_THRESHOLD: f64 = 60.0;

/// Build an index from a catalog file and write it to `output`.
///
/// The catalog format is checked before anything is read, so an unsupported
/// extension fails with [`SearchError::Usage`] and writes nothing.
pub fn build_index(catalog: &Path, output: &Path) -> SearchResult<TrackIndex> {
    setlist_core::CatalogFormat::from_path(catalog)?;
    let tracks = setlist_core::load_catalog(catalog)?;
    let index = TrackIndex::build(tracks);
    index.save(output)?;
    Ok(index)
}

/// Load the index at `index_path` and search it.
///
/// A blank query returns no results without touching the filesystem. `limit`
/// is raised to at least 1. Query failures are reported as
/// [`SearchError::SearchFailed`].
pub fn search_index(
    index_path: &Path,
    query: &str,
    limit: usize,
    threshold: f64,
) -> SearchResult<Vec<SearchHit>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let index = TrackIndex::load(index_path)?;
    index
        .search(query, limit.max(1), threshold)
        .map_err(|source| SearchError::SearchFailed {
            query: query.to_string(),
            source,
        })
}
