use serde::{Deserialize, Serialize};
use setlist_core::TrackRecord;

/// One search result: the original track and its rounded score.
///
/// Serializes flat, as `{score, title, artist, album, key, bpm, path}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Weighted score in `[0, 100]`, rounded to two decimals.
    pub score: f64,
    #[serde(flatten)]
    pub track: TrackRecord,
}
