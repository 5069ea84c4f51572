pub mod track;

pub use track::{NormalizedRecord, TrackRecord, COARSE_SEPARATOR};
