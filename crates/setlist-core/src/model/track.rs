use serde::{Deserialize, Serialize};

use crate::normalize::{normalize, normalize_key, parse_int};

/// Separator between fields in a coarse search text.
pub const COARSE_SEPARATOR: &str = " | ";

/// One catalog entry, as read from the source file.
///
/// Every field defaults to the empty string when the source omits it. `bpm`
/// and `key` are usually filled by an external analysis pass and are kept as
/// opaque text here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackRecord {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Free-form musical key, e.g. `"C# minor"`.
    pub key: String,
    /// Tempo as written in the catalog; may be empty or non-numeric.
    pub bpm: String,
    /// Filesystem path or pseudo-path of the audio file.
    pub path: String,
}

impl TrackRecord {
    /// Create a record with title and artist set and all other fields empty.
    #[must_use]
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn with_bpm(mut self, bpm: impl Into<String>) -> Self {
        self.bpm = bpm.into();
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

/// Canonical comparison forms of a [`TrackRecord`].
///
/// Derived once at index build time and never mutated independently of the
/// track it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Key with the mode compacted (`"c#m"`, `"e"`).
    pub key: String,
    /// Integer tempo rendered as text, or empty if the source was unparsable.
    pub bpm: String,
}

impl NormalizedRecord {
    #[must_use]
    pub fn from_track(track: &TrackRecord) -> Self {
        Self {
            title: normalize(&track.title),
            artist: normalize(&track.artist),
            album: normalize(&track.album),
            key: normalize_key(&track.key),
            bpm: parse_int(&track.bpm)
                .map(|bpm| bpm.to_string())
                .unwrap_or_default(),
        }
    }

    /// The tempo as an integer, if the record has one.
    #[must_use]
    pub fn bpm_value(&self) -> Option<i64> {
        parse_int(&self.bpm)
    }

    /// Title, artist and album joined for approximate shortlisting.
    #[must_use]
    pub fn coarse_text(&self) -> String {
        [
            self.title.as_str(),
            self.artist.as_str(),
            self.album.as_str(),
        ]
        .join(COARSE_SEPARATOR)
    }
}

impl From<&TrackRecord> for NormalizedRecord {
    fn from(track: &TrackRecord) -> Self {
        Self::from_track(track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_record_defaults_to_empty() {
        let track = TrackRecord::default();
        assert!(track.title.is_empty());
        assert!(track.bpm.is_empty());
        assert!(track.path.is_empty());
    }

    #[test]
    fn test_track_record_deserializes_missing_fields() {
        let track: TrackRecord = serde_json::from_str(r#"{"title": "Take On Me"}"#).unwrap();
        assert_eq!(track.title, "Take On Me");
        assert_eq!(track.album, "");
        assert_eq!(track.key, "");
    }

    #[test]
    fn test_normalized_record_from_track() {
        let track = TrackRecord::new("Once in a Lifetime", "Talking Heads")
            .with_album("Remain in Light")
            .with_key("A Major")
            .with_bpm("118");
        let norm = NormalizedRecord::from_track(&track);

        assert_eq!(norm.title, "once in a lifetime");
        assert_eq!(norm.artist, "talking heads");
        assert_eq!(norm.album, "remain in light");
        assert_eq!(norm.key, "a");
        assert_eq!(norm.bpm, "118");
        assert_eq!(norm.bpm_value(), Some(118));
    }

    #[test]
    fn test_minor_key_is_compacted() {
        let track = TrackRecord::new("Lullaby", "The Cure").with_key("C# minor");
        assert_eq!(NormalizedRecord::from(&track).key, "c#m");
    }

    #[test]
    fn test_unparsable_bpm_becomes_empty() {
        let track = TrackRecord::new("Song", "Band").with_bpm("fast");
        let norm = NormalizedRecord::from_track(&track);
        assert_eq!(norm.bpm, "");
        assert_eq!(norm.bpm_value(), None);
    }

    #[test]
    fn test_float_bpm_is_truncated_to_integer_text() {
        let track = TrackRecord::new("Song", "Band").with_bpm("169.0");
        assert_eq!(NormalizedRecord::from_track(&track).bpm, "169");
    }

    #[test]
    fn test_coarse_text_joins_title_artist_album() {
        let track = TrackRecord::new("Take On Me", "a-ha").with_album("Hunting High and Low");
        let norm = NormalizedRecord::from_track(&track);
        assert_eq!(norm.coarse_text(), "take on me | a-ha | hunting high and low");
    }

    #[test]
    fn test_coarse_text_with_empty_album() {
        let norm = NormalizedRecord::from_track(&TrackRecord::new("Take On Me", "a-ha"));
        assert_eq!(norm.coarse_text(), "take on me | a-ha | ");
    }
}
