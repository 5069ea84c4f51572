//! Catalog loading.
//!
//! A catalog is either a JSON array of objects or a CSV file with a header
//! row. Keys and headers are matched case-insensitively against the track
//! fields; the path falls back to the `SourceFile` and `FileName` columns
//! written by the tagging and analysis tools.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::TrackRecord;

const TITLE: &[&str] = &["title"];
const ARTIST: &[&str] = &["artist"];
const ALBUM: &[&str] = &["album"];
const KEY: &[&str] = &["key"];
const BPM: &[&str] = &["bpm"];
const PATH: &[&str] = &["path", "sourcefile", "filename"];

/// The on-disk format of a catalog file, detected from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Csv,
}

impl CatalogFormat {
    /// Detect the format from a file extension (case-insensitive).
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedCatalog`] for anything but `.json`/`.csv`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(Error::UnsupportedCatalog {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Load every track from a catalog file, in file order.
pub fn load_catalog(path: &Path) -> Result<Vec<TrackRecord>> {
    let format = CatalogFormat::from_path(path)?;
    let tracks = match format {
        CatalogFormat::Json => {
            let reader = BufReader::new(File::open(path)?);
            let value: Value = serde_json::from_reader(reader)?;
            tracks_from_json(value)?
        }
        CatalogFormat::Csv => {
            let reader = csv::ReaderBuilder::new()
                .flexible(true)
                .trim(csv::Trim::Headers)
                .from_path(path)?;
            tracks_from_csv(reader)?
        }
    };

    log::info!(
        "Loaded {} tracks from {} ({:?})",
        tracks.len(),
        path.display(),
        format
    );
    Ok(tracks)
}

/// Build a track from a lookup returning the first non-empty value for a
/// lower-cased field name.
fn track_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TrackRecord {
    let first = |names: &[&str]| names.iter().find_map(|name| lookup(*name)).unwrap_or_default();
    TrackRecord {
        title: first(TITLE),
        artist: first(ARTIST),
        album: first(ALBUM),
        key: first(KEY),
        bpm: first(BPM),
        path: first(PATH),
    }
}

fn tracks_from_json(value: Value) -> Result<Vec<TrackRecord>> {
    let Value::Array(rows) = value else {
        return Err(Error::InvalidData(
            "JSON catalog must be an array of track objects".to_string(),
        ));
    };

    let mut tracks = Vec::with_capacity(rows.len());
    for (row_number, row) in rows.iter().enumerate() {
        let Value::Object(fields) = row else {
            log::warn!("Skipping catalog row {row_number}: not an object");
            continue;
        };
        tracks.push(track_from_lookup(|name| {
            fields
                .iter()
                .filter(|(key, _)| key.trim().eq_ignore_ascii_case(name))
                .find_map(|(_, value)| json_text(value))
        }));
    }
    Ok(tracks)
}

/// Render a JSON scalar as catalog text; null and empty strings count as absent.
fn json_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn tracks_from_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<TrackRecord>> {
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();

    let mut tracks = Vec::new();
    for result in reader.records() {
        let record = result?;
        tracks.push(track_from_lookup(|name| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, header)| header.as_str() == name)
                .find_map(|(idx, _)| record.get(idx).filter(|v| !v.is_empty()))
                .map(str::to_string)
        }));
    }
    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            CatalogFormat::from_path(Path::new("songs.json")).unwrap(),
            CatalogFormat::Json
        );
        assert_eq!(
            CatalogFormat::from_path(Path::new("SONGS.CSV")).unwrap(),
            CatalogFormat::Csv
        );
    }

    #[test]
    fn test_format_rejects_unknown_extension() {
        let result = CatalogFormat::from_path(Path::new("songs.xlsx"));
        assert!(matches!(result, Err(Error::UnsupportedCatalog { .. })));

        let result = CatalogFormat::from_path(Path::new("songs"));
        assert!(matches!(result, Err(Error::UnsupportedCatalog { .. })));
    }

    #[test]
    fn test_load_json_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "songs.json",
            r#"[
                {"title": "Once in a Lifetime", "artist": "Talking Heads", "bpm": 118},
                {"Title": "Take On Me", "Artist": "a-ha", "BPM": "169", "Key": "A major"}
            ]"#,
        );

        let tracks = load_catalog(&path).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].title, "Once in a Lifetime");
        assert_eq!(tracks[0].bpm, "118");
        assert_eq!(tracks[0].album, "");
        assert_eq!(tracks[1].artist, "a-ha");
        assert_eq!(tracks[1].key, "A major");
        assert_eq!(tracks[1].bpm, "169");
    }

    #[test]
    fn test_load_json_null_and_non_object_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "songs.json",
            r#"[{"title": "Song", "album": null, "bpm": 120.0}, 42, "nope"]"#,
        );

        let tracks = load_catalog(&path).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].album, "");
        assert_eq!(tracks[0].bpm, "120.0");
    }

    #[test]
    fn test_load_json_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "songs.json", r#"{"title": "Song"}"#);

        let result = load_catalog(&path);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_load_json_path_aliases() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "songs.json",
            r#"[
                {"title": "A", "SourceFile": "./Artist;Album;01;A.mp3"},
                {"title": "B", "filename": "b.mp3"},
                {"title": "C", "path": "/music/c.mp3", "SourceFile": "ignored"}
            ]"#,
        );

        let tracks = load_catalog(&path).unwrap();
        assert_eq!(tracks[0].path, "./Artist;Album;01;A.mp3");
        assert_eq!(tracks[1].path, "b.mp3");
        assert_eq!(tracks[2].path, "/music/c.mp3");
    }

    #[test]
    fn test_load_csv_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "songs.csv",
            "SourceFile,Artist,Title,Album,Track,Bpm,Key,FileName,Directory\n\
             ./Talking Heads;Remain in Light;03;Once.mp3,Talking Heads,Once in a Lifetime,Remain in Light,3,118,A major,Once.mp3,/Volumes/Music\n\
             ./a-ha;Hunting;01;Take.mp3,a-ha,Take On Me,,1,,,Take.mp3,/Volumes/Music\n",
        );

        let tracks = load_catalog(&path).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].title, "Once in a Lifetime");
        assert_eq!(tracks[0].album, "Remain in Light");
        assert_eq!(tracks[0].bpm, "118");
        assert_eq!(tracks[0].key, "A major");
        assert_eq!(tracks[0].path, "./Talking Heads;Remain in Light;03;Once.mp3");
        assert_eq!(tracks[1].album, "");
        assert_eq!(tracks[1].bpm, "");
    }

    #[test]
    fn test_load_csv_without_album_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "songs.csv",
            "title,artist,bpm\nOnce in a Lifetime,Talking Heads,118\nTake On Me,a-ha,169\n",
        );

        let tracks = load_catalog(&path).unwrap();
        assert_eq!(tracks.len(), 2);
        assert!(tracks.iter().all(|t| t.album.is_empty()));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = load_catalog(Path::new("/nonexistent/songs.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_unsupported_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "songs.txt", "title\nSong\n");

        let result = load_catalog(&path);
        assert!(matches!(result, Err(Error::UnsupportedCatalog { .. })));
    }
}
