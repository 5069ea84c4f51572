//! Index persistence.
//!
//! An index file is a zlib-compressed JSON document holding a format version
//! and the three aligned sequences. Loading restores them as stored; the
//! normalized records and coarse texts are not recomputed or re-validated.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use setlist_core::{NormalizedRecord, TrackRecord};

use crate::error::{PersistError, SearchError, SearchResult};
use crate::index::TrackIndex;

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct IndexFileRef<'a> {
    version: u32,
    tracks: &'a [TrackRecord],
    normalized: &'a [NormalizedRecord],
    coarse: &'a [String],
}

#[derive(Deserialize)]
struct IndexFile {
    version: u32,
    tracks: Vec<TrackRecord>,
    normalized: Vec<NormalizedRecord>,
    coarse: Vec<String>,
}

impl TrackIndex {
    /// Encode the index into a single opaque byte container.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistError> {
        let file = IndexFileRef {
            version: FORMAT_VERSION,
            tracks: self.tracks(),
            normalized: self.normalized(),
            coarse: self.coarse_texts(),
        };

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        serde_json::to_writer(&mut encoder, &file)?;
        encoder.flush()?;
        Ok(encoder.finish()?)
    }

    /// Decode bytes produced by [`TrackIndex::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistError> {
        let file: IndexFile = serde_json::from_reader(ZlibDecoder::new(bytes))?;
        if file.version != FORMAT_VERSION {
            return Err(PersistError::UnsupportedVersion {
                found: file.version,
                expected: FORMAT_VERSION,
            });
        }
        Ok(Self::from_parts(file.tracks, file.normalized, file.coarse))
    }

    /// Write the index to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> SearchResult<()> {
        let write_err = |source: PersistError| SearchError::Write {
            path: path.to_path_buf(),
            source,
        };

        let bytes = self.to_bytes().map_err(write_err)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_err(e.into()))?;
        }
        fs::write(path, bytes).map_err(|e| write_err(e.into()))?;

        log::info!("Wrote index with {} tracks to {}", self.len(), path.display());
        Ok(())
    }

    /// Load an index file.
    ///
    /// # Errors
    /// [`SearchError::NotFound`] if the file does not exist,
    /// [`SearchError::LoadFailed`] if it cannot be read or decoded.
    pub fn load(path: &Path) -> SearchResult<Self> {
        let bytes = fs::read(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                SearchError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                SearchError::LoadFailed {
                    path: path.to_path_buf(),
                    source: e.into(),
                }
            }
        })?;

        let index = Self::from_bytes(&bytes).map_err(|source| SearchError::LoadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded index with {} tracks from {}", index.len(), path.display());
        Ok(index)
    }
}
