use anyhow::Result;
use std::path::Path;

use setlist_search::TrackIndex;

/// Summary counts for a loaded index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub tracks: usize,
    pub with_bpm: usize,
    pub with_key: usize,
}

impl IndexStats {
    pub fn of(index: &TrackIndex) -> Self {
        let normalized = index.normalized();
        Self {
            tracks: index.len(),
            with_bpm: normalized.iter().filter(|n| n.bpm_value().is_some()).count(),
            with_key: normalized.iter().filter(|n| !n.key.is_empty()).count(),
        }
    }
}

/// Show statistics for an index file.
pub fn show_info(index_path: &Path) -> Result<()> {
    let index = TrackIndex::load(index_path)?;
    let stats = IndexStats::of(&index);

    println!("\nSetlist Index\n");
    println!("  Index: {}", index_path.display());
    println!("  Tracks: {}", stats.tracks);
    println!("  With bpm: {}", stats.with_bpm);
    println!("  With key: {}", stats.with_key);

    if stats.with_bpm < stats.tracks {
        println!("\n  Tracks without a numeric bpm never match bpm:<lo>..<hi> queries");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use setlist_core::TrackRecord;

    #[test]
    fn test_index_stats() {
        let index = TrackIndex::build(vec![
            TrackRecord::new("Once in a Lifetime", "Talking Heads")
                .with_key("A major")
                .with_bpm("118"),
            TrackRecord::new("Lullaby", "The Cure").with_bpm("fast"),
            TrackRecord::new("Take On Me", "a-ha").with_key("A minor"),
        ]);
        assert_eq!(
            IndexStats::of(&index),
            IndexStats {
                tracks: 3,
                with_bpm: 1,
                with_key: 2,
            }
        );
    }

    #[test]
    fn test_show_info_on_saved_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songs.index");
        TrackIndex::build(vec![TrackRecord::new("Song", "Band")])
            .save(&path)
            .unwrap();

        assert!(show_info(&path).is_ok());
    }
}
