use anyhow::Result;
use std::path::Path;

use setlist_search::SearchHit;

/// Search an index file and print the results.
pub fn run_search(
    index_path: &Path,
    query: &str,
    limit: usize,
    threshold: f64,
    json: bool,
) -> Result<()> {
    let hits = setlist_search::search_index(index_path, query, limit, threshold)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else if hits.is_empty() {
        println!("No matches.");
    } else {
        for hit in &hits {
            println!("{}", format_hit(hit));
        }
    }

    Ok(())
}

/// One result line: score, artist and title, key and tempo, then the path.
pub fn format_hit(hit: &SearchHit) -> String {
    let track = &hit.track;
    format!(
        "{:6.2}  {} - {}  [{} • {}]  {}",
        hit.score, track.artist, track.title, track.key, track.bpm, track.path
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use setlist_core::TrackRecord;

    #[test]
    fn test_format_hit() {
        let hit = SearchHit {
            score: 63.89,
            track: TrackRecord::new("Once in a Lifetime", "Talking Heads")
                .with_key("A major")
                .with_bpm("118")
                .with_path("/music/once.mp3"),
        };
        assert_eq!(
            format_hit(&hit),
            " 63.89  Talking Heads - Once in a Lifetime  [A major • 118]  /music/once.mp3"
        );
    }

    #[test]
    fn test_format_hit_pads_score() {
        let hit = SearchHit {
            score: 7.5,
            track: TrackRecord::new("Song", "Band"),
        };
        assert!(format_hit(&hit).starts_with("  7.50  Band - Song"));
    }

    #[test]
    fn test_run_search_blank_query_succeeds_without_index() {
        let result = run_search(Path::new("/nonexistent/songs.index"), "  ", 10, 60.0, false);
        assert!(result.is_ok());
    }

    #[test]
    fn test_run_search_missing_index_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_search(&dir.path().join("songs.index"), "song", 10, 60.0, false);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("index not found"));
    }
}
