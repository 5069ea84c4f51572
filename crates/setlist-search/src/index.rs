use setlist_core::{NormalizedRecord, TrackRecord};

use crate::hit::SearchHit;
use crate::pipeline;
use crate::query::{ParsedQuery, QueryError};

/// An immutable, searchable track index.
///
/// Holds three parallel sequences: the original tracks, their normalized
/// records and their coarse search texts. Position `i` in each refers to the
/// same track. A new catalog means a new index; there is no in-place update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackIndex {
    tracks: Vec<TrackRecord>,
    normalized: Vec<NormalizedRecord>,
    coarse: Vec<String>,
}

impl TrackIndex {
    /// Build an index from catalog tracks, normalizing each one in order.
    #[must_use]
    pub fn build(tracks: Vec<TrackRecord>) -> Self {
        let normalized: Vec<NormalizedRecord> =
            tracks.iter().map(NormalizedRecord::from_track).collect();
        let coarse = normalized.iter().map(NormalizedRecord::coarse_text).collect();

        log::info!("Built index over {} tracks", tracks.len());
        Self {
            tracks,
            normalized,
            coarse,
        }
    }

    /// Reassemble an index from previously derived sequences without
    /// recomputing or cross-checking them.
    pub(crate) fn from_parts(
        tracks: Vec<TrackRecord>,
        normalized: Vec<NormalizedRecord>,
        coarse: Vec<String>,
    ) -> Self {
        Self {
            tracks,
            normalized,
            coarse,
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[TrackRecord] {
        &self.tracks
    }

    pub fn normalized(&self) -> &[NormalizedRecord] {
        &self.normalized
    }

    pub fn coarse_texts(&self) -> &[String] {
        &self.coarse
    }

    /// Search with a raw query string.
    ///
    /// Returns at most `limit` hits scoring at least `threshold`, best first.
    ///
    /// # Errors
    /// Returns a [`QueryError`] if the query cannot be parsed.
    pub fn search(
        &self,
        query: &str,
        limit: usize,
        threshold: f64,
    ) -> Result<Vec<SearchHit>, QueryError> {
        let parsed = ParsedQuery::parse(query)?;
        Ok(self.search_parsed(&parsed, limit, threshold))
    }

    /// Run the shortlist → filter → score → rank pipeline for a parsed query.
    pub fn search_parsed(
        &self,
        query: &ParsedQuery,
        limit: usize,
        threshold: f64,
    ) -> Vec<SearchHit> {
        let candidates = pipeline::shortlist(&self.coarse, &query.free_text, limit);
        let survivors = pipeline::filter_candidates(
            &self.normalized,
            &candidates,
            query.phrase.as_deref(),
            &query.filters,
        );
        let scored = pipeline::score_candidates(&self.normalized, &survivors, &query.free_text);
        let ranked = pipeline::rank(scored, threshold, limit);

        log::debug!(
            "query {:?}: {} candidates, {} after filters, {} ranked",
            query.free_text,
            candidates.len(),
            survivors.len(),
            ranked.len()
        );

        ranked
            .into_iter()
            .filter_map(|candidate| {
                self.tracks.get(candidate.index).map(|track| SearchHit {
                    score: pipeline::round_score(candidate.score),
                    track: track.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<TrackRecord> {
        vec![
            TrackRecord::new("Once in a Lifetime", "Talking Heads").with_bpm("118"),
            TrackRecord::new("Take On Me", "a-ha").with_bpm("169"),
        ]
    }

    #[test]
    fn test_build_keeps_sequences_aligned() {
        let index = TrackIndex::build(catalog());
        assert_eq!(index.len(), 2);
        assert_eq!(index.normalized().len(), 2);
        assert_eq!(index.coarse_texts().len(), 2);
        assert_eq!(index.normalized()[1].title, "take on me");
        assert_eq!(index.coarse_texts()[0], "once in a lifetime | talking heads | ");
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(TrackIndex::build(catalog()), TrackIndex::build(catalog()));
    }

    #[test]
    fn test_empty_index() {
        let index = TrackIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index.search("anything", 10, 0.0).unwrap().is_empty());
        assert!(index.search("", 10, 0.0).unwrap().is_empty());
    }

    #[test]
    fn test_range_and_phrase_query() {
        let index = TrackIndex::build(catalog());
        let hits = index.search("bpm:100..130 'once in a lifetime'", 10, 60.0).unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].track.title, "Once in a Lifetime");
        assert!(hits[0].score >= 60.0 && hits[0].score <= 100.0);
    }

    #[test]
    fn test_field_filter_without_free_text() {
        let index = TrackIndex::build(catalog());
        let hits = index.search("artist:a-ha", 10, 0.0).unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].track.artist, "a-ha");
    }

    #[test]
    fn test_free_text_ranks_best_match_first() {
        let index = TrackIndex::build(catalog());
        let hits = index.search("take on me", 10, 0.0).unwrap();

        assert_eq!(hits[0].track.title, "Take On Me");
        assert!(hits.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn test_limit_and_threshold() {
        let index = TrackIndex::build(catalog());
        assert_eq!(index.search("artist:a", 1, 0.0).unwrap().len(), 1);
        assert!(index.search("take on me", 10, 100.0).unwrap().len() <= 1);
        assert!(index.search("zzzz qqqq", 10, 60.0).unwrap().is_empty());
    }

    #[test]
    fn test_scores_are_rounded() {
        let index = TrackIndex::build(catalog());
        for hit in index.search("lifetime", 10, 0.0).unwrap() {
            assert!((hit.score * 100.0 - (hit.score * 100.0).round()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_invalid_range_bound() {
        let index = TrackIndex::build(catalog());
        assert!(index.search("bpm:0..99999999999999999999", 10, 0.0).is_err());
    }
}
