//! The search pipeline stages.
//!
//! Each stage is a pure function over the index's parallel sequences:
//! [`shortlist`] picks fuzzy candidates from the coarse texts, [`filter_candidates`]
//! applies the exact constraints, [`score_candidates`] computes the weighted
//! per-field score and [`rank`] thresholds, orders and truncates.

use setlist_core::normalize::normalize_key;
use setlist_core::NormalizedRecord;

use crate::query::Filters;
use crate::similarity::weighted_ratio;

pub const TITLE_WEIGHT: f64 = 0.55;
pub const ARTIST_WEIGHT: f64 = 0.40;
pub const ALBUM_WEIGHT: f64 = 0.05;

/// Lower bound on the fuzzy shortlist size.
pub const MIN_SHORTLIST: usize = 100;
/// Shortlist size per requested result.
pub const SHORTLIST_PER_RESULT: usize = 10;

/// A candidate position in the index and its weighted score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate {
    pub index: usize,
    pub score: f64,
}

/// Number of fuzzy candidates kept for a given result limit.
pub fn shortlist_size(limit: usize) -> usize {
    MIN_SHORTLIST.max(limit.saturating_mul(SHORTLIST_PER_RESULT))
}

/// Coarse candidate generation.
///
/// With free text, returns the `shortlist_size(limit)` best positions by
/// similarity against the coarse texts, best first, equal scores in index
/// order. Without free text every position is a candidate, in index order.
pub fn shortlist(coarse_texts: &[String], free_text: &str, limit: usize) -> Vec<usize> {
    if free_text.is_empty() {
        return (0..coarse_texts.len()).collect();
    }

    let mut scored: Vec<(usize, f64)> = coarse_texts
        .iter()
        .enumerate()
        .map(|(idx, text)| (idx, weighted_ratio(free_text, text)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(shortlist_size(limit));
    scored.into_iter().map(|(idx, _)| idx).collect()
}

/// Whether a normalized record satisfies the phrase and every active filter.
pub fn matches(record: &NormalizedRecord, phrase: Option<&str>, filters: &Filters) -> bool {
    if let Some(phrase) = phrase {
        if !record.title.contains(phrase) && !record.artist.contains(phrase) {
            return false;
        }
    }

    let text_filters = [
        (filters.title.as_deref(), record.title.as_str()),
        (filters.artist.as_deref(), record.artist.as_str()),
        (filters.album.as_deref(), record.album.as_str()),
    ];
    for (wanted, value) in text_filters {
        if wanted.is_some_and(|wanted| !value.contains(wanted)) {
            return false;
        }
    }

    if let Some(key) = &filters.key {
        if !record.key.contains(normalize_key(key).as_str()) {
            return false;
        }
    }

    if let Some(bpm) = &filters.bpm {
        if bpm != &record.bpm {
            return false;
        }
    }

    if let Some(range) = filters.bpm_range {
        match record.bpm_value() {
            Some(bpm) if range.contains(bpm) => {}
            _ => return false,
        }
    }

    true
}

/// Keep the candidates whose records pass [`matches`], preserving order.
pub fn filter_candidates(
    normalized: &[NormalizedRecord],
    candidates: &[usize],
    phrase: Option<&str>,
    filters: &Filters,
) -> Vec<usize> {
    candidates
        .iter()
        .copied()
        .filter(|&idx| {
            normalized
                .get(idx)
                .is_some_and(|record| matches(record, phrase, filters))
        })
        .collect()
}

/// Weighted title/artist/album similarity of a record against `text`, in `[0, 100]`.
pub fn weighted_score(record: &NormalizedRecord, text: &str) -> f64 {
    let score = TITLE_WEIGHT * weighted_ratio(text, &record.title)
        + ARTIST_WEIGHT * weighted_ratio(text, &record.artist)
        + ALBUM_WEIGHT * weighted_ratio(text, &record.album);
    score.clamp(0.0, 100.0)
}

/// Score each candidate.
///
/// Without free text a record is compared against its own title, so
/// filter-only queries rank by how well artist and album resemble the title
/// on top of a full title score.
pub fn score_candidates(
    normalized: &[NormalizedRecord],
    candidates: &[usize],
    free_text: &str,
) -> Vec<ScoredCandidate> {
    candidates
        .iter()
        .filter_map(|&index| {
            let record = normalized.get(index)?;
            let text = if free_text.is_empty() {
                record.title.as_str()
            } else {
                free_text
            };
            Some(ScoredCandidate {
                index,
                score: weighted_score(record, text),
            })
        })
        .collect()
}

/// Drop scores below `threshold`, sort best first and keep at most `limit`.
///
/// The sort is stable: equal scores keep their candidate order.
pub fn rank(
    mut scored: Vec<ScoredCandidate>,
    threshold: f64,
    limit: usize,
) -> Vec<ScoredCandidate> {
    scored.retain(|candidate| candidate.score >= threshold);
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// Round a score to two decimals for presentation.
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
