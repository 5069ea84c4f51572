//! Bounded approximate string similarity.
//!
//! [`weighted_ratio`] combines several normalized-Levenshtein views of two
//! strings (whole string, best-aligned substring, sorted tokens, shared
//! tokens) and returns the best one on a 0–100 scale. Partial and token views
//! are scaled down so that an exact whole-string match always wins.

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

/// Scale applied to token-based views.
const TOKEN_SCALE: f64 = 0.95;
/// Scale applied to partial views when lengths differ moderately.
const PARTIAL_SCALE: f64 = 0.9;
/// Scale applied to partial views when one string is much longer.
const LONG_PARTIAL_SCALE: f64 = 0.6;
/// Length ratio from which partial matching is considered.
const PARTIAL_LENGTH_RATIO: f64 = 1.5;
/// Length ratio from which [`LONG_PARTIAL_SCALE`] applies.
const LONG_LENGTH_RATIO: f64 = 8.0;

/// Similarity of two strings in `[0, 100]`; blank input on either side scores 0.
#[allow(clippy::cast_precision_loss)]
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0.0;
    }

    let full = ratio(a, b);
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let length_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;
    let tokens = token_sort_ratio(a, b).max(token_set_ratio(a, b));

    let best = if length_ratio < PARTIAL_LENGTH_RATIO {
        full.max(tokens * TOKEN_SCALE)
    } else {
        let scale = if length_ratio < LONG_LENGTH_RATIO {
            PARTIAL_SCALE
        } else {
            LONG_PARTIAL_SCALE
        };
        full.max(partial_ratio(a, b) * scale)
            .max(tokens * TOKEN_SCALE * scale)
    };
    best.clamp(0.0, 100.0)
}

fn ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b) * 100.0
}

/// Best ratio of the shorter string against every equally long window of the
/// longer one.
fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let long_chars: Vec<char> = long.chars().collect();
    let width = short.chars().count();

    let mut best = 0.0_f64;
    for window in long_chars.windows(width) {
        let candidate: String = window.iter().collect();
        best = best.max(ratio(short, &candidate));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Ratio over shared and unshared tokens; a token subset scores 100.
fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let join = |set: Vec<&str>| set.join(" ");
    let shared = join(tokens_a.intersection(&tokens_b).copied().collect());
    let only_a = join(tokens_a.difference(&tokens_b).copied().collect());
    let only_b = join(tokens_b.difference(&tokens_a).copied().collect());

    if !shared.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 100.0;
    }

    let with_a = format!("{shared} {only_a}").trim().to_string();
    let with_b = format!("{shared} {only_b}").trim().to_string();
    ratio(&shared, &with_a)
        .max(ratio(&shared, &with_b))
        .max(ratio(&with_a, &with_b))
}
