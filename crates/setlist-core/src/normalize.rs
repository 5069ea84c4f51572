//! Text canonicalization shared by indexing and query parsing.
//!
//! Every comparison the search engine makes happens between strings that went
//! through these functions, so a catalog value and a query value that differ
//! only in case, punctuation or spacing compare equal.

use std::sync::LazyLock;

use regex::Regex;

/// Everything except word characters, whitespace and `+ # / . -`.
#[allow(clippy::expect_used)]
static STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s+#/.\-]").expect("literal pattern"));

/// Canonicalize free-form metadata or query text.
///
/// Lower-cases, removes punctuation other than `+ # / . -`, collapses runs of
/// whitespace to a single space and trims. Normalizing an already normalized
/// string returns it unchanged.
///
/// ```
/// use setlist_core::normalize::normalize;
///
/// assert_eq!(normalize("  Once in a   Lifetime!! "), "once in a lifetime");
/// assert_eq!(normalize("AC/DC"), "ac/dc");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = STRIP.replace_all(&lowered, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonicalize a musical key.
///
/// Applies [`normalize`], then drops a trailing `" major"` (major keys keep
/// only the tonic) and compacts a trailing `" minor"` to `"m"`, so
/// `"C# minor"` becomes `"c#m"` and `"E Major"` becomes `"e"`.
pub fn normalize_key(text: &str) -> String {
    let mut key = normalize(text);
    while let Some(tonic) = key.strip_suffix(" major") {
        key.truncate(tonic.len());
    }
    if let Some(tonic) = key.strip_suffix(" minor") {
        key = format!("{tonic}m");
    }
    key
}

/// Best-effort integer parse; anything unparsable yields `None`.
///
/// Integral float text such as `"118.0"` (as written by spreadsheet exports)
/// is accepted.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn parse_int(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }

    let value = trimmed.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}
