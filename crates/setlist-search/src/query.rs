//! Query grammar.
//!
//! A query mixes free text with structured tokens. Stages run in a fixed
//! order, each removing what it matched before the next looks at the rest:
//!
//! 1. `bpm:<lo>..<hi>` sets an inclusive tempo range (first one wins).
//! 2. `<field>:<value>` with field one of `title`, `artist`, `album`, `key`,
//!    `bpm` and value either `'quoted text'` or a bare non-whitespace run.
//!    Later tokens for the same field overwrite earlier ones.
//! 3. The first remaining `'quoted phrase'` must appear in the title or artist.
//! 4. Whatever is left is the free text used for fuzzy matching.
//!
//! Field names are case-insensitive and whitespace around `:` and `..` is
//! allowed.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use setlist_core::normalize::{normalize, normalize_key};
use thiserror::Error;

#[allow(clippy::expect_used)]
static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bbpm\s*:\s*([0-9]+)\s*\.\.\s*([0-9]+)").expect("literal pattern")
});

#[allow(clippy::expect_used)]
static FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(title|artist|album|key|bpm)\s*:\s*('[^']*'|\S+)").expect("literal pattern")
});

#[allow(clippy::expect_used)]
static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^']+)'").expect("literal pattern"));

/// Errors raised while parsing a query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A range bound does not fit in an integer.
    #[error("bpm range bound out of range: {bound}")]
    BoundOutOfRange { bound: String },
}

/// A filterable track field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Artist,
    Album,
    Key,
    Bpm,
}

impl Field {
    /// Parse a field name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "title" => Some(Self::Title),
            "artist" => Some(Self::Artist),
            "album" => Some(Self::Album),
            "key" => Some(Self::Key),
            "bpm" => Some(Self::Bpm),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Artist => "artist",
            Self::Album => "album",
            Self::Key => "key",
            Self::Bpm => "bpm",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive tempo range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BpmRange {
    pub lo: i64,
    pub hi: i64,
}

impl BpmRange {
    #[must_use]
    pub const fn new(lo: i64, hi: i64) -> Self {
        Self { lo, hi }
    }

    /// An inverted range (`lo > hi`) contains nothing.
    #[must_use]
    pub const fn contains(&self, bpm: i64) -> bool {
        self.lo <= bpm && bpm <= self.hi
    }
}

/// Structured constraints extracted from a query.
///
/// Text filters hold normalized values (the key filter additionally has its
/// mode compacted); the bpm filter holds the literal value typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub key: Option<String>,
    pub bpm: Option<String>,
    pub bpm_range: Option<BpmRange>,
}

impl Filters {
    /// Set the filter for `field` from a raw (unquoted) value, normalizing it
    /// as that field requires.
    pub fn set(&mut self, field: Field, raw: &str) {
        match field {
            Field::Title => self.title = Some(normalize(raw)),
            Field::Artist => self.artist = Some(normalize(raw)),
            Field::Album => self.album = Some(normalize(raw)),
            Field::Key => self.key = Some(normalize_key(raw)),
            Field::Bpm => self.bpm = Some(raw.to_string()),
        }
    }

    /// The filter value for a field, if set.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => self.title.as_deref(),
            Field::Artist => self.artist.as_deref(),
            Field::Album => self.album.as_deref(),
            Field::Key => self.key.as_deref(),
            Field::Bpm => self.bpm.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// The result of parsing a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Normalized free text; may be empty.
    pub free_text: String,
    /// Normalized exact phrase, if one was quoted.
    pub phrase: Option<String>,
    pub filters: Filters,
}

impl ParsedQuery {
    /// Parse a raw query string.
    ///
    /// ```
    /// use setlist_search::query::{BpmRange, ParsedQuery};
    ///
    /// let parsed = ParsedQuery::parse("artist:'Talking Heads' bpm:100..130 'Once in a' light").unwrap();
    /// assert_eq!(parsed.filters.artist.as_deref(), Some("talking heads"));
    /// assert_eq!(parsed.filters.bpm_range, Some(BpmRange::new(100, 130)));
    /// assert_eq!(parsed.phrase.as_deref(), Some("once in a"));
    /// assert_eq!(parsed.free_text, "light");
    /// ```
    pub fn parse(query: &str) -> Result<Self, QueryError> {
        let mut filters = Filters::default();

        if let Some(caps) = RANGE.captures(query) {
            filters.bpm_range = Some(BpmRange::new(
                parse_bound(&caps[1])?,
                parse_bound(&caps[2])?,
            ));
        }
        let rest = RANGE.replace_all(query, " ");

        for caps in FIELD.captures_iter(&rest) {
            if let Some(field) = Field::from_name(&caps[1]) {
                filters.set(field, unquote(&caps[2]));
            }
        }
        let rest = FIELD.replace_all(&rest, " ");

        let phrase = QUOTED
            .captures(&rest)
            .map(|caps| normalize(&caps[1]))
            .filter(|phrase| !phrase.is_empty());
        let rest = QUOTED.replace_all(&rest, " ");

        Ok(Self {
            free_text: normalize(&rest),
            phrase,
            filters,
        })
    }
}

fn parse_bound(digits: &str) -> Result<i64, QueryError> {
    digits.parse().map_err(|_| QueryError::BoundOutOfRange {
        bound: digits.to_string(),
    })
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
        .unwrap_or(value)
}
