use std::collections::HashSet;
use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Fixed English stop-word set removed during text preparation.
///
/// The set is part of the engine contract: changing it changes every score in the
/// corpus, so it is a compile-time constant rather than a configuration knob.
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is",
        "it", "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there",
        "these", "they", "this", "to", "was", "will", "with",
    ]
    .into_iter()
    .collect()
});

/// Prepare raw text into an ordered sequence of normalized terms.
///
/// Normalization: lower-case everything, split on non-alphanumeric characters
/// (which strips punctuation and collapses whitespace runs), then drop
/// single-character fragments and stop words. No stemming is applied.
///
/// Deterministic: identical input always yields identical output. Empty input
/// yields an empty sequence.
///
/// # Examples
/// ```
/// use scaffold_match::ranker::token::prepare_text;
///
/// let terms = prepare_text("The Excel add-in, for custom functions!");
/// assert_eq!(terms, vec!["excel", "add", "custom", "functions"]);
/// ```
pub fn prepare_text(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|term| term.len() > 1 && !STOP_WORDS.contains(*term))
        .map(str::to_owned)
        .collect()
}

/// Term-frequency table for a single document.
///
/// Counts how often each term occurs and the total number of term occurrences.
/// Insertion order of first occurrence is preserved, which keeps serialization
/// and iteration deterministic.
///
/// Built once at corpus construction and never mutated afterward.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermCounts {
    #[serde(with = "indexmap::map::serde_seq")]
    counts: IndexMap<String, u32>,
    total: u64,
}

impl TermCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from an ordered sequence of already-normalized terms.
    pub fn from_terms<T>(terms: &[T]) -> Self
    where
        T: AsRef<str>,
    {
        let mut tf = Self::new();
        for term in terms {
            tf.add_term(term.as_ref());
        }
        tf
    }

    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        *self.counts.entry(term.to_owned()).or_insert(0) += 1;
        self.total += 1;
        self
    }

    /// Occurrence count of a term, 0 if absent.
    #[inline]
    pub fn count(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Total number of term occurrences (the document length).
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct terms.
    #[inline]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.counts.contains_key(term)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate distinct terms in first-occurrence order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }
}
