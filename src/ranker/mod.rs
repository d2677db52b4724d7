pub mod scoring;
pub mod token;

use serde::{Deserialize, Serialize};

use crate::ranker::token::{prepare_text, TermCounts};

/// BM25 term-frequency saturation parameter.
///
/// Controls how quickly repeated occurrences of a term stop adding score.
/// Held fixed for reproducibility; typical range is 1.2–2.0.
pub const DEFAULT_K1: f64 = 1.5;

/// BM25 document-length normalization parameter.
///
/// 0.0 means no length normalization, 1.0 means full normalization.
/// Held fixed for reproducibility.
pub const DEFAULT_B: f64 = 0.75;

/// BM25 scoring parameters.
///
/// The defaults are the crate's documented constants; callers that override them
/// give up cross-run score comparability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: DEFAULT_K1,
            b: DEFAULT_B,
        }
    }
}

/// A corpus document: an opaque text body paired with caller metadata.
///
/// The engine never inspects or validates the metadata; it is carried through
/// to search results untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<M> {
    pub text: String,
    pub meta: M,
}

impl<M> Document<M> {
    pub fn new(text: impl Into<String>, meta: M) -> Self {
        Self {
            text: text.into(),
            meta,
        }
    }
}

/// Precomputed per-document state: term counts and length in terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct DocEntry<M> {
    pub(crate) meta: M,
    pub(crate) counts: TermCounts,
    pub(crate) len: u64,
}

/// BM25 ranking engine over a corpus fixed at construction time.
///
/// `Bm25Ranker<M>` is generic over the metadata type `M` attached to each
/// document (for example a catalog entry descriptor, or a plain `String` id).
///
/// Construction tokenizes every document once and precomputes:
/// - per-document term-frequency tables and lengths
/// - corpus-wide document frequency per distinct term
/// - total term count and document count
///
/// After construction the engine is read-only: `search` takes `&self` and has
/// no side effects, so one instance can serve concurrent searches from multiple
/// threads without synchronization.
///
/// # Serialization
/// Supported whenever `M` is serializable; a built ranker can be snapshotted
/// and restored without re-tokenizing the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bm25Ranker<M> {
    pub(crate) docs: Vec<DocEntry<M>>,
    /// term -> number of documents containing it at least once
    #[serde(with = "indexmap::map::serde_seq")]
    pub(crate) doc_freq: indexmap::IndexMap<String, u32>,
    pub(crate) total_len: u64,
    pub(crate) params: Bm25Params,
}

impl<M> Bm25Ranker<M> {
    /// Build an engine from a document sequence using the default parameters.
    ///
    /// Pure and total: an empty sequence is a valid corpus and yields an engine
    /// whose every search returns an empty result set.
    pub fn build<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = Document<M>>,
    {
        Self::build_with_params(documents, Bm25Params::default())
    }

    /// Build an engine with explicit BM25 parameters.
    pub fn build_with_params<I>(documents: I, params: Bm25Params) -> Self
    where
        I: IntoIterator<Item = Document<M>>,
    {
        let mut docs = Vec::new();
        let mut doc_freq = indexmap::IndexMap::new();
        let mut total_len = 0u64;

        for document in documents {
            let terms = prepare_text(&document.text);
            let counts = TermCounts::from_terms(&terms);
            for term in counts.terms() {
                *doc_freq.entry(term.to_owned()).or_insert(0u32) += 1;
            }
            let len = counts.total();
            total_len += len;
            docs.push(DocEntry {
                meta: document.meta,
                counts,
                len,
            });
        }

        Self {
            docs,
            doc_freq,
            total_len,
            params,
        }
    }

    /// Total number of documents in the corpus.
    #[inline]
    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    /// Average document length in terms, 0.0 for an empty corpus.
    #[inline]
    pub fn avg_doc_len(&self) -> f64 {
        if self.docs.is_empty() {
            return 0.0;
        }
        self.total_len as f64 / self.docs.len() as f64
    }

    /// Number of documents containing `term` at least once.
    #[inline]
    pub fn doc_freq(&self, term: &str) -> u32 {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms across the corpus.
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.doc_freq.len()
    }

    /// The scoring parameters this engine was built with.
    #[inline]
    pub fn params(&self) -> Bm25Params {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_precomputes_corpus_statistics() {
        let ranker = Bm25Ranker::build(vec![
            Document::new("excel custom function", "a"),
            Document::new("excel taskpane", "b"),
        ]);
        assert_eq!(ranker.doc_count(), 2);
        assert_eq!(ranker.doc_freq("excel"), 2);
        assert_eq!(ranker.doc_freq("custom"), 1);
        assert_eq!(ranker.doc_freq("missing"), 0);
        assert_eq!(ranker.vocab_size(), 4);
        // doc lengths 3 and 2
        assert!((ranker.avg_doc_len() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn build_on_empty_sequence_is_valid() {
        let ranker: Bm25Ranker<String> = Bm25Ranker::build(vec![]);
        assert_eq!(ranker.doc_count(), 0);
        assert_eq!(ranker.vocab_size(), 0);
        assert_eq!(ranker.avg_doc_len(), 0.0);
    }

    #[test]
    fn default_params_match_documented_constants() {
        let params = Bm25Params::default();
        assert_eq!(params.k1, DEFAULT_K1);
        assert_eq!(params.b, DEFAULT_B);
        assert_eq!(params.k1, 1.5);
        assert_eq!(params.b, 0.75);
    }

    #[test]
    fn ranker_round_trips_through_serde() {
        let ranker = Bm25Ranker::build(vec![Document::new("word excel add-in", "a".to_string())]);
        let json = serde_json::to_string(&ranker).unwrap();
        let restored: Bm25Ranker<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.doc_count(), 1);
        assert_eq!(restored.doc_freq("excel"), 1);
        let hits = restored.search(&["excel"], 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].meta, "a");
    }
}
