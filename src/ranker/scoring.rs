use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ranker::{Bm25Params, Bm25Ranker};

/// A single search result: a document's metadata paired with its relevance score.
///
/// Scores are strictly positive; documents with no query-term overlap are never
/// returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMatch<M> {
    pub meta: M,
    pub score: f64,
}

impl<M> Bm25Ranker<M>
where
    M: Clone + Send + Sync,
{
    /// Rank the corpus against an already-tokenized query and return the top
    /// `max_results` documents.
    ///
    /// Scoring is standard BM25: for each query-term occurrence present in the
    /// corpus, every document accumulates
    /// `idf * (tf * (k1 + 1)) / (tf + k1 * (1 - b + b * len / avg_len))`
    /// where `idf = ln(1 + (N - df + 0.5) / (df + 0.5))`. Terms absent from the
    /// corpus contribute nothing; duplicate query terms contribute once per
    /// occurrence.
    ///
    /// Results are sorted descending by score; equal scores preserve corpus
    /// insertion order. Only strictly positive scores are returned, so the
    /// result may hold fewer than `max_results` entries. An empty query or an
    /// empty corpus yields an empty result. Read-only and deterministic.
    pub fn search<T>(&self, query_terms: &[T], max_results: usize) -> Vec<ScoredMatch<M>>
    where
        T: AsRef<str> + Sync,
    {
        if query_terms.is_empty() || self.docs.is_empty() {
            return Vec::new();
        }
        let avg_len = self.avg_doc_len();
        if avg_len == 0.0 {
            // every document tokenized to nothing, no overlap is possible
            return Vec::new();
        }

        let n = self.docs.len() as f64;
        let Bm25Params { k1, b } = self.params;

        // Resolve IDF once per query-term occurrence, skipping vocabulary misses.
        let weighted: Vec<(&str, f64)> = query_terms
            .iter()
            .filter_map(|term| {
                let term = term.as_ref();
                let df = self.doc_freq.get(term).copied()?;
                let df = df as f64;
                let idf = (1.0 + (n - df + 0.5) / (df + 0.5)).ln();
                Some((term, idf))
            })
            .collect();
        if weighted.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f64)> = self
            .docs
            .par_iter()
            .enumerate()
            .filter_map(|(idx, doc)| {
                let len_norm = k1 * (1.0 - b + b * doc.len as f64 / avg_len);
                let score: f64 = weighted
                    .iter()
                    .map(|&(term, idf)| {
                        let tf = doc.counts.count(term) as f64;
                        if tf == 0.0 {
                            0.0
                        } else {
                            idf * (tf * (k1 + 1.0)) / (tf + len_norm)
                        }
                    })
                    .sum();
                (score > 0.0).then_some((idx, score))
            })
            .collect();

        // Descending by score, stable on corpus insertion order for ties.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(max_results);

        scored
            .into_iter()
            .map(|(idx, score)| ScoredMatch {
                meta: self.docs[idx].meta.clone(),
                score,
            })
            .collect()
    }
}
