/// This crate is a lexical matching engine for project template and sample catalogs.
/// It ranks a fixed corpus of catalog entries against a free-text request with
/// BM25 and selects a single unambiguous match under a configurable policy.
pub mod catalog;
pub mod matcher;
pub mod ranker;

/// BM25 Ranking Engine
/// The core struct of this crate, ranking a corpus of documents fixed at
/// construction time against tokenized queries.
///
/// Internally, it holds per document:
/// - A term-frequency table
/// - The document length in terms
///
/// and corpus-wide:
/// - Document frequency per distinct term
/// - Total term count and document count
///
/// `Bm25Ranker<M>` is generic over the metadata type `M` carried by each
/// document and returned with every search hit.
///
/// Construction is a one-time synchronous computation; afterwards the engine is
/// read-only and safe to search from multiple threads concurrently.
///
/// # Serialization
/// Supported whenever `M` is serializable. A built ranker can be stored and
/// restored without re-tokenizing its corpus.
pub use ranker::Bm25Ranker;

/// BM25 scoring parameters (`k1`, `b`)
/// Defaults to the crate's documented constants `DEFAULT_K1 = 1.5` and
/// `DEFAULT_B = 0.75`, held fixed for reproducible scores.
pub use ranker::Bm25Params;

/// Corpus document
/// An opaque text body paired with caller metadata. The engine never inspects
/// the metadata; it flows through to search results untouched.
pub use ranker::Document;

/// Search hit
/// A document's metadata paired with its strictly positive relevance score.
/// Hits are returned sorted descending by score, ties broken by corpus
/// insertion order.
pub use ranker::scoring::ScoredMatch;

/// Description preparer
/// Normalizes free text into ordered query/document terms: lower-casing,
/// punctuation stripping, stop-word removal. Deterministic, no stemming.
pub use ranker::token::prepare_text;

/// Term Frequency structure
/// Per-document term-occurrence table used as the base data for BM25 term
/// frequencies. Built once at corpus construction and immutable afterward.
pub use ranker::token::TermCounts;

/// Catalog model
/// Templates and samples with identifier, display name, type tag and platform
/// tag, plus the pure `merge_catalogs` / `build_corpus` functions that turn a
/// local and a remote catalog into a ranking corpus without hidden state.
pub use catalog::{build_corpus, merge_catalogs, Catalog, CatalogEntry, ProjectKind, ProjectMeta};

/// Matching orchestrator
/// Combines an optional caller-supplied primary strategy (for example a
/// chat-completion backed matcher) with the built-in lexical strategy, and
/// accepts a request only when exactly one candidate clears the policy
/// threshold.
pub use matcher::{LexicalMatcher, MatchPolicy, MatchStrategy, Matcher};
