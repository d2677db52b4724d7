use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::{build_corpus, Catalog, ProjectMeta};
use crate::ranker::scoring::ScoredMatch;
use crate::ranker::token::prepare_text;
use crate::ranker::Bm25Ranker;

/// Default minimum score a candidate must exceed to be considered a match.
///
/// A policy knob, not an engine invariant: tune it alongside catalog growth.
pub const DEFAULT_SCORE_THRESHOLD: f64 = 1.0;

/// Default number of candidates requested from a strategy per selection.
pub const DEFAULT_MAX_CANDIDATES: usize = 5;

/// Errors surfaced by external match strategies.
///
/// The built-in lexical strategy never fails; this exists for strategies backed
/// by remote services such as a hosted chat-completion endpoint.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("match strategy failed: {0}")]
    Strategy(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl MatchError {
    pub fn strategy(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Strategy(Box::new(err))
    }
}

/// A candidate-selection strategy.
///
/// Implementations propose scored catalog candidates for a free-text request.
/// [`LexicalMatcher`] is the built-in BM25 implementation; callers integrating
/// a chat-completion backend implement this trait around their client and hand
/// it to [`Matcher::with_primary`].
pub trait MatchStrategy {
    fn propose(
        &self,
        request: &str,
        max_candidates: usize,
    ) -> Result<Vec<ScoredMatch<ProjectMeta>>, MatchError>;
}

/// Acceptance policy applied to a strategy's candidates.
///
/// A request is matched only when exactly one candidate scores above
/// `score_threshold`: zero qualifying candidates means nothing fits, two or
/// more means the request is ambiguous.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchPolicy {
    pub score_threshold: f64,
    pub max_candidates: usize,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

impl MatchPolicy {
    /// Apply the policy: `Some` iff exactly one candidate clears the threshold.
    pub fn decide(&self, candidates: &[ScoredMatch<ProjectMeta>]) -> Option<ProjectMeta> {
        let mut qualifying = candidates.iter().filter(|c| c.score > self.score_threshold);
        match (qualifying.next(), qualifying.next()) {
            (Some(only), None) => Some(only.meta.clone()),
            _ => None,
        }
    }
}

/// BM25-backed candidate strategy over a merged catalog corpus.
pub struct LexicalMatcher {
    ranker: Bm25Ranker<ProjectMeta>,
}

impl LexicalMatcher {
    pub fn new(ranker: Bm25Ranker<ProjectMeta>) -> Self {
        Self { ranker }
    }

    /// Build the matcher directly from a local and a remote catalog.
    pub fn from_catalogs(local: &Catalog, remote: &Catalog) -> Self {
        Self::new(Bm25Ranker::build(build_corpus(local, remote)))
    }

    pub fn ranker(&self) -> &Bm25Ranker<ProjectMeta> {
        &self.ranker
    }
}

impl MatchStrategy for LexicalMatcher {
    fn propose(
        &self,
        request: &str,
        max_candidates: usize,
    ) -> Result<Vec<ScoredMatch<ProjectMeta>>, MatchError> {
        let terms = prepare_text(request);
        Ok(self.ranker.search(&terms, max_candidates))
    }
}

/// Matching orchestrator: a primary strategy with a lexical fallback.
///
/// `select` consults the primary strategy first (typically a chat-completion
/// backed matcher). When the primary errors or its candidates are rejected by
/// the policy, the lexical ranker gets a turn. A request matches only when one
/// of the strategies produces exactly one candidate above the policy threshold.
pub struct Matcher {
    primary: Option<Box<dyn MatchStrategy + Send + Sync>>,
    lexical: LexicalMatcher,
    policy: MatchPolicy,
}

impl Matcher {
    pub fn new(lexical: LexicalMatcher, policy: MatchPolicy) -> Self {
        Self {
            primary: None,
            lexical,
            policy,
        }
    }

    /// Install a primary strategy consulted before the lexical fallback.
    pub fn with_primary(mut self, strategy: Box<dyn MatchStrategy + Send + Sync>) -> Self {
        self.primary = Some(strategy);
        self
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Select the single best catalog match for a free-text request, if any.
    pub fn select(&self, request: &str) -> Option<ProjectMeta> {
        if let Some(primary) = &self.primary {
            match primary.propose(request, self.policy.max_candidates) {
                Ok(candidates) => {
                    debug!(candidates = candidates.len(), "primary strategy proposed");
                    if let Some(meta) = self.policy.decide(&candidates) {
                        debug!(id = %meta.id, "primary strategy matched");
                        return Some(meta);
                    }
                }
                Err(err) => {
                    warn!(error = %err, "primary strategy failed, falling back to lexical");
                }
            }
        }

        // LexicalMatcher::propose is infallible
        let candidates = self
            .lexical
            .propose(request, self.policy.max_candidates)
            .unwrap_or_default();
        debug!(candidates = candidates.len(), "lexical strategy proposed");
        let decision = self.policy.decide(&candidates);
        match &decision {
            Some(meta) => debug!(id = %meta.id, "lexical strategy matched"),
            None => debug!("no unambiguous match"),
        }
        decision
    }
}
