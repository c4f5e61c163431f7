//! Matcher and ranker bundled over one index.

use super::fuzzy::FuzzyMatcher;
use super::index::DocumentIndex;
use super::rank::{RankedResult, Ranker};

/// Runs the full query pipeline: fuzzy match, then rank.
///
/// Holds the index read-only, so one engine can be shared by every overlay
/// session.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    index: DocumentIndex,
    matcher: FuzzyMatcher,
    ranker: Ranker,
}

impl SearchEngine {
    pub const fn new(index: DocumentIndex, matcher: FuzzyMatcher, ranker: Ranker) -> Self {
        Self {
            index,
            matcher,
            ranker,
        }
    }

    /// Uses the default proximity distance and score threshold.
    pub fn with_defaults(index: DocumentIndex) -> Self {
        Self::new(index, FuzzyMatcher::default(), Ranker::default())
    }

    pub const fn index(&self) -> &DocumentIndex {
        &self.index
    }

    /// Ranked results for `query`, recomputed from scratch on every call.
    pub fn search(&self, query: &str) -> Vec<RankedResult> {
        let start = std::time::Instant::now();
        let candidates = self.matcher.find(query, &self.index);
        let matched = candidates.len();
        let results = self.ranker.rank(candidates);
        tracing::debug!(
            "Search for '{}' matched {} documents, kept {} in {:?}",
            query,
            matched,
            results.len(),
            start.elapsed()
        );
        results
    }
}
