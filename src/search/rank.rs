//! Filtering, ordering and deduplication of fuzzy matches.

use super::fuzzy::MatchCandidate;
use super::index::Document;
use ahash::AHashSet;
use serde::Serialize;

/// Candidates scoring at or above this are dropped.
pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.6;

/// A result that survived ranking, in final display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub document: Document,
    pub score: f64,
}

/// Turns matcher output into the list shown to the user.
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    threshold: f64,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_THRESHOLD)
    }
}

impl Ranker {
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Applies, in order: the score threshold, a stable ascending sort by
    /// score, and deduplication by title.
    ///
    /// Deduplication keeps the first occurrence of each title and discards the
    /// rest even when their URLs differ, so two pages sharing a title never
    /// both appear.
    pub fn rank(&self, candidates: Vec<MatchCandidate<'_>>) -> Vec<RankedResult> {
        let mut passing: Vec<MatchCandidate<'_>> = candidates
            .into_iter()
            .filter(|candidate| candidate.score < self.threshold)
            .collect();

        // sort_by is stable: equal scores keep index order
        passing.sort_by(|a, b| a.score.total_cmp(&b.score));

        let mut seen_titles: AHashSet<&str> = AHashSet::with_capacity(passing.len());
        passing
            .into_iter()
            .filter(|candidate| seen_titles.insert(candidate.document.title.as_str()))
            .map(|candidate| RankedResult {
                document: candidate.document.clone(),
                score: candidate.score,
            })
            .collect()
    }
}
