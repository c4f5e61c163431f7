//! Fuzzy search over the documentation index.
//!
//! This module provides the document corpus, per-field scoring, the fuzzy
//! matcher and the ranker that together turn a typed query into the ordered
//! result list shown by the overlay.

// Module declarations
pub(crate) mod engine;
pub(crate) mod fuzzy;
pub(crate) mod index;
pub(crate) mod rank;
pub(crate) mod scoring;

// Public re-exports (used via lib.rs)
pub use engine::SearchEngine;
pub use fuzzy::{FuzzyMatcher, MatchCandidate};
pub use index::{Document, DocumentIndex};
pub use rank::{DEFAULT_SCORE_THRESHOLD, RankedResult, Ranker};
pub use scoring::DEFAULT_PROXIMITY_DISTANCE;
