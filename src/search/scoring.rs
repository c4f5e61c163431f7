//! Field-level fuzzy scoring.
//!
//! A query matches a field when its characters appear in order inside the
//! field. Among all windows of the field that contain the query that way, the
//! best one decides the score:
//!
//! - normalized edit distance between the query and the window (0 for a
//!   contiguous run, growing with every skipped character)
//! - plus `start / proximity_distance`, so matches near the start of the field
//!   rank higher
//!
//! Scores are clamped to `[0, 1]`; lower is better.

use rapidfuzz::distance::levenshtein;
use std::ops::Range;

/// Character offset at which a match stops gaining from proximity.
pub const DEFAULT_PROXIMITY_DISTANCE: usize = 100;

/// Lowercases text into a char buffer for case-insensitive matching.
pub(crate) fn fold(text: &str) -> Vec<char> {
    text.to_lowercase().chars().collect()
}

/// Scores a folded query against one field.
///
/// Returns `None` if the query is empty or is not a subsequence of the field.
pub(crate) fn field_score(query: &[char], field: &str, proximity_distance: usize) -> Option<f64> {
    let first = *query.first()?;
    let text = fold(field);

    let proximity_distance = proximity_distance.max(1) as f64;
    let mut best: Option<f64> = None;
    for start in (0..text.len()).filter(|&i| text[i] == first) {
        // The proximity term alone already matches the best score
        if best.is_some_and(|b| start as f64 / proximity_distance >= b) {
            break;
        }
        let Some(window) = tightest_window(&text, query, start) else {
            // No later start can complete the subsequence either
            break;
        };

        let score = window_score(query, &text[window.clone()], window.start, proximity_distance);
        if best.is_none_or(|b| score < b) {
            best = Some(score);
        }
    }

    best
}

/// Finds the shortest window starting at or after `start` that contains
/// `query` as a subsequence.
///
/// Scans forward greedily to find the earliest end, then backward from that end
/// to pull the start as far right as possible.
fn tightest_window(text: &[char], query: &[char], start: usize) -> Option<Range<usize>> {
    let mut matched = 0;
    let mut end = None;
    for (i, &c) in text.iter().enumerate().skip(start) {
        if c == query[matched] {
            matched += 1;
            if matched == query.len() {
                end = Some(i + 1);
                break;
            }
        }
    }
    let end = end?;

    let mut remaining = query.len();
    let mut window_start = end;
    for i in (start..end).rev() {
        if text[i] == query[remaining - 1] {
            remaining -= 1;
            if remaining == 0 {
                window_start = i;
                break;
            }
        }
    }

    Some(window_start..end)
}

fn window_score(query: &[char], window: &[char], offset: usize, proximity_distance: f64) -> f64 {
    let accuracy = levenshtein::normalized_distance(query.iter().copied(), window.iter().copied());
    let proximity = offset as f64 / proximity_distance;
    (accuracy + proximity).clamp(0.0, 1.0)
}
