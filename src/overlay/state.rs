//! Search overlay state owned by the navigation state machine.

use crate::search::RankedResult;
use serde::Serialize;

/// Coarse overlay phase, derived from [`SearchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Popup hidden
    Closed,
    /// Popup visible with nothing typed
    OpenEmpty,
    /// Popup visible with a query, possibly left over from an earlier opening
    OpenResults,
}

/// Everything the overlay remembers between events.
///
/// Only [`transition`](super::transition) mutates it. `selected` is `None`
/// exactly when nothing is highlighted; it always indexes into `results`
/// otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub(crate) query: String,
    pub(crate) results: Vec<RankedResult>,
    pub(crate) selected: Option<usize>,
    pub(crate) popup_visible: bool,
    pub(crate) input_focused: bool,
    /// Set right before a known internal control takes focus from the input,
    /// so the resulting blur does not close the popup
    pub(crate) suppress_blur_close: bool,
    /// Token of the debounced blur close currently armed, if any
    pub(crate) pending_close: Option<u64>,
    pub(crate) next_close_token: u64,
}

impl SearchState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[RankedResult] {
        &self.results
    }

    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_result(&self) -> Option<&RankedResult> {
        self.selected.and_then(|i| self.results.get(i))
    }

    pub const fn popup_visible(&self) -> bool {
        self.popup_visible
    }

    pub const fn input_focused(&self) -> bool {
        self.input_focused
    }

    pub const fn suppress_blur_close(&self) -> bool {
        self.suppress_blur_close
    }

    pub const fn pending_close(&self) -> Option<u64> {
        self.pending_close
    }

    pub fn phase(&self) -> Phase {
        if !self.popup_visible {
            Phase::Closed
        } else if self.query.trim().is_empty() {
            Phase::OpenEmpty
        } else {
            Phase::OpenResults
        }
    }

    /// Drops the query results and selection.
    pub(crate) fn clear_results(&mut self) {
        self.results.clear();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case(false, "", Phase::Closed)]
    #[case(false, "install", Phase::Closed)]
    #[case(true, "", Phase::OpenEmpty)]
    #[case(true, "   ", Phase::OpenEmpty)]
    #[case(true, "install", Phase::OpenResults)]
    fn test_phase(#[case] visible: bool, #[case] query: &str, #[case] expected: Phase) {
        let state = SearchState {
            popup_visible: visible,
            query: query.to_string(),
            ..SearchState::default()
        };
        check!(state.phase() == expected);
    }

    #[test]
    fn test_default_has_no_selection() {
        let state = SearchState::default();
        check!(state.selected().is_none());
        check!(state.selected_result().is_none());
        check!(state.phase() == Phase::Closed);
    }
}
