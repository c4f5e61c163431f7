//! Pure transition function of the navigation state machine.
//!
//! `transition(state, event) -> (state, effects)`; no UI access and no clock.
//! Time only enters through [`Event::CloseTimerElapsed`], which the host
//! dispatches after honouring an [`Effect::ScheduleClose`].

use super::effect::{Effect, ResultItem};
use super::event::Event;
use super::state::SearchState;
use crate::search::SearchEngine;
use std::time::Duration;

/// Delay between a blur that leaves the popup and the popup closing.
///
/// Long enough for focus to land on an internal control without the popup
/// flickering closed.
pub const DEFAULT_BLUR_CLOSE_DELAY: Duration = Duration::from_millis(50);

/// Tunables of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySettings {
    pub blur_close_delay: Duration,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            blur_close_delay: DEFAULT_BLUR_CLOSE_DELAY,
        }
    }
}

/// Applies one event to the state.
///
/// `engine` is consulted only for [`Event::Input`], which reruns the whole
/// search synchronously.
pub fn transition(
    engine: &SearchEngine,
    settings: &OverlaySettings,
    mut state: SearchState,
    event: Event,
) -> (SearchState, Vec<Effect>) {
    let mut effects = Vec::new();

    match event {
        Event::OpenShortcut => {
            effects.push(Effect::PreventDefault);
            open(&mut state, &mut effects);
        }
        Event::Input { text } => {
            state.query = text;
            if state.query.trim().is_empty() {
                state.clear_results();
                effects.push(Effect::ClearResults);
            } else {
                state.results = engine.search(&state.query);
                state.selected = if state.results.is_empty() { None } else { Some(0) };
                effects.push(if state.results.is_empty() {
                    Effect::ShowNoResults
                } else {
                    Effect::RenderResults {
                        items: state.results.iter().map(ResultItem::from).collect(),
                    }
                });
            }
            effects.push(Effect::Highlight {
                index: state.selected,
            });
        }
        Event::ArrowDown => {
            effects.push(Effect::PreventDefault);
            step_selection(&mut state, true, &mut effects);
        }
        Event::ArrowUp => {
            effects.push(Effect::PreventDefault);
            step_selection(&mut state, false, &mut effects);
        }
        Event::PointerEnter { index } => {
            if index < state.results.len() {
                state.selected = Some(index);
                effects.push(Effect::Highlight { index: Some(index) });
            }
        }
        Event::Confirm => {
            effects.push(Effect::PreventDefault);
            if let Some(result) = state.selected_result() {
                effects.push(Effect::Navigate {
                    url: result.document.url.clone(),
                });
            }
        }
        Event::ResultClicked { index } => {
            if let Some(result) = state.results.get(index) {
                effects.push(Effect::Navigate {
                    url: result.document.url.clone(),
                });
            }
        }
        Event::Escape => {
            effects.push(Effect::PreventDefault);
            state.popup_visible = false;
            state.input_focused = false;
            state.pending_close = None;
            state.suppress_blur_close = false;
            effects.push(Effect::HidePopup);
            effects.push(Effect::BlurInput);
        }
        Event::OutsideTouch => {
            state.suppress_blur_close = false;
            if state.popup_visible {
                state.popup_visible = false;
                state.pending_close = None;
                effects.push(Effect::HidePopup);
            }
        }
        Event::ToggleButtonPress => {
            state.suppress_blur_close = true;
        }
        Event::ToggleButton => {
            state.suppress_blur_close = false;
            if state.popup_visible {
                state.popup_visible = false;
                state.pending_close = None;
                effects.push(Effect::HidePopup);
            } else {
                // The query survives toggling, so stale results may reappear
                open(&mut state, &mut effects);
            }
        }
        Event::Blur { into_popup } => {
            state.input_focused = false;
            if state.suppress_blur_close {
                state.suppress_blur_close = false;
            } else if state.popup_visible && !into_popup {
                let token = state.next_close_token;
                state.next_close_token = token.wrapping_add(1);
                state.pending_close = Some(token);
                effects.push(Effect::ScheduleClose {
                    token,
                    delay: settings.blur_close_delay,
                });
            }
        }
        Event::Focus => {
            state.input_focused = true;
            state.pending_close = None;
        }
        Event::CloseTimerElapsed { token } => {
            if state.pending_close == Some(token) {
                state.pending_close = None;
                if state.popup_visible {
                    state.popup_visible = false;
                    effects.push(Effect::HidePopup);
                }
            } else {
                tracing::trace!("Ignoring stale close timer {}", token);
            }
        }
    }

    (state, effects)
}

/// Moves the cursor one result forward or back, wrapping at both ends.
fn step_selection(state: &mut SearchState, forward: bool, effects: &mut Vec<Effect>) {
    let len = state.results.len();
    if len == 0 {
        return;
    }
    let next = match (forward, state.selected) {
        (true, Some(i)) => (i + 1) % len,
        (true, None) => 0,
        (false, Some(i)) => (i + len - 1) % len,
        (false, None) => len - 1,
    };
    state.selected = Some(next);
    effects.push(Effect::Highlight { index: Some(next) });
}

/// Shows the popup with the input focused. A toggle press that never turned
/// into a click must not swallow the next real blur, so the flag resets here.
fn open(state: &mut SearchState, effects: &mut Vec<Effect>) {
    state.popup_visible = true;
    state.input_focused = true;
    state.pending_close = None;
    state.suppress_blur_close = false;
    effects.push(Effect::ShowPopup);
    effects.push(Effect::FocusInput { select_all: true });
}
