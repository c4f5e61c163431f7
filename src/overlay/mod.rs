//! Search overlay navigation.
//!
//! The overlay is an explicit state machine: [`transition`] maps a
//! [`SearchState`] and an [`Event`] to the next state plus the [`Effect`]s the
//! host must perform. [`Overlay`] owns one session's state and feeds effects to
//! an [`EffectSink`], so the same machine runs headless in tests and behind a
//! real UI.

pub(crate) mod effect;
pub(crate) mod event;
pub(crate) mod machine;
pub(crate) mod state;

pub use effect::{Effect, EffectSink, ResultItem};
pub use event::{DEFAULT_SHORTCUT_KEY, Event, FocusTarget, Key, KeyPress, Keymap};
pub use machine::{DEFAULT_BLUR_CLOSE_DELAY, OverlaySettings, transition};
pub use state::{Phase, SearchState};

use crate::search::SearchEngine;
use std::sync::Arc;

/// One overlay session: state, shared engine and keyboard mapping.
#[derive(Debug)]
pub struct Overlay {
    engine: Arc<SearchEngine>,
    settings: OverlaySettings,
    keymap: Keymap,
    state: SearchState,
}

impl Overlay {
    pub fn new(engine: Arc<SearchEngine>, settings: OverlaySettings, keymap: Keymap) -> Self {
        Self {
            engine,
            settings,
            keymap,
            state: SearchState::default(),
        }
    }

    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Applies `event` and hands every resulting effect to `sink`, in order.
    pub fn dispatch(&mut self, event: Event, sink: &mut impl EffectSink) {
        tracing::trace!("Overlay event {:?} in {:?}", event, self.state.phase());
        let state = std::mem::take(&mut self.state);
        let (state, effects) = transition(&self.engine, &self.settings, state, event);
        self.state = state;
        for effect in &effects {
            sink.apply(effect);
        }
    }

    /// Classifies a key press and dispatches the event it maps to.
    ///
    /// Returns `false` when the key means nothing to the overlay.
    pub fn key_down(&mut self, press: &KeyPress, sink: &mut impl EffectSink) -> bool {
        match self.keymap.classify(press, self.state.popup_visible()) {
            Some(event) => {
                self.dispatch(event, sink);
                true
            }
            None => false,
        }
    }
}
