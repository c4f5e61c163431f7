//! Feeds host UI events into the attached overlay session.

use crate::overlay::{Effect, Event, FocusTarget, Key, KeyPress, Phase};
use crate::session::{GotoState, HostSink, spawn_close_timers};
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A raw UI event observed on the host page.
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// A key went down
    KeyDown {
        /// DOM `KeyboardEvent.key` value, e.g. "k", "/", "ArrowDown", "Escape"
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        meta: bool,
        /// Element holding focus when the key went down
        #[serde(default)]
        focus: FocusTarget,
    },
    /// The query input's value changed
    Input { text: String },
    /// The pointer entered the result at `index`
    PointerEnter { index: usize },
    /// The result at `index` was clicked
    Click { index: usize },
    /// The query input lost focus
    Blur {
        /// Whether focus moved to an element inside the popup
        #[serde(default)]
        into_popup: bool,
    },
    /// The query input gained focus
    Focus,
    /// Mouse or touch press on the toggle button, before it takes focus
    ToggleButtonPress,
    /// The toggle button was clicked
    ToggleButton,
    /// A touch started outside the popup and the toggle button
    OutsideTouch,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct OverlayEventRequest {
    /// The UI event to apply
    pub event: HostEvent,
}

/// Overlay state after an event, plus the effects the host must apply.
#[derive(Debug, Serialize)]
pub struct OverlayResponse {
    /// Whether the event meant anything to the overlay
    pub handled: bool,
    pub phase: Phase,
    pub query: String,
    pub selected: Option<usize>,
    pub effects: Vec<Effect>,
}

/// Where a host event goes: through the keymap, or straight to the overlay.
#[derive(Debug, PartialEq, Eq)]
enum Routed {
    Key(KeyPress),
    Direct(Event),
}

impl HostEvent {
    fn route(self) -> Routed {
        match self {
            Self::KeyDown {
                key,
                ctrl,
                meta,
                focus,
            } => Routed::Key(KeyPress {
                key: Key::from_dom(&key),
                ctrl,
                meta,
                focus,
            }),
            Self::Input { text } => Routed::Direct(Event::Input { text }),
            Self::PointerEnter { index } => Routed::Direct(Event::PointerEnter { index }),
            Self::Click { index } => Routed::Direct(Event::ResultClicked { index }),
            Self::Blur { into_popup } => Routed::Direct(Event::Blur { into_popup }),
            Self::Focus => Routed::Direct(Event::Focus),
            Self::ToggleButtonPress => Routed::Direct(Event::ToggleButtonPress),
            Self::ToggleButton => Routed::Direct(Event::ToggleButton),
            Self::OutsideTouch => Routed::Direct(Event::OutsideTouch),
        }
    }
}

/// Applies one host event and reports the resulting effects.
///
/// Key presses go through the keymap first; everything else maps directly
/// onto an overlay event. Delayed closes are armed here and run by the
/// server; effects of closes that fired since the last call come first in
/// the response, so the page catches up before applying the new event.
pub async fn handle_overlay_event(
    state: &Arc<GotoState>,
    request: OverlayEventRequest,
) -> Result<OverlayResponse, String> {
    let (response, generation, timers) = state
        .with_session(|session| {
            let mut sink = HostSink {
                effects: session.take_deferred(),
                ..HostSink::default()
            };
            let handled = match request.event.route() {
                Routed::Key(press) => session.overlay.key_down(&press, &mut sink),
                Routed::Direct(event) => {
                    session.overlay.dispatch(event, &mut sink);
                    true
                }
            };

            let overlay = session.overlay.state();
            let response = OverlayResponse {
                handled,
                phase: overlay.phase(),
                query: overlay.query().to_string(),
                selected: overlay.selected(),
                effects: sink.effects,
            };
            (response, session.generation(), sink.timers)
        })
        .await
        .ok_or_else(not_attached)?;

    spawn_close_timers(state, generation, timers);
    Ok(response)
}

pub(crate) fn not_attached() -> String {
    "No overlay attached. Call attach with the host page's element ids first.".to_string()
}
