//! Input events consumed by the overlay, and the keyboard mapping onto them.

use rmcp::schemars;
use serde::{Deserialize, Serialize};

/// An input the navigation state machine reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Global shortcut (`Ctrl/Meta+K`, or `/` outside text fields)
    OpenShortcut,
    /// The query input's full value changed
    Input { text: String },
    ArrowDown,
    ArrowUp,
    /// The pointer moved onto the result at `index`
    PointerEnter { index: usize },
    /// The result at `index` was clicked
    ResultClicked { index: usize },
    /// Enter in the query input
    Confirm,
    /// Escape: dismiss from any state
    Escape,
    /// A touch landed outside both the popup and the toggle button
    OutsideTouch,
    /// The toggle button is about to take focus from the input
    ToggleButtonPress,
    /// The toggle button was activated
    ToggleButton,
    /// The query input lost focus; `into_popup` when focus moved to an
    /// element inside the popup
    Blur { into_popup: bool },
    /// The query input gained focus
    Focus,
    /// A debounced close scheduled by a blur is due
    CloseTimerElapsed { token: u64 },
}

/// Keys the overlay distinguishes, named after DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Other,
}

impl Key {
    /// Parses a DOM `key` value such as `"ArrowDown"`, `"k"` or `"/"`.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other,
                }
            }
        }
    }
}

/// Where keyboard focus was when a key went down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FocusTarget {
    /// The overlay's own query input
    QueryInput,
    /// Any other input or textarea
    Editable,
    /// Anything else
    #[default]
    Page,
}

/// A key-down as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
    pub focus: FocusTarget,
}

impl KeyPress {
    pub const fn new(key: Key, focus: FocusTarget) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
            focus,
        }
    }

    pub const fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub const fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }
}

/// Maps key presses onto overlay events.
#[derive(Debug, Clone, Copy)]
pub struct Keymap {
    shortcut_key: char,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new(DEFAULT_SHORTCUT_KEY)
    }
}

/// Letter that opens the overlay together with Ctrl or Meta.
pub const DEFAULT_SHORTCUT_KEY: char = 'k';

impl Keymap {
    pub const fn new(shortcut_key: char) -> Self {
        Self { shortcut_key }
    }

    /// Returns the event a key press triggers, if any.
    ///
    /// Navigation keys only count inside the query input. The modifier
    /// shortcut works everywhere, `/` only outside editable fields, and a
    /// global Escape only while the popup is visible.
    pub fn classify(&self, press: &KeyPress, popup_visible: bool) -> Option<Event> {
        if press.focus == FocusTarget::QueryInput {
            match press.key {
                Key::ArrowDown => return Some(Event::ArrowDown),
                Key::ArrowUp => return Some(Event::ArrowUp),
                Key::Enter => return Some(Event::Confirm),
                Key::Escape => return Some(Event::Escape),
                _ => {}
            }
        }

        match press.key {
            Key::Char(c)
                if (press.ctrl || press.meta) && c.eq_ignore_ascii_case(&self.shortcut_key) =>
            {
                Some(Event::OpenShortcut)
            }
            Key::Char('/') if press.focus == FocusTarget::Page => Some(Event::OpenShortcut),
            Key::Escape if popup_visible => Some(Event::Escape),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("ArrowDown", Key::ArrowDown)]
    #[case("ArrowUp", Key::ArrowUp)]
    #[case("Enter", Key::Enter)]
    #[case("Escape", Key::Escape)]
    #[case("k", Key::Char('k'))]
    #[case("/", Key::Char('/'))]
    #[case("Shift", Key::Other)]
    #[case("", Key::Other)]
    fn test_key_from_dom(#[case] raw: &str, #[case] expected: Key) {
        check!(Key::from_dom(raw) == expected);
    }

    #[rstest]
    #[case(KeyPress::new(Key::Char('k'), FocusTarget::Page).with_ctrl(), Some(Event::OpenShortcut))]
    #[case(KeyPress::new(Key::Char('K'), FocusTarget::Editable).with_meta(), Some(Event::OpenShortcut))]
    #[case(KeyPress::new(Key::Char('k'), FocusTarget::QueryInput).with_ctrl(), Some(Event::OpenShortcut))]
    #[case(KeyPress::new(Key::Char('k'), FocusTarget::Page), None)]
    #[case(KeyPress::new(Key::Char('/'), FocusTarget::Page), Some(Event::OpenShortcut))]
    #[case(KeyPress::new(Key::Char('/'), FocusTarget::Editable), None)]
    #[case(KeyPress::new(Key::Char('/'), FocusTarget::QueryInput), None)]
    fn test_open_shortcuts(#[case] press: KeyPress, #[case] expected: Option<Event>) {
        check!(Keymap::default().classify(&press, false) == expected);
    }

    #[rstest]
    #[case(Key::ArrowDown, Event::ArrowDown)]
    #[case(Key::ArrowUp, Event::ArrowUp)]
    #[case(Key::Enter, Event::Confirm)]
    #[case(Key::Escape, Event::Escape)]
    fn test_navigation_keys_in_query_input(#[case] key: Key, #[case] expected: Event) {
        let press = KeyPress::new(key, FocusTarget::QueryInput);
        check!(Keymap::default().classify(&press, true) == Some(expected));
    }

    #[rstest]
    #[case(Key::ArrowDown)]
    #[case(Key::Enter)]
    fn test_navigation_keys_ignored_elsewhere(#[case] key: Key) {
        let press = KeyPress::new(key, FocusTarget::Page);
        check!(Keymap::default().classify(&press, true).is_none());
    }

    #[rstest]
    #[case(true, Some(Event::Escape))]
    #[case(false, None)]
    fn test_global_escape_only_when_visible(
        #[case] visible: bool,
        #[case] expected: Option<Event>,
    ) {
        let press = KeyPress::new(Key::Escape, FocusTarget::Page);
        check!(Keymap::default().classify(&press, visible) == expected);
    }

    #[test]
    fn test_custom_shortcut_key() {
        let keymap = Keymap::new('p');
        let press_p = KeyPress::new(Key::Char('p'), FocusTarget::Page).with_ctrl();
        let press_k = KeyPress::new(Key::Char('k'), FocusTarget::Page).with_ctrl();
        check!(keymap.classify(&press_p, false) == Some(Event::OpenShortcut));
        check!(keymap.classify(&press_k, false).is_none());
    }
}
