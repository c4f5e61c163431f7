//! Scroll progress bar and "jump to top" button.

use serde::Serialize;

/// `scroll_top` above which the jump-to-top button is enabled, in pixels.
pub const DEFAULT_TOP_THRESHOLD: f64 = 300.0;

/// Scroll metrics of the bound container, read on every scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

/// What the progress bar and button should show after a scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollProgress {
    /// Not clamped: rounding at either end can push it slightly outside
    /// `[0, 100]`
    pub percent: f64,
    pub button_enabled: bool,
}

impl ScrollProgress {
    /// CSS width for the fill element.
    pub fn fill_width(&self) -> String {
        format!("{}%", self.percent)
    }
}

/// Request to move the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ScrollCommand {
    ToTop { smooth: bool },
}

/// Tracks one scrollable container.
#[derive(Debug, Clone, Copy)]
pub struct ScrollTracker {
    top_threshold: f64,
    button_enabled: bool,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_THRESHOLD)
    }
}

impl ScrollTracker {
    pub const fn new(top_threshold: f64) -> Self {
        Self {
            top_threshold,
            button_enabled: false,
        }
    }

    pub const fn button_enabled(&self) -> bool {
        self.button_enabled
    }

    pub fn on_scroll(&mut self, scroll: ScrollState) -> ScrollProgress {
        let progress = progress(scroll, self.top_threshold);
        self.button_enabled = progress.button_enabled;
        progress
    }

    /// Smooth scroll back to the top, but only while the button is enabled.
    pub fn on_button_click(&self) -> Option<ScrollCommand> {
        self.button_enabled
            .then_some(ScrollCommand::ToTop { smooth: true })
    }
}

/// Maps scroll metrics to a fill percentage and the button state.
///
/// A container without overflow reports 0% instead of dividing by zero.
pub fn progress(scroll: ScrollState, top_threshold: f64) -> ScrollProgress {
    let scrollable = scroll.scroll_height - scroll.client_height;
    let percent = if scrollable > 0.0 {
        scroll.scroll_top / scrollable * 100.0
    } else {
        0.0
    };

    ScrollProgress {
        percent,
        button_enabled: scroll.scroll_top > top_threshold,
    }
}
