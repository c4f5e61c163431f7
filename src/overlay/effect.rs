//! UI side effects requested by overlay transitions.

use crate::search::RankedResult;
use serde::{Serialize, Serializer};
use std::time::Duration;

/// One rendered entry of the result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    pub title: String,
    pub url: String,
}

impl From<&RankedResult> for ResultItem {
    fn from(result: &RankedResult) -> Self {
        Self {
            title: result.document.title.clone(),
            url: result.document.url.clone(),
        }
    }
}

/// Something the host must do in response to a transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    ShowPopup,
    HidePopup,
    /// Focus the query input, selecting its text when `select_all` is set
    FocusInput { select_all: bool },
    BlurInput,
    /// Suppress the browser's default handling of the triggering key
    PreventDefault,
    /// Replace the result list
    RenderResults { items: Vec<ResultItem> },
    /// Replace the result list with a "No results found" notice
    ShowNoResults,
    /// Empty the result list
    ClearResults,
    /// Mark exactly this result as selected and scroll it into view
    /// (`block: nearest`, smooth); `None` clears every marker
    Highlight { index: Option<usize> },
    /// Load another page
    Navigate { url: String },
    /// Dispatch `CloseTimerElapsed(token)` after `delay`; the effects that
    /// event produces belong to the page like any others
    ScheduleClose {
        token: u64,
        #[serde(rename = "delay_ms", serialize_with = "serialize_millis")]
        delay: Duration,
    },
}

#[allow(clippy::trivially_copy_pass_by_ref)] // signature fixed by serialize_with
fn serialize_millis<S: Serializer>(delay: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX))
}

/// Executes effects against a concrete UI.
///
/// The state machine never touches the UI itself; hosts implement this trait
/// and receive effects in the order they were emitted.
pub trait EffectSink {
    fn apply(&mut self, effect: &Effect);
}

/// Collects effects for inspection.
impl EffectSink for Vec<Effect> {
    fn apply(&mut self, effect: &Effect) {
        self.push(effect.clone());
    }
}
