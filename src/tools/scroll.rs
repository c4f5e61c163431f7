//! Scroll progress bar and jump-to-top button.

use crate::scroll::{ScrollCommand, ScrollProgress, ScrollState};
use crate::session::GotoState;
use crate::tools::overlay::not_attached;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScrollRequest {
    /// Current `scrollTop` of the scroll container, in pixels
    pub scroll_top: f64,
    /// `scrollHeight` of the scroll container
    pub scroll_height: f64,
    /// `clientHeight` of the scroll container
    pub client_height: f64,
}

#[derive(Debug, Serialize)]
pub struct ScrollResponse {
    #[serde(flatten)]
    pub progress: ScrollProgress,
    /// CSS width to set on the fill element
    pub fill_width: String,
}

/// Records a scroll event and returns the new progress bar state.
pub async fn handle_scroll(
    state: &Arc<GotoState>,
    request: ScrollRequest,
) -> Result<ScrollResponse, String> {
    let scroll = ScrollState {
        scroll_top: request.scroll_top,
        scroll_height: request.scroll_height,
        client_height: request.client_height,
    };
    let progress = state
        .with_session(|session| session.scroll.on_scroll(scroll))
        .await
        .ok_or_else(not_attached)?;

    Ok(ScrollResponse {
        fill_width: progress.fill_width(),
        progress,
    })
}

/// Handles a click on the jump-to-top button.
///
/// Returns `None` when the button is currently disabled.
pub async fn handle_scroll_to_top(state: &Arc<GotoState>) -> Result<Option<ScrollCommand>, String> {
    state
        .with_session(|session| session.scroll.on_button_click())
        .await
        .ok_or_else(not_attached)
}
