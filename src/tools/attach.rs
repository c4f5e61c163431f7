//! Binds the overlay to a host page.

use crate::bindings::Bindings;
use crate::session::GotoState;
use rmcp::schemars;
use serde::Deserialize;
use std::{collections::HashSet, fmt::Write as _, sync::Arc};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AttachRequest {
    /// Ids of every element present on the host page
    pub elements: Vec<String>,
}

/// Resolves the configured element ids against the page and starts a fresh
/// overlay session. Any previous session is discarded.
pub async fn handle_attach(
    state: &Arc<GotoState>,
    request: AttachRequest,
) -> Result<String, String> {
    let page: HashSet<String> = request.elements.into_iter().collect();
    let bindings = Bindings::resolve(&page, &state.config().elements)
        .map_err(|e| format!("Cannot attach overlay: {}", e))?;

    let response = format_response(&bindings, state.engine().index().len());
    state.attach(bindings).await;
    Ok(response)
}

fn format_response(bindings: &Bindings, documents: usize) -> String {
    let mut output = format!("Overlay attached ({} documents indexed).\n\n", documents);
    let _ = writeln!(output, "• popup: #{}", bindings.popup);
    let _ = writeln!(output, "• query input: #{}", bindings.input);
    let _ = writeln!(output, "• results list: #{}", bindings.results);
    match &bindings.toggle_button {
        Some(id) => {
            let _ = writeln!(output, "• toggle button: #{}", id);
        }
        None => output.push_str("• toggle button: none (keyboard shortcuts only)\n"),
    }
    let _ = writeln!(
        output,
        "• scroll: #{} (fill #{}, button #{})",
        bindings.scroll_container, bindings.scroll_fill, bindings.scroll_button
    );
    output
}
