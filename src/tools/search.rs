//! Fuzzy search over the documentation index.

use crate::search::RankedResult;
use crate::session::GotoState;
use rmcp::schemars;
use serde::Deserialize;
use std::{fmt::Write as _, sync::Arc};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Search query; matched fuzzily against page titles and descriptions
    pub query: String,
    /// Maximum number of results to return (default from config, usually 10)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Runs a one-off search without touching the overlay session.
pub async fn handle_search(
    state: &Arc<GotoState>,
    request: SearchRequest,
) -> Result<String, String> {
    if request.limit == Some(0) {
        return Err("limit must be at least 1".to_string());
    }

    let engine = Arc::clone(state.engine());
    let query = request.query.clone();
    let results = tokio::task::spawn_blocking(move || engine.search(&query))
        .await
        .map_err(|e| format!("Search task failed: {}", e))?;

    if results.is_empty() {
        let mut msg = if request.query.trim().is_empty() {
            "Empty query: type part of a page title or description.\n".to_string()
        } else {
            format!("No results found for '{}'.\n\n", request.query)
        };
        if !request.query.trim().is_empty() {
            msg.push_str("Search tips:\n");
            msg.push_str("• Try fewer characters; every query character must appear in order\n");
            msg.push_str("• Matching ignores case but not accents\n");
        }
        return Ok(msg);
    }

    let limit = request.limit.unwrap_or(state.config().search.limit);
    Ok(format_search_results(&results, &request.query, limit))
}

/// Formats ranked results, best first, truncated to `limit`.
fn format_search_results(results: &[RankedResult], query: &str, limit: usize) -> String {
    let mut output = format!("Search results for '{}':\n\n", query);

    for (idx, result) in results.iter().take(limit).enumerate() {
        let _ = writeln!(
            output,
            "{}. `{}` ({}) - score: {:.2}",
            idx + 1,
            result.document.title,
            result.document.url,
            result.score
        );

        let first_line = result
            .document
            .description
            .lines()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("");
        if !first_line.is_empty() {
            let _ = writeln!(output, "   {}", first_line.trim());
        }
        output.push('\n');
    }

    if results.len() > limit {
        let _ = writeln!(output, "({} more not shown)", results.len() - limit);
    }

    output
}
