use anyhow::Context as _;
use docs_goto::{Config, DocumentIndex, GotoServer, GotoState};
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    // stderr only: stdout carries the MCP protocol
    docs_goto::tracing::init(&config.log);

    let index_path = config.index_path().with_context(|| {
        format!(
            "No search index configured; set {} or index_path in the config file",
            docs_goto::config::INDEX_ENV
        )
    })?;
    let json = tokio::fs::read_to_string(&index_path)
        .await
        .with_context(|| format!("Failed to read search index at {}", index_path.display()))?;
    let index = DocumentIndex::from_json(&json)
        .with_context(|| format!("Invalid search index at {}", index_path.display()))?;

    tracing::info!(
        "Starting docs-goto MCP server ({} documents from {})",
        index.len(),
        index_path.display()
    );

    let engine = Arc::new(config.search_engine(index));
    let server = GotoServer::new(GotoState::new(engine, config));
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;

    Ok(())
}
