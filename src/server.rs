//! MCP server exposing documentation search and the overlay session.

use crate::session::GotoState;
use crate::tools::attach::{AttachRequest, handle_attach};
use crate::tools::overlay::{OverlayEventRequest, handle_overlay_event};
use crate::tools::scroll::{ScrollRequest, handle_scroll, handle_scroll_to_top};
use crate::tools::search::{SearchRequest, handle_search};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use std::sync::Arc;

/// MCP server for quick navigation of a documentation site
#[derive(Clone)]
pub struct GotoServer {
    /// Search engine, config and the attached overlay session
    state: Arc<GotoState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for GotoServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GotoServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl GotoServer {
    pub fn new(state: GotoState) -> Self {
        Self {
            state: Arc::new(state),
            tool_router: Self::tool_router(),
        }
    }

    /// Get a reference to the shared state.
    pub fn state(&self) -> &Arc<GotoState> {
        &self.state
    }

    #[tool(
        description = "Attach the search overlay to a host page. Pass the ids of every element on the page; the configured popup, query input, results list and scroll elements must be present. Starts a fresh overlay session."
    )]
    async fn attach(
        &self,
        Parameters(request): Parameters<AttachRequest>,
    ) -> std::result::Result<String, String> {
        handle_attach(&self.state, request).await
    }

    #[tool(
        description = "Fuzzy search page titles and descriptions in the documentation index. Every query character must appear in order (subsequence match, case-insensitive); tighter and earlier matches rank first and duplicate titles are removed."
    )]
    async fn search(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(&self.state, request).await
    }

    #[tool(
        description = "Apply a UI event (key press, input change, click, hover, focus/blur, toggle button, outside touch) to the attached overlay. Returns the new phase, query, selection and the ordered effects the page must perform.",
        input_schema = inline_schema_for_type::<OverlayEventRequest>()
    )]
    async fn overlay_event(
        &self,
        Parameters(request): Parameters<OverlayEventRequest>,
    ) -> std::result::Result<String, String> {
        let response = handle_overlay_event(&self.state, request).await?;
        to_json(&response)
    }

    #[tool(
        description = "Report the scroll position of the attached page's scroll container. Returns the progress bar fill and whether the jump-to-top button is enabled."
    )]
    async fn scroll(
        &self,
        Parameters(request): Parameters<ScrollRequest>,
    ) -> std::result::Result<String, String> {
        let response = handle_scroll(&self.state, request).await?;
        to_json(&response)
    }

    #[tool(
        description = "Click the jump-to-top button. Returns a smooth scroll-to-top command, or null while the button is disabled."
    )]
    async fn scroll_to_top(&self) -> std::result::Result<String, String> {
        let command = handle_scroll_to_top(&self.state).await?;
        to_json(&command)
    }
}

#[tool_handler]
impl ServerHandler for GotoServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "docs-goto: fuzzy \"go to page\" search for a documentation site. \
                 Use search for one-off queries. To drive the on-page overlay, call attach once \
                 with the page's element ids, then forward UI events with overlay_event and \
                 scroll positions with scroll. Apply the returned effects in order. \
                 schedule_close is informational: the server runs that timer itself and \
                 returns the resulting hide_popup at the start of the next overlay_event."
                    .to_string(),
            )
    }
}

fn to_json<T: Serialize>(value: &T) -> std::result::Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to encode response: {}", e))
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this sets `inline_subschemas = true`
/// so the tagged event enum is expanded in place instead of behind `$ref`s, which
/// lets MCP clients render the variants directly.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = match serde_json::to_value(schema) {
        Ok(serde_json::Value::Object(object)) => object,
        Ok(other) => {
            tracing::error!("Schema for {} is not an object: {}", std::any::type_name::<T>(), other);
            JsonObject::new()
        }
        Err(e) => {
            tracing::error!("Failed to serialize schema for {}: {}", std::any::type_name::<T>(), e);
            JsonObject::new()
        }
    };

    Arc::new(object)
}
