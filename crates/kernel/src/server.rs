//! Exposes the [`Kernel`] over MCP stdio JSON-RPC: `tools/list` and
//! `tools/call`, modeled on a standard `rmcp::ServerHandler` wrapping a
//! tool registry.

use std::{borrow::Cow, sync::Arc};

use rmcp::{
    ErrorData, ServerHandler, ServiceExt,
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    transport::io::stdio,
};

use crate::{kernel::Kernel, schema, tool::Tool, tools};

pub struct McpServer {
    kernel: Arc<Kernel>,
    tools: Vec<Box<dyn Tool>>,
}

impl McpServer {
    pub fn new(kernel: Kernel) -> Self {
        Self { kernel: Arc::new(kernel), tools: tools::all() }
    }

    /// Serve over stdin/stdout until the client disconnects.
    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        let handler = Handler { kernel: self.kernel, tools: self.tools };
        let service = handler.serve(stdio()).await?;
        service.waiting().await?;
        Ok(())
    }
}

struct Handler {
    kernel: Arc<Kernel>,
    tools: Vec<Box<dyn Tool>>,
}

impl Handler {
    fn find(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }
}

impl ServerHandler for Handler {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation { name: "modelbridge".to_string(), version: env!("CARGO_PKG_VERSION").to_string(), ..Default::default() },
            instructions: Some("Brokers tool calls to Gemini, OpenAI, OpenRouter, and custom OpenAI-compatible models.".to_string()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools = self
            .tools
            .iter()
            .map(|tool| {
                let schema = schema::input_schema(tool.as_ref());
                let schema_obj = schema.as_object().cloned().unwrap_or_default();

                rmcp::model::Tool {
                    name: Cow::Owned(tool.name().to_string()),
                    title: None,
                    description: Some(Cow::Owned(tool.description().to_string())),
                    input_schema: Arc::new(schema_obj),
                    output_schema: None,
                    annotations: None,
                    execution: None,
                    icons: None,
                    meta: None,
                }
            })
            .collect();

        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(&self, request: CallToolRequestParam, _context: RequestContext<RoleServer>) -> Result<CallToolResult, ErrorData> {
        let tool_name = &*request.name;
        let tool = self.find(tool_name).ok_or_else(|| ErrorData::invalid_params(format!("tool not found: {tool_name}"), None))?;

        let arguments = match request.arguments {
            Some(map) => serde_json::Value::Object(map),
            None => serde_json::Value::Object(serde_json::Map::new()),
        };

        let response = self.kernel.call(tool, arguments).await;
        let is_error = response.status.as_str() == "error";

        let summary = continuation_summary(&response);
        let mut blocks = vec![Content::text(response.content.clone())];
        if let Some(summary) = summary {
            blocks.push(Content::text(summary));
        }

        if is_error {
            Ok(CallToolResult::error(blocks))
        } else {
            Ok(CallToolResult::success(blocks))
        }
    }
}

/// A second, human-readable text block summarizing thread id, turn stats,
/// and continuation suggestions.
fn continuation_summary(response: &crate::response::ToolResponse) -> Option<String> {
    let offer = response.continuation_offer.as_ref()?;

    Some(format!(
        "--- continuation: thread {} | {} turns remaining | {} total tokens | try next: {} ---",
        offer.thread_id,
        offer.remaining_turns,
        offer.total_tokens,
        offer.suggestions.join(", ")
    ))
}
