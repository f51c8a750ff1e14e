//! MCP tools module
//!
//! Exposes `go doc` and `go list` as MCP tools.

pub mod go;

use async_trait::async_trait;
use rust_mcp_sdk::schema::{CallToolError, CallToolResult, Tool as McpTool};
use std::sync::Arc;

/// Tool trait
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get tool definition
    fn definition(&self) -> McpTool;

    /// Execute tool
    ///
    /// Query failures are reported inside an error-flagged [`CallToolResult`],
    /// not as `Err`.
    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError>;
}

/// Tool registry, dispatching calls by tool name
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<(McpTool, Box<dyn Tool>)>,
}

impl ToolRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under the name in its definition
    #[must_use]
    pub fn register<T: Tool + 'static>(mut self, tool: T) -> Self {
        let definition = tool.definition();
        self.tools.push((definition, Box::new(tool)));
        self
    }

    /// All tool definitions, in registration order
    #[must_use]
    pub fn get_tools(&self) -> Vec<McpTool> {
        self.tools.iter().map(|(definition, _)| definition.clone()).collect()
    }

    /// Registered tool names
    #[must_use]
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools
            .iter()
            .map(|(definition, _)| definition.name.as_str())
            .collect()
    }

    /// Execute the tool called `name`
    pub async fn execute_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        let Some((_, tool)) = self.tools.iter().find(|(definition, _)| definition.name == name)
        else {
            tracing::warn!(tool = name, "call to unknown tool");
            return Err(CallToolError::unknown_tool(name.to_string()));
        };
        tool.execute(arguments).await
    }
}

/// Create the registry with `go_doc` and `go_list`
#[must_use]
pub fn create_default_registry(service: &Arc<go::GoService>) -> ToolRegistry {
    ToolRegistry::new()
        .register(go::doc::GoDocToolImpl::new(service.clone()))
        .register(go::list::GoListToolImpl::new(service.clone()))
}
