//! MCP handler implementation

use crate::server::GoDocsServer;
use async_trait::async_trait;
use rust_mcp_sdk::{
    mcp_server::ServerHandler,
    schema::{
        CallToolError, CallToolRequestParams, CallToolResult, ListToolsResult,
        PaginatedRequestParams, RpcError,
    },
    McpServer,
};
use std::sync::Arc;

/// MCP server handler
pub struct GoDocsHandler {
    server: Arc<GoDocsServer>,
}

impl GoDocsHandler {
    /// Create a new handler
    #[must_use]
    pub fn new(server: Arc<GoDocsServer>) -> Self {
        Self { server }
    }
}

#[async_trait]
impl ServerHandler for GoDocsHandler {
    async fn handle_list_tools_request(
        &self,
        _request: Option<PaginatedRequestParams>,
        _runtime: Arc<dyn McpServer>,
    ) -> std::result::Result<ListToolsResult, RpcError> {
        Ok(ListToolsResult {
            tools: self.server.tool_registry().get_tools(),
            meta: None,
            next_cursor: None,
        })
    }

    async fn handle_call_tool_request(
        &self,
        params: CallToolRequestParams,
        _runtime: Arc<dyn McpServer>,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        let arguments = params
            .arguments
            .map_or(serde_json::Value::Null, serde_json::Value::Object);
        self.server
            .tool_registry()
            .execute_tool(&params.name, arguments)
            .await
    }
}
