//! `go_list` tool
#![allow(missing_docs)]

use crate::tools::go::request::ToolRequest;
use crate::tools::go::response::guarded;
use crate::tools::go::{GoCommand, GoService};
use crate::tools::Tool;
use async_trait::async_trait;
use rust_mcp_sdk::schema::{CallToolError, CallToolResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Package and module listing
#[rust_mcp_sdk::macros::mcp_tool(
    name = "go_list",
    title = "List Go Packages",
    description = "List packages or modules, like the 'go list' command.",
    destructive_hint = false,
    idempotent_hint = true,
    open_world_hint = false,
    read_only_hint = true
)]
#[derive(Debug, Clone, Deserialize, Serialize, rust_mcp_sdk::macros::JsonSchema)]
pub struct GoListTool {
    /// Extra `go list` flags
    #[json_schema(
        title = "Command flags",
        description = "Optional additional go list flags. Common flags: -json (print the output in JSON format, usually too large for many packages), -m (list modules instead of packages)"
    )]
    pub cmd_flags: Option<Vec<String>>,

    /// Package patterns
    #[json_schema(
        title = "Packages",
        description = "Packages to list, e.g. github.com/user/repo, ./..., github.com/user/repo/..."
    )]
    pub packages: Option<Vec<String>>,
}

/// `go_list` tool implementation
pub struct GoListToolImpl {
    service: Arc<GoService>,
}

impl GoListToolImpl {
    #[must_use]
    pub fn new(service: Arc<GoService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GoListToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        GoListTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        tracing::debug!(%arguments, "go_list called");
        let service = self.service.clone();
        Ok(guarded("go_list", async move {
            let request = ToolRequest::from_arguments(&arguments);
            service
                .go_list(&request)
                .await
                .into_call_tool_result(GoCommand::List)
        })
        .await)
    }
}
