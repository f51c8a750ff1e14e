//! `go_doc` tool
#![allow(missing_docs)]

use crate::tools::go::request::ToolRequest;
use crate::tools::go::response::guarded;
use crate::tools::go::{GoCommand, GoService};
use crate::tools::Tool;
use async_trait::async_trait;
use rust_mcp_sdk::schema::{CallToolError, CallToolResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Go documentation lookup
#[rust_mcp_sdk::macros::mcp_tool(
    name = "go_doc",
    title = "Go Documentation",
    description = "Get Go documentation for a package, type, function, or method. This is the preferred and most efficient way to understand Go packages, providing official package documentation in a concise format. Use this before attempting to read source files directly. Results are cached. The arguments are just like the 'go doc' command, with the package or symbol as the first argument.",
    destructive_hint = false,
    idempotent_hint = true,
    open_world_hint = false,
    read_only_hint = true
)]
#[derive(Debug, Clone, Deserialize, Serialize, rust_mcp_sdk::macros::JsonSchema)]
pub struct GoDocTool {
    /// Package, symbol, method or field
    #[serde(rename = "pkgSymMethodOrField")]
    #[json_schema(
        title = "Target",
        description = "go doc <pkg> | <sym>[.<methodOrField>] | [<pkg>.]<sym>[.<methodOrField>] | [<pkg>.][<sym>.]<methodOrField> | <pkg> <sym>[.<methodOrField>]"
    )]
    pub pkg_sym_method_or_field: Option<String>,

    /// Extra `go doc` flags
    #[json_schema(
        title = "Command flags",
        description = "Optional additional go doc flags. Common flags: -all (show all documentation for package), -src (show the source code), -u (show unexported symbols as well as exported)"
    )]
    pub cmd_flags: Option<Vec<String>>,
}

/// `go_doc` tool implementation
pub struct GoDocToolImpl {
    service: Arc<GoService>,
}

impl GoDocToolImpl {
    #[must_use]
    pub fn new(service: Arc<GoService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GoDocToolImpl {
    fn definition(&self) -> rust_mcp_sdk::schema::Tool {
        GoDocTool::tool()
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        tracing::debug!(%arguments, "go_doc called");
        let service = self.service.clone();
        Ok(guarded("go_doc", async move {
            let request = ToolRequest::from_arguments(&arguments);
            service
                .go_doc(&request)
                .await
                .into_call_tool_result(GoCommand::Doc)
        })
        .await)
    }
}
