//! Server module
//!
//! Hosts the Go tools behind an MCP server over stdio, streamable HTTP or SSE.

pub mod handler;
pub mod transport;

use crate::config::AppConfig;
use crate::error::Result;
use crate::tools::go::GoService;
use crate::tools::ToolRegistry;
use rust_mcp_sdk::schema::{
    Implementation, InitializeResult, ProtocolVersion, ServerCapabilities, ServerCapabilitiesTools,
};
use std::sync::Arc;

/// MCP server
#[derive(Clone)]
pub struct GoDocsServer {
    config: AppConfig,
    tool_registry: Arc<ToolRegistry>,
    service: Arc<GoService>,
}

impl GoDocsServer {
    /// Create a server running real `go` commands
    ///
    /// # Errors
    ///
    /// Returns an error if no working directory is configured or the cache cannot be created
    pub fn new(config: AppConfig) -> Result<Self> {
        let service = GoService::from_config(&config)?;
        Ok(Self::with_service(config, Arc::new(service)))
    }

    /// Create a server around an existing service
    #[must_use]
    pub fn with_service(config: AppConfig, service: Arc<GoService>) -> Self {
        let tool_registry = Arc::new(crate::tools::create_default_registry(&service));
        Self {
            config,
            tool_registry,
            service,
        }
    }

    /// Get server configuration
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get tool registry
    #[must_use]
    pub fn tool_registry(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// Get the Go query service
    #[must_use]
    pub fn service(&self) -> &Arc<GoService> {
        &self.service
    }

    /// Get server information
    #[must_use]
    pub fn server_info(&self) -> InitializeResult {
        InitializeResult {
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                title: Some("Go Docs MCP Server".to_string()),
                description: self.config.server.description.clone(),
                icons: vec![],
                website_url: None,
            },
            capabilities: ServerCapabilities {
                tools: Some(ServerCapabilitiesTools { list_changed: None }),
                resources: None,
                prompts: None,
                experimental: None,
                completions: None,
                logging: None,
                tasks: None,
            },
            protocol_version: ProtocolVersion::V2025_11_25.into(),
            instructions: Some(
                "Use go_doc to read Go package and symbol documentation and go_list to list packages or modules. Prefer go_doc over reading source files."
                    .to_string(),
            ),
            meta: None,
        }
    }

    /// Run the server with the configured transport
    pub async fn run(&self) -> Result<()> {
        let mode = self
            .config
            .server
            .transport_mode
            .parse::<transport::TransportMode>()
            .map_err(crate::error::Error::Config)?;
        transport::run_server_with_mode(self, mode).await
    }
}
