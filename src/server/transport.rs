//! Transport module
//!
//! Stdio, streamable HTTP and SSE transports.

use crate::error::{Error, Result};
use crate::server::handler::GoDocsHandler;
use crate::server::GoDocsServer;
use rust_mcp_sdk::{
    error::McpSdkError,
    event_store,
    mcp_server::{hyper_server, server_runtime, HyperServerOptions, McpServerOptions},
    McpServer, StdioTransport, ToMcpServerHandler, TransportOptions,
};
use std::sync::Arc;

/// Run the stdio server
pub async fn run_stdio_server(server: &GoDocsServer) -> Result<()> {
    tracing::info!("starting stdio MCP server");

    let server_info = server.server_info();
    let handler = GoDocsHandler::new(Arc::new(server.clone()));

    let transport =
        StdioTransport::new(TransportOptions::default()).map_err(|e| Error::Mcp(e.to_string()))?;

    let mcp_server: Arc<rust_mcp_sdk::mcp_server::ServerRuntime> =
        server_runtime::create_server(McpServerOptions {
            server_details: server_info,
            transport,
            handler: handler.to_mcp_server_handler(),
            task_store: None,
            client_task_store: None,
        });

    mcp_server
        .start()
        .await
        .map_err(|e: McpSdkError| Error::Mcp(e.to_string()))?;

    Ok(())
}

/// Run an HTTP server, with SSE support when `sse_support` is set
pub async fn run_http_server(server: &GoDocsServer, sse_support: bool) -> Result<()> {
    let config = &server.config().server;
    tracing::info!(
        sse = sse_support,
        "starting HTTP MCP server on {}:{}",
        config.host,
        config.port
    );

    let server_info = server.server_info();
    let handler = GoDocsHandler::new(Arc::new(server.clone()));

    let options = HyperServerOptions {
        host: config.host.clone(),
        port: config.port,
        transport_options: Arc::new(TransportOptions::default()),
        sse_support,
        event_store: Some(Arc::new(event_store::InMemoryEventStore::default())),
        task_store: None,
        client_task_store: None,
        allowed_hosts: Some(vec![
            "localhost".to_string(),
            "127.0.0.1".to_string(),
            config.host.clone(),
        ]),
        ..Default::default()
    };

    let mcp_server =
        hyper_server::create_server(server_info, handler.to_mcp_server_handler(), options);

    mcp_server
        .start()
        .await
        .map_err(|e: McpSdkError| Error::Mcp(e.to_string()))?;

    Ok(())
}

/// Transport mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum TransportMode {
    /// Stdio transport, for clients that spawn the server
    Stdio,
    /// Streamable HTTP
    Http,
    /// HTTP with Server-Sent Events
    Sse,
}

impl std::str::FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stdio" => Ok(TransportMode::Stdio),
            "http" => Ok(TransportMode::Http),
            "sse" => Ok(TransportMode::Sse),
            _ => Err(format!("unknown transport mode: {s}")),
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportMode::Stdio => write!(f, "stdio"),
            TransportMode::Http => write!(f, "http"),
            TransportMode::Sse => write!(f, "sse"),
        }
    }
}

/// Run the server with the given transport mode
pub async fn run_server_with_mode(server: &GoDocsServer, mode: TransportMode) -> Result<()> {
    match mode {
        TransportMode::Stdio => run_stdio_server(server).await,
        TransportMode::Http => run_http_server(server, false).await,
        TransportMode::Sse => run_http_server(server, true).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_mode_round_trip_names() {
        for name in crate::config::TRANSPORT_MODES {
            let mode: TransportMode = name.parse().unwrap();
            assert_eq!(mode.to_string(), name);
        }
        assert_eq!("STDIO".parse::<TransportMode>(), Ok(TransportMode::Stdio));
        assert!("hybrid".parse::<TransportMode>().is_err());
    }
}
