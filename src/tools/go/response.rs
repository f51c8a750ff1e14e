//! Packaging of query results into MCP tool results

use super::GoCommand;
use crate::toolchain::classify::{ClassifiedError, FailureKind};
use rust_mcp_sdk::schema::CallToolResult;
use std::any::Any;
use std::future::Future;

/// Text returned in place of an empty successful documentation result
pub const NO_DOCUMENTATION_PLACEHOLDER: &str = "No documentation found by go-docs";

/// Outcome of one query, consumed when formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolResult {
    /// Command output
    Success {
        /// Output text
        text: String,
    },
    /// Classified failure
    Failure {
        /// Failure category
        kind: FailureKind,
        /// Caller-facing message
        message: String,
    },
}

impl ToolResult {
    /// Successful result
    pub fn success(text: impl Into<String>) -> Self {
        ToolResult::Success { text: text.into() }
    }

    /// Failed result
    #[must_use]
    pub fn failure(error: ClassifiedError) -> Self {
        ToolResult::Failure {
            kind: error.kind,
            message: error.message,
        }
    }

    /// Whether the result is a failure
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, ToolResult::Failure { .. })
    }

    /// Wrap into a single text block, error-flagged on failure
    #[must_use]
    pub fn into_call_tool_result(self, command: GoCommand) -> CallToolResult {
        match self {
            ToolResult::Success { text } if text.is_empty() && command.requires_output() => {
                text_result(NO_DOCUMENTATION_PLACEHOLDER.to_string())
            }
            ToolResult::Success { text } => text_result(text),
            ToolResult::Failure { message, .. } => error_result(&message),
        }
    }
}

fn text_result(text: String) -> CallToolResult {
    CallToolResult::text_content(vec![text.into()])
}

/// Error-flagged result carrying `Error: {message}`
#[must_use]
pub fn error_result(message: &str) -> CallToolResult {
    let mut result = text_result(format!("Error: {message}"));
    result.is_error = Some(true);
    result
}

/// Run one tool invocation on its own task, turning a panic into an error result
pub async fn guarded<F>(tool: &str, invocation: F) -> CallToolResult
where
    F: Future<Output = CallToolResult> + Send + 'static,
{
    match tokio::spawn(invocation).await {
        Ok(result) => result,
        Err(e) => {
            let message = if e.is_panic() {
                panic_message(e.into_panic())
            } else {
                e.to_string()
            };
            tracing::error!(tool, "recovered from panic: {message}");
            error_result(&message)
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected panic".to_string()
    }
}
