//! Error handling module

use std::time::Duration;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum Error {
    /// Initialization error
    #[error("initialization failed: {0}")]
    Initialization(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// The external command could not be started or awaited
    #[error("failed to run `{command}`: {message}")]
    Execution {
        /// Command line that was attempted
        command: String,
        /// Underlying failure
        message: String,
    },

    /// The external command did not finish before its deadline
    #[error("`{command}` did not finish within {}s", .timeout.as_secs())]
    Timeout {
        /// Command line that was attempted
        command: String,
        /// Deadline that elapsed
        timeout: Duration,
    },

    /// MCP protocol error
    #[error("MCP protocol error: {0}")]
    Mcp(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error
    #[error("unknown error: {0}")]
    Other(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an execution error for `command`
    pub fn execution(command: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Execution {
            command: command.into(),
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}
