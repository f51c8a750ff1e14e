//! Go documentation and package listing tools

pub mod cache;
pub mod doc;
pub mod list;
pub mod request;
pub mod response;

use crate::cache::Cache;
use crate::config::AppConfig;
use crate::error::Result;
use crate::toolchain::classify::{classify_failure, ClassifiedError};
use crate::toolchain::{command_line, CommandExecutor, SystemCommandExecutor};
use cache::{InvocationKey, QueryCache};
use request::ToolRequest;
use response::ToolResult;
use std::path::PathBuf;
use std::sync::Arc;

/// `go` subcommands exposed as tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoCommand {
    /// `go doc`
    Doc,
    /// `go list`
    List,
}

impl GoCommand {
    /// Subcommand passed to the go binary
    #[must_use]
    pub fn subcommand(self) -> &'static str {
        match self {
            GoCommand::Doc => "doc",
            GoCommand::List => "list",
        }
    }

    /// Label used in error messages
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GoCommand::Doc => "go doc",
            GoCommand::List => "go list",
        }
    }

    /// Whether zero-exit empty output counts as a failure
    #[must_use]
    pub fn requires_output(self) -> bool {
        matches!(self, GoCommand::Doc)
    }

    /// Whether successful results are served from the query cache
    #[must_use]
    pub fn is_cached(self) -> bool {
        matches!(self, GoCommand::Doc)
    }
}

/// Runs `go` queries against one working directory
pub struct GoService {
    executor: Arc<dyn CommandExecutor>,
    cache: QueryCache,
    workdir: PathBuf,
    go_binary: String,
}

impl GoService {
    /// Create a new service
    pub fn new(
        executor: Arc<dyn CommandExecutor>,
        cache: QueryCache,
        workdir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            executor,
            cache,
            workdir: workdir.into(),
            go_binary: "go".to_string(),
        }
    }

    /// Use a different go binary
    #[must_use]
    pub fn with_go_binary(mut self, go_binary: impl Into<String>) -> Self {
        self.go_binary = go_binary.into();
        self
    }

    /// Build the production service from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if no working directory is configured or the cache cannot be created
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let workdir = config.require_workdir()?.to_path_buf();
        let cache: Arc<dyn Cache> = Arc::from(crate::cache::create_cache(&config.cache)?);
        let executor = Arc::new(SystemCommandExecutor::from_config(&config.toolchain));

        Ok(Self::new(executor, QueryCache::new(cache, config.cache.ttl()), workdir)
            .with_go_binary(config.toolchain.go_binary.clone()))
    }

    /// Working directory
    #[must_use]
    pub fn workdir(&self) -> &std::path::Path {
        &self.workdir
    }

    /// Query cache
    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Run `go doc` for a request
    pub async fn go_doc(&self, request: &ToolRequest) -> ToolResult {
        self.query(GoCommand::Doc, request.doc_args()).await
    }

    /// Run `go list` for a request
    pub async fn go_list(&self, request: &ToolRequest) -> ToolResult {
        self.query(GoCommand::List, request.list_args()).await
    }

    /// Run `command` with `args`, consulting the cache where the command allows it
    pub async fn query(&self, command: GoCommand, args: Vec<String>) -> ToolResult {
        let key = InvocationKey::new(self.workdir.to_string_lossy(), args);

        if command.is_cached() {
            if let Some(entry) = self.cache.lookup(&key).await {
                tracing::debug!(
                    args = ?key.args,
                    bytes = entry.size_bytes,
                    "cache hit for {}",
                    command.label()
                );
                return ToolResult::success(entry.content);
            }
        }

        let mut full_args = Vec::with_capacity(key.args.len() + 1);
        full_args.push(command.subcommand().to_string());
        full_args.extend(key.args.iter().cloned());

        let output = match self
            .executor
            .execute(Some(self.workdir.as_path()), &self.go_binary, &full_args)
            .await
        {
            Ok(output) => output,
            Err(e) => return ToolResult::failure(ClassifiedError::from_error(&e)),
        };

        if !output.success() {
            return ToolResult::failure(classify_failure(
                command.label(),
                &output.exit_description(),
                &output.output,
            ));
        }

        if output.output.is_empty() && command.requires_output() {
            return ToolResult::failure(ClassifiedError::empty_result(
                &command_line(&self.go_binary, &full_args),
                &key.working_dir,
            ));
        }

        if command.is_cached() {
            match self.cache.store(&key, output.output.clone()).await {
                Ok(entry) => tracing::debug!(
                    args = ?key.args,
                    bytes = entry.size_bytes,
                    "cache miss for {}",
                    command.label()
                ),
                Err(e) => tracing::warn!("failed to cache {} result: {e}", command.label()),
            }
        }

        ToolResult::success(output.output)
    }
}
