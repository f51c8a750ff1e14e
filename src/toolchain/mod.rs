//! Go toolchain execution
//!
//! Runs external commands with a fixed argument list and captures their
//! combined stdout/stderr together with the exit status.

pub mod classify;

use crate::config::ToolchainConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Output of a finished external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Stdout and stderr interleaved in the order the lines were produced
    pub output: String,
    /// Exit code, `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    /// Create a new command output
    #[must_use]
    pub fn new(output: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self {
            output: output.into(),
            exit_code,
        }
    }

    /// Whether the command exited with status zero
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Human readable exit status, e.g. `exit status 1`
    #[must_use]
    pub fn exit_description(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Trait for executing external commands
///
/// Kept as a seam so tests can script command results without spawning processes.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `command` with `args` as positional parameters.
    ///
    /// When `working_dir` is `None` the command inherits the current directory.
    async fn execute(
        &self,
        working_dir: Option<&Path>,
        command: &str,
        args: &[String],
    ) -> Result<CommandOutput>;
}

/// Render a command line for logs and error messages
#[must_use]
pub fn command_line(command: &str, args: &[String]) -> String {
    if args.is_empty() {
        command.to_string()
    } else {
        format!("{command} {}", args.join(" "))
    }
}

/// Production executor backed by `tokio::process`
#[derive(Debug, Clone, Default)]
pub struct SystemCommandExecutor {
    timeout: Option<Duration>,
    envs: Vec<(String, String)>,
}

impl SystemCommandExecutor {
    /// Create an executor without a deadline or extra environment
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an executor from toolchain settings
    #[must_use]
    pub fn from_config(config: &ToolchainConfig) -> Self {
        let mut executor = Self::new().with_timeout(config.command_timeout());
        if let Some(gopath) = &config.gopath {
            executor = executor.with_env("GOPATH", gopath);
        }
        if let Some(gomodcache) = &config.gomodcache {
            executor = executor.with_env("GOMODCACHE", gomodcache);
        }
        executor
    }

    /// Set the deadline after which the child process is killed
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add an environment variable for spawned commands
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }
}

#[async_trait]
impl CommandExecutor for SystemCommandExecutor {
    async fn execute(
        &self,
        working_dir: Option<&Path>,
        command: &str,
        args: &[String],
    ) -> Result<CommandOutput> {
        let rendered = command_line(command, args);

        let mut cmd = Command::new(command);
        cmd.args(args)
            .envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd
            .spawn()
            .map_err(|e| Error::execution(&rendered, e.to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::execution(&rendered, "stdout was not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::execution(&rendered, "stderr was not captured"))?;

        let run = async {
            let combined = read_combined(stdout, stderr).await?;
            let status = child.wait().await?;
            Ok::<_, std::io::Error>((combined, status))
        };

        let finished = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, run)
                .await
                .map_err(|_| Error::Timeout {
                    command: rendered.clone(),
                    timeout: limit,
                })?,
            None => run.await,
        };
        let (combined, status) = finished.map_err(|e| Error::execution(&rendered, e.to_string()))?;

        tracing::debug!(
            command = %rendered,
            status = ?status.code(),
            bytes = combined.len(),
            "command finished"
        );

        Ok(CommandOutput {
            output: String::from_utf8_lossy(&combined).into_owned(),
            exit_code: status.code(),
        })
    }
}

/// Drain both pipes, appending whole lines to one buffer as they arrive
async fn read_combined<O, E>(stdout: O, stderr: E) -> std::io::Result<Vec<u8>>
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let mut stdout = BufReader::new(stdout);
    let mut stderr = BufReader::new(stderr);
    let mut combined = Vec::new();
    let mut out_line = Vec::new();
    let mut err_line = Vec::new();
    let mut out_open = true;
    let mut err_open = true;

    while out_open || err_open {
        tokio::select! {
            read = stdout.read_until(b'\n', &mut out_line), if out_open => {
                if read? == 0 {
                    out_open = false;
                }
                combined.append(&mut out_line);
            }
            read = stderr.read_until(b'\n', &mut err_line), if err_open => {
                if read? == 0 {
                    err_open = false;
                }
                combined.append(&mut err_line);
            }
        }
    }

    Ok(combined)
}
