//! Configuration module
//!
//! Settings are read from a TOML file, then overridden by environment
//! variables, then by command line flags.

use crate::cache::CacheConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Valid transport modes
pub const TRANSPORT_MODES: [&str; 3] = ["stdio", "http", "sse"];

/// Valid log levels
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerSection,

    /// Go toolchain configuration
    pub toolchain: ToolchainConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSection {
    /// Server name
    pub name: String,

    /// Server version
    pub version: String,

    /// Server description
    pub description: Option<String>,

    /// Host address for HTTP transports
    pub host: String,

    /// Port for HTTP transports
    pub port: u16,

    /// Transport mode
    pub transport_mode: String,
}

/// Go toolchain configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Directory every query runs in, required to serve
    pub workdir: Option<PathBuf>,

    /// Go binary name or path
    pub go_binary: String,

    /// Exported to spawned commands as `GOPATH`
    pub gopath: Option<String>,

    /// Exported to spawned commands as `GOMODCACHE`
    pub gomodcache: Option<String>,

    /// Deadline for a single command in seconds, 0 disables it
    pub command_timeout_secs: u64,
}

impl ToolchainConfig {
    /// Deadline for a single command, `None` when disabled
    #[must_use]
    pub fn command_timeout(&self) -> Option<Duration> {
        (self.command_timeout_secs > 0).then(|| Duration::from_secs(self.command_timeout_secs))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,

    /// Log file path
    pub file_path: Option<String>,

    /// Enable console logging (stderr)
    pub enable_console: bool,

    /// Enable file logging
    pub enable_file: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            name: crate::NAME.to_string(),
            version: crate::VERSION.to_string(),
            description: Some("Go documentation and package listing for MCP clients".to_string()),
            host: "127.0.0.1".to_string(),
            port: 8080,
            transport_mode: "stdio".to_string(),
        }
    }
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            workdir: None,
            go_binary: "go".to_string(),
            gopath: None,
            gomodcache: None,
            command_timeout_secs: 120,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: Some("./logs/go-docs.log".to_string()),
            enable_console: true,
            enable_file: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, crate::error::Error> {
        let content = fs::read_to_string(path)
            .map_err(|e| crate::error::Error::Config(format!("failed to read config file: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| crate::error::Error::Config(format!("failed to parse config file: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, directory creation or writing fails
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), crate::error::Error> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::Error::Config(format!("failed to serialize config: {e}")))?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .map_err(|e| crate::error::Error::Config(format!("failed to create directory: {e}")))?;
        }

        fs::write(path, content)
            .map_err(|e| crate::error::Error::Config(format!("failed to write config file: {e}")))?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// The working directory is not checked here; see [`AppConfig::require_workdir`].
    ///
    /// # Errors
    ///
    /// Returns an error if any value is out of range
    pub fn validate(&self) -> Result<(), crate::error::Error> {
        if self.server.host.is_empty() {
            return Err(crate::error::Error::Config("server host cannot be empty".to_string()));
        }

        if self.server.port == 0 {
            return Err(crate::error::Error::Config("server port cannot be 0".to_string()));
        }

        if !TRANSPORT_MODES.contains(&self.server.transport_mode.as_str()) {
            return Err(crate::error::Error::Config(format!(
                "invalid transport mode: {}, valid values: {:?}",
                self.server.transport_mode, TRANSPORT_MODES
            )));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(crate::error::Error::Config(format!(
                "invalid log level: {}, valid values: {:?}",
                self.logging.level, LOG_LEVELS
            )));
        }

        if self.toolchain.go_binary.is_empty() {
            return Err(crate::error::Error::Config("go binary cannot be empty".to_string()));
        }

        if self.cache.cache_type != "memory" {
            return Err(crate::error::Error::Config(format!(
                "unsupported cache type: {}",
                self.cache.cache_type
            )));
        }

        if self.cache.memory_size == Some(0) {
            return Err(crate::error::Error::Config("cache memory size cannot be 0".to_string()));
        }

        Ok(())
    }

    /// Return the configured working directory
    ///
    /// # Errors
    ///
    /// Returns an error if no working directory is set or it is not a directory
    pub fn require_workdir(&self) -> Result<&Path, crate::error::Error> {
        let workdir = self
            .toolchain
            .workdir
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or_else(|| {
                crate::error::Error::Config(
                    "a working directory is required (set WORKDIR, GO_DOCS_WORKDIR or --workdir)"
                        .to_string(),
                )
            })?;

        if !workdir.is_dir() {
            return Err(crate::error::Error::Config(format!(
                "working directory does not exist: {}",
                workdir.display()
            )));
        }

        Ok(workdir)
    }

    /// Apply environment variable overrides
    ///
    /// # Errors
    ///
    /// Returns an error if a variable has an invalid format
    pub fn apply_env(&mut self) -> Result<(), crate::error::Error> {
        if let Some(workdir) = env_var("GO_DOCS_WORKDIR").or_else(|| env_var("WORKDIR")) {
            self.toolchain.workdir = Some(PathBuf::from(workdir));
        }

        if let Some(gopath) = env_var("GOPATH") {
            self.toolchain.gopath = Some(gopath);
        }

        if let Some(gomodcache) = env_var("GOMODCACHE") {
            self.toolchain.gomodcache = Some(gomodcache);
        }

        if let Some(binary) = env_var("GO_DOCS_GO_BINARY") {
            self.toolchain.go_binary = binary;
        }

        if let Some(host) = env_var("GO_DOCS_HOST") {
            self.server.host = host;
        }

        if let Some(port) = env_var("GO_DOCS_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| crate::error::Error::Config(format!("invalid port: {e}")))?;
        }

        if let Some(mode) = env_var("GO_DOCS_TRANSPORT_MODE") {
            self.server.transport_mode = mode;
        }

        if let Some(level) = env_var("GO_DOCS_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Load configuration from defaults and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable has an invalid format or validation fails
    pub fn from_env() -> Result<Self, crate::error::Error> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
