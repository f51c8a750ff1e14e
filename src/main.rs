//! Go Docs MCP server binary

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use go_docs::config::AppConfig;
use go_docs::GoDocsServer;
use rust_mcp_sdk::schema::ContentBlock;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "go-docs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MCP server for Go documentation and package listing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = "go-docs.toml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Working directory for go commands (overrides WORKDIR)
    #[arg(short, long, global = true)]
    workdir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Serve {
        /// Transport mode [stdio, http, sse]
        #[arg(short, long)]
        mode: Option<String>,

        /// Listen host
        #[arg(long)]
        host: Option<String>,

        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one tool invocation and print the result
    Query {
        /// Tool to call [go_doc, go_list]
        #[arg(short, long, default_value = "go_doc")]
        tool: String,

        /// Package, symbol, method or field (go_doc)
        target: Option<String>,

        /// Extra command flag, repeatable (e.g. --flag=-src)
        #[arg(long = "flag", allow_hyphen_values = true)]
        flags: Vec<String>,

        /// Package pattern, repeatable (go_list)
        #[arg(long = "package")]
        packages: Vec<String>,
    },

    /// Write a default config file
    Config {
        /// Output file path
        #[arg(short, long, default_value = "go-docs.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { mode, host, port } => {
            let mut config = load_config(&cli.config, cli.workdir)?;
            if let Some(mode) = mode {
                config.server.transport_mode = mode;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve_command(config, cli.debug).await?;
        }
        Commands::Query {
            tool,
            target,
            flags,
            packages,
        } => {
            let config = load_config(&cli.config, cli.workdir)?;
            query_command(config, cli.debug, &tool, target, flags, packages).await?;
        }
        Commands::Config { output, force } => {
            config_command(&output, force)?;
        }
        Commands::Version => {
            version_command();
        }
    }

    Ok(())
}

/// Load the config file, then apply environment and CLI overrides
fn load_config(config_path: &Path, workdir: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let mut config = if config_path.exists() {
        AppConfig::from_file(config_path)
            .with_context(|| format!("failed to load config file {}", config_path.display()))?
    } else {
        AppConfig::default()
    };

    config.apply_env().context("invalid environment override")?;
    if let Some(workdir) = workdir {
        config.toolchain.workdir = Some(workdir);
    }

    Ok(config)
}

fn init_logging(config: &AppConfig, debug: bool) -> anyhow::Result<()> {
    let mut logging = config.logging.clone();
    if debug {
        logging.level = "debug".to_string();
    }
    go_docs::init_logging_with_config(&logging).context("failed to initialize logging")?;
    Ok(())
}

/// Start the server
async fn serve_command(config: AppConfig, debug: bool) -> anyhow::Result<()> {
    config.validate().context("invalid configuration")?;
    init_logging(&config, debug)?;

    let server = GoDocsServer::new(config).context("failed to create server")?;
    tracing::info!(
        workdir = %server.service().workdir().display(),
        transport = %server.config().server.transport_mode,
        "starting go-docs MCP server v{}",
        go_docs::VERSION
    );

    server.run().await.context("server stopped with an error")?;
    Ok(())
}

/// Run a single tool call
async fn query_command(
    config: AppConfig,
    debug: bool,
    tool: &str,
    target: Option<String>,
    flags: Vec<String>,
    packages: Vec<String>,
) -> anyhow::Result<()> {
    config.validate().context("invalid configuration")?;
    init_logging(&config, debug)?;

    let server = GoDocsServer::new(config).context("failed to create server")?;

    let mut arguments = serde_json::json!({
        "cmd_flags": flags,
        "packages": packages,
    });
    if let Some(target) = target {
        arguments["pkgSymMethodOrField"] = serde_json::Value::String(target);
    }

    let result = server
        .tool_registry()
        .execute_tool(tool, arguments)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    for content in &result.content {
        match content {
            ContentBlock::TextContent(text) => println!("{}", text.text),
            other => println!("{other:?}"),
        }
    }

    if result.is_error == Some(true) {
        bail!("{tool} reported an error");
    }
    Ok(())
}

/// Write a default config file
fn config_command(output: &Path, force: bool) -> anyhow::Result<()> {
    if output.exists() && !force {
        bail!(
            "config file already exists: {}, use --force to overwrite",
            output.display()
        );
    }

    AppConfig::default()
        .save_to_file(output)
        .context("failed to save config file")?;

    println!("config file written to {}", output.display());
    Ok(())
}

fn version_command() {
    println!("go-docs v{}", go_docs::VERSION);
    println!("built: {}", env!("BUILD_TIMESTAMP"));
    println!("commit: {}", env!("GIT_COMMIT"));
    println!("rustc: {}", env!("RUST_VERSION"));
}
