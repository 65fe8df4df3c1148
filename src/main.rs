//! Calcore CLI - standalone calculator and MCP tool server

use calcore::{Config, Core};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "calcore")]
#[command(version)]
#[command(about = "Calcore - calculator API and MCP tool server", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "~/.calcore/config.toml")]
    config: PathBuf,

    /// Run in MCP server mode (stdio)
    #[arg(long)]
    mcp: bool,

    /// Override server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override server host
    #[arg(long)]
    host: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initialize a new config file with defaults
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging. Diagnostics always go to stderr: in MCP mode stdout
    // carries the JSON-RPC stream and must stay clean.
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("calcore={},tower_http=debug", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Handle --init flag
    if args.init {
        let config_path = calcore::config::expand_path(&args.config);
        if config_path.exists() {
            tracing::warn!("Config file already exists: {}", config_path.display());
            return Ok(());
        }
        Config::create_default(&config_path)?;
        tracing::info!("Created default config at: {}", config_path.display());
        return Ok(());
    }

    // Load configuration
    let config_path = calcore::config::expand_path(&args.config);
    let mut config = if config_path.exists() {
        Config::from_file(&config_path)?
    } else {
        tracing::debug!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        Config::default()
    };

    // Apply environment overrides, then CLI overrides on top
    config.apply_env_overrides();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }

    // Create core instance
    let core = Core::new(config);

    if args.mcp {
        // MCP server mode - communicate over stdio
        tracing::info!("Starting MCP server mode");
        core.run_mcp_server().await?;
    } else {
        // HTTP server mode (blocks until shutdown)
        tracing::info!("Starting HTTP server mode");
        core.start_api_server().await?;
    }

    Ok(())
}
