//! Trello MCP Gateway Entry Point
//!
//! Initializes logging, loads configuration, builds the Trello client and the
//! tool registry, then serves the configured transport.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use trello_mcp_gateway::core::config::LoggingConfig;
use trello_mcp_gateway::core::{Config, McpServer, TransportService};
use trello_mcp_gateway::domains::tools::ToolRegistry;
use trello_mcp_gateway::domains::trello::TrelloClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let (config, config_warnings) = Config::from_env();

    // Initialize logging
    init_logging(&config.logging);

    info!("Starting {} v{}", config.server.name, config.server.version);
    for message in &config_warnings {
        warn!("{}", message);
    }
    if config.trello.credentials.is_complete() {
        info!("Trello credentials loaded from environment");
    } else {
        warn!(
            "TRELLO_API_KEY and TRELLO_TOKEN are not both set. \
             Every Trello tool will report missing credentials."
        );
    }

    let client = TrelloClient::new(&config.trello).context("failed to build Trello client")?;
    let registry = ToolRegistry::catalogue(Arc::new(client)).context("invalid tool catalogue")?;
    info!("Registered {} tools", registry.len());

    let server = McpServer::new(config.clone(), Arc::new(registry));

    info!("Server initialized");

    // Create and run the transport service
    let transport = TransportService::new(config.transport);
    transport.run(server).await.context("transport failed")?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs always go to stderr: stdout carries protocol frames in STDIO mode.
fn init_logging(config: &LoggingConfig) {
    let level = match config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if config.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
