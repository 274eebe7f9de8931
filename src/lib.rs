//! Trello MCP Gateway Library
//!
//! This crate exposes Trello board, list and card operations as Model Context
//! Protocol (MCP) tools, reachable over a local STDIO binding or an HTTP
//! endpoint.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, JSON-RPC frames, the protocol
//!   router and the transport bindings
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: registry, dispatcher, envelope normalizer and tool definitions
//!   - **trello**: the Trello REST adapter
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use trello_mcp_gateway::core::{Config, McpServer, TransportService};
//! use trello_mcp_gateway::domains::{tools::ToolRegistry, trello::TrelloClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (config, _warnings) = Config::from_env();
//!     let client = TrelloClient::new(&config.trello)?;
//!     let registry = ToolRegistry::catalogue(Arc::new(client))?;
//!     let server = McpServer::new(config.clone(), Arc::new(registry));
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
