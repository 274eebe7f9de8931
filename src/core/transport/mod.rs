//! Transport layer for the MCP gateway.
//!
//! This module provides the two transport bindings:
//! - **STDIO**: line-delimited JSON-RPC on stdin/stdout - feature: `stdio`
//! - **HTTP**: JSON-RPC over POST with per-request sessions - feature: `http`
//!
//! Each transport handles the connection lifecycle and delegates
//! message processing to the shared [`McpServer`](crate::core::McpServer).
//!
//! # Feature Flags
//!
//! Transport implementations are conditionally compiled based on features:
//! - `stdio` (default): STDIO transport - minimal dependencies
//! - `http` (default): HTTP transport - adds axum, tower, tower-http

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub mod streamable;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

// Re-export configs for convenience
#[cfg(feature = "http")]
pub use config::HttpConfig;
