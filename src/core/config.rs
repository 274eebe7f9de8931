//! Configuration management for the MCP gateway.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (optionally loaded from a `.env` file) or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure for the gateway.
///
/// This struct contains all configurable aspects of the server, organized
/// by concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Tool gateway behaviour.
    pub gateway: GatewayConfig,

    /// Trello adapter configuration.
    pub trello: TrelloConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Dispatcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Deadline for a single tool call in seconds. `0` disables it.
    pub tool_timeout_secs: u64,
}

/// Trello REST adapter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrelloConfig {
    /// API root, without trailing slash.
    pub base_url: String,

    /// Per-request HTTP timeout in seconds.
    pub request_timeout_secs: u64,

    /// Maximum number of concurrent sub-requests in a fan-out.
    pub fanout_limit: usize,

    pub credentials: CredentialsConfig,
}

/// Trello API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Developer API key. Get one at https://trello.com/app-key
    pub api_key: Option<String>,

    /// User token authorizing the key.
    pub token: Option<String>,
}

impl CredentialsConfig {
    /// Both halves of the credential pair are present.
    pub fn is_complete(&self) -> bool {
        self.api_key.is_some() && self.token.is_some()
    }
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            tool_timeout_secs: 30,
        }
    }
}

impl GatewayConfig {
    /// The call-level deadline, or `None` when disabled.
    pub fn tool_timeout(&self) -> Option<Duration> {
        (self.tool_timeout_secs > 0).then(|| Duration::from_secs(self.tool_timeout_secs))
    }
}

impl Default for TrelloConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.trello.com/1".to_string(),
            request_timeout_secs: 30,
            fanout_limit: 4,
            credentials: CredentialsConfig::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "trello-mcp-gateway".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            gateway: GatewayConfig::default(),
            trello: TrelloConfig::default(),
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|v| v.to_lowercase() != "false" && v != "0")
}

fn env_parse<T: std::str::FromStr>(name: &str, warnings: &mut Vec<String>) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warnings.push(format!("Ignoring {name}: cannot parse {raw:?}"));
            None
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Gateway settings are prefixed with `MCP_`; Trello credentials use the
    /// conventional `TRELLO_API_KEY` and `TRELLO_TOKEN`.
    ///
    /// Loading runs before logging exists, so values that were ignored are
    /// returned as messages for the caller to log once it can.
    pub fn from_env() -> (Self, Vec<String>) {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        let mut warnings = Vec::new();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(timestamps) = env_flag("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = timestamps;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Some(secs) = env_parse("MCP_TOOL_TIMEOUT_SECS", &mut warnings) {
            config.gateway.tool_timeout_secs = secs;
        }

        if let Ok(base_url) = std::env::var("MCP_TRELLO_BASE_URL") {
            config.trello.base_url = base_url;
        }

        if let Some(secs) = env_parse("MCP_TRELLO_TIMEOUT_SECS", &mut warnings) {
            config.trello.request_timeout_secs = secs;
        }

        if let Some(limit) = env_parse::<usize>("MCP_TRELLO_FANOUT_LIMIT", &mut warnings) {
            config.trello.fanout_limit = limit.max(1);
        }

        // Load Trello credentials
        config.trello.credentials.api_key = std::env::var("TRELLO_API_KEY").ok();
        config.trello.credentials.token = std::env::var("TRELLO_TOKEN").ok();

        (config, warnings)
    }
}
