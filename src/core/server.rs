//! MCP protocol router.
//!
//! This module contains the handler shared by every transport binding. It
//! answers the small slice of MCP the gateway serves (`initialize`, `ping`,
//! `tools/list`, `tools/call` and notifications) and delegates tool calls to
//! the [`Dispatcher`].
//!
//! Tools are declared in `domains/tools/definitions/` and registered in
//! `ToolRegistry::catalogue`. **Adding a new tool does NOT require modifying
//! this file!**

use rmcp::model::{
    CallToolResult, Implementation, ListToolsResult, ServerCapabilities, ServerInfo,
};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::config::Config;
use super::protocol::{JSONRPC_VERSION, JsonRpcRequest, JsonRpcResponse};
use crate::domains::tools::{Dispatcher, ToolRegistry};

const INSTRUCTIONS: &str = "This server exposes Trello boards, lists and cards as tools. \
     Trello failures are reported inside the tool result as text starting with \"Error: \".";

/// The protocol router shared by all transports.
///
/// Cheap to clone: configuration and the dispatcher's registry are behind
/// `Arc`s and never mutated after startup.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    dispatcher: Dispatcher,
}

impl McpServer {
    /// Create a new server over a fully built tool registry.
    pub fn new(config: Config, registry: Arc<ToolRegistry>) -> Self {
        let dispatcher =
            Dispatcher::new(registry).with_call_timeout(config.gateway.tool_timeout());
        Self {
            config: Arc::new(config),
            dispatcher,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Handle one decoded JSON frame.
    ///
    /// Returns `None` when nothing must be sent back (notifications).
    pub async fn handle_value(&self, frame: Value) -> Option<JsonRpcResponse> {
        match JsonRpcRequest::from_value(frame) {
            Ok(request) => self.handle_request(request).await,
            Err(response) => {
                warn!("Rejected malformed JSON-RPC frame");
                Some(response)
            }
        }
    }

    /// Route a JSON-RPC request to its method handler.
    #[instrument(skip(self, request), fields(method = %request.method))]
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != JSONRPC_VERSION {
            warn!("Unsupported JSON-RPC version: {}", request.jsonrpc);
            return request
                .id
                .map(|id| JsonRpcResponse::invalid_request(Some(id)));
        }

        if request.is_notification() {
            self.handle_notification(&request);
            return None;
        }

        let id = request.id;
        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id, request.params.as_ref()),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params.as_ref()).await,
            method => {
                warn!("Unknown method: {}", method);
                JsonRpcResponse::method_not_found(id)
            }
        };
        Some(response)
    }

    fn handle_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => info!("Client sent initialized notification"),
            method if method.starts_with("notifications/") => {
                debug!("Received notification: {}", method)
            }
            method => debug!("Ignoring request without id: {}", method),
        }
    }

    fn server_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn handle_initialize(&self, id: Option<Value>, params: Option<&Value>) -> JsonRpcResponse {
        info!("Processing initialize request");

        let mut result = match serde_json::to_value(self.server_info()) {
            Ok(result) => result,
            Err(e) => return JsonRpcResponse::internal_error(id, e.to_string()),
        };

        // Agree on whatever revision the client asked for; only tools are served.
        if let Some(version) = params
            .and_then(|p| p.get("protocolVersion"))
            .and_then(Value::as_str)
        {
            result["protocolVersion"] = json!(version);
        }

        JsonRpcResponse::success(id, result)
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ListToolsResult {
            tools: self.dispatcher.registry().tools(),
            next_cursor: None,
            meta: None,
        };
        respond(id, &result)
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Option<&Value>) -> JsonRpcResponse {
        let Some(params) = params.filter(|p| p.is_object()) else {
            return JsonRpcResponse::invalid_params(id, "Missing params");
        };
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::invalid_params(id, "Missing tool name");
        };

        match self.dispatcher.dispatch(name, params.get("arguments")).await {
            Ok(result) => respond(id, &CallToolResult::from(result)),
            Err(e) => JsonRpcResponse::error(id, e.rpc_code(), e.to_string()),
        }
    }
}

fn respond<T: Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::internal_error(id, e.to_string()),
    }
}
