//! HTTP transport implementation.
//!
//! HTTP server with JSON-RPC over POST requests. Every request gets a session
//! id (echoed when the client sends one) and is handed to the single
//! [`SharedTransport`] created at startup.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};
use uuid::Uuid;

use super::streamable::{ResponseWriter, SharedTransport, StreamableHttpTransport};
use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::protocol::JsonRpcResponse;

/// Header carrying the per-request session id.
pub const SESSION_HEADER: &str = "mcp-session-id";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
struct AppState {
    transport: Arc<dyn SharedTransport>,
    rpc_path: String,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.config.address();
        let transport: Arc<dyn SharedTransport> = Arc::new(StreamableHttpTransport::new(server));
        let app = router(transport, &self.config);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr, cors_status
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the router around a shared transport.
pub fn router(transport: Arc<dyn SharedTransport>, config: &HttpConfig) -> Router {
    let state = AppState {
        transport,
        rpc_path: config.rpc_path.clone(),
    };

    let mut app = Router::new()
        .route(&config.rpc_path, post(handle_mcp))
        .route("/health", get(health_check))
        .route("/", get(root_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    // Add CORS if enabled
    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers([HeaderName::from_static(SESSION_HEADER)]);
        app = app.layer(cors);
    }

    app
}

/// Root handler - a short welcome text.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    format!(
        "Trello MCP gateway v{}. Send JSON-RPC 2.0 requests to POST {}\n",
        env!("CARGO_PKG_VERSION"),
        state.rpc_path
    )
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Handle one JSON-RPC exchange.
///
/// A transport fault becomes a `500` with a JSON-RPC internal error, unless
/// the response was already committed; then it is only logged.
#[instrument(skip_all, fields(session))]
async fn handle_mcp(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let session_id = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    tracing::Span::current().record("session", session_id.as_str());

    let mut writer = ResponseWriter::new();
    if let Ok(value) = HeaderValue::from_str(&session_id) {
        // Cannot fail before anything was committed.
        let _ = writer.insert_header(HeaderName::from_static(SESSION_HEADER), value);
    }

    match state
        .transport
        .handle_request(&session_id, body, &mut writer)
        .await
    {
        Ok(()) => writer.finish(),
        Err(e) if !writer.headers_sent() => {
            error!("Transport failed before responding: {}", e);
            internal_error_response(&session_id)
        }
        Err(e) => {
            error!("Transport failed after headers were sent: {}", e);
            writer.finish()
        }
    }
}

fn internal_error_response(session_id: &str) -> Response {
    let body = JsonRpcResponse::internal_error(None, "Internal server error");
    let mut response = (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    if let Ok(value) = HeaderValue::from_str(session_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(SESSION_HEADER), value);
    }
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
