//! Shared HTTP transport.
//!
//! One [`SharedTransport`] is created at startup and serves every HTTP
//! request. The route hands it the raw body and a [`ResponseWriter`]; the
//! writer tracks whether the status line and headers have been committed, so
//! the route knows whether a fault can still be turned into an error response.

use async_trait::async_trait;
use axum::body::Body;
use axum::response::Response;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// Response under construction for a single HTTP exchange.
#[derive(Debug)]
pub struct ResponseWriter {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    headers_sent: bool,
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self {
            status: StatusCode::ACCEPTED,
            headers: HeaderMap::new(),
            body: Vec::new(),
            headers_sent: false,
        }
    }
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether status and headers are committed.
    pub fn headers_sent(&self) -> bool {
        self.headers_sent
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) -> TransportResult<()> {
        if self.headers_sent {
            return Err(TransportError::http(format!(
                "cannot set {name}: headers already sent"
            )));
        }
        self.headers.insert(name, value);
        Ok(())
    }

    /// Commit the status line and headers.
    pub fn send_headers(&mut self, status: StatusCode) -> TransportResult<()> {
        if self.headers_sent {
            return Err(TransportError::http("headers already sent"));
        }
        self.status = status;
        self.headers_sent = true;
        Ok(())
    }

    /// Append to the body, committing a `200 OK` first if needed.
    pub fn write(&mut self, chunk: &[u8]) -> TransportResult<()> {
        if !self.headers_sent {
            self.send_headers(StatusCode::OK)?;
        }
        self.body.extend_from_slice(chunk);
        Ok(())
    }

    /// Write a complete JSON response.
    pub fn write_json<T: Serialize>(&mut self, status: StatusCode, value: &T) -> TransportResult<()> {
        let body = serde_json::to_vec(value)?;
        self.insert_header(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )?;
        self.send_headers(status)?;
        self.write(&body)
    }

    /// Turn what was written into a response. Nothing written means `202`.
    pub fn finish(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// The transport instance shared by every HTTP request.
#[async_trait]
pub trait SharedTransport: Send + Sync {
    /// Process one request body, writing the answer into `writer`.
    ///
    /// An error means the exchange could not be completed; what the caller
    /// can still do about it depends on [`ResponseWriter::headers_sent`].
    async fn handle_request(
        &self,
        session_id: &str,
        body: Bytes,
        writer: &mut ResponseWriter,
    ) -> TransportResult<()>;
}

/// JSON-RPC over single HTTP responses, backed by the shared [`McpServer`].
pub struct StreamableHttpTransport {
    server: McpServer,
}

impl StreamableHttpTransport {
    pub fn new(server: McpServer) -> Self {
        Self { server }
    }
}

#[async_trait]
impl SharedTransport for StreamableHttpTransport {
    #[instrument(skip(self, body, writer))]
    async fn handle_request(
        &self,
        session_id: &str,
        body: Bytes,
        writer: &mut ResponseWriter,
    ) -> TransportResult<()> {
        // A body that is not JSON at all cannot be answered in-band.
        let frame: Value = serde_json::from_slice(&body)?;

        match self.server.handle_value(frame).await {
            Some(response) => writer.write_json(StatusCode::OK, &response),
            None => {
                debug!("Acknowledging notification");
                writer.send_headers(StatusCode::ACCEPTED)
            }
        }
    }
}
