//! Dispatcher - validates and routes tool calls.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use super::envelope::{AdapterOutcome, ToolResult, normalize};
use super::registry::ToolRegistry;
use super::ToolError;

/// Routes validated calls to registered handlers and normalizes the outcome.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    call_timeout: Option<Duration>,
}

impl Dispatcher {
    /// Create a dispatcher over a fully built registry.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            call_timeout: None,
        }
    }

    /// Bound every tool call by `timeout`.
    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Dispatch a tool call.
    ///
    /// Unknown tools and contract violations never reach a handler. Adapter
    /// failures come back as `Ok` with error text; only handler faults map to
    /// [`ToolError::Internal`].
    #[instrument(skip(self, arguments))]
    pub async fn dispatch(
        &self,
        tool_name: &str,
        arguments: Option<&Value>,
    ) -> Result<ToolResult, ToolError> {
        let descriptor = self.registry.lookup(tool_name).inspect_err(|_| {
            warn!("Unknown tool requested: {}", tool_name);
        })?;

        let input = descriptor.contract.validate(arguments).inspect_err(|e| {
            warn!("Rejected arguments for {}: {}", tool_name, e);
        })?;

        let call = AssertUnwindSafe(descriptor.handler.call(input)).catch_unwind();
        let completed = match self.call_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(completed) => completed,
                Err(_) => {
                    warn!("Tool {} timed out after {:?}", tool_name, limit);
                    let outcome = AdapterOutcome::failure(format!(
                        "tool call timed out after {}s",
                        limit.as_secs()
                    ));
                    return Ok(normalize(&outcome));
                }
            },
            None => call.await,
        };

        match completed {
            Ok(Ok(outcome)) => {
                info!(success = outcome.is_success(), "Tool {} completed", tool_name);
                Ok(normalize(&outcome))
            }
            Ok(Err(fault)) => {
                error!("Tool {} failed: {:#}", tool_name, fault);
                Err(ToolError::internal(format!("tool '{tool_name}' failed: {fault}")))
            }
            Err(_) => {
                error!("Tool {} panicked", tool_name);
                Err(ToolError::internal(format!("tool '{tool_name}' panicked")))
            }
        }
    }
}
