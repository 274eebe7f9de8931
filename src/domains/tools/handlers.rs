//! Tool handler traits.
//!
//! A handler receives validated, trimmed input and performs exactly one
//! Resource Adapter operation. Adapter failures are part of the returned
//! [`AdapterOutcome`]; an `Err` from [`ToolHandler::call`] means the handler
//! itself is defective and is reported as an internal error.

use std::sync::Arc;

use super::registry::ToolDescriptor;
use super::schema::{InputContract, ToolInput};
use super::AdapterOutcome;

/// Executes a tool against its adapter.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with validated arguments.
    async fn call(&self, input: ToolInput) -> anyhow::Result<AdapterOutcome>;
}

/// Static metadata of a tool implementation.
///
/// Tool definitions implement this next to [`ToolHandler`] so the catalogue
/// can turn them into descriptors with [`describe`].
pub trait ToolDefinition: ToolHandler + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Human readable title.
    const TITLE: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Accepted arguments.
    fn contract() -> InputContract;
}

/// Build a descriptor from a tool definition.
pub fn describe<T: ToolDefinition>(tool: T) -> ToolDescriptor {
    ToolDescriptor {
        name: T::NAME.to_string(),
        title: T::TITLE.to_string(),
        description: T::DESCRIPTION.to_string(),
        contract: T::contract(),
        handler: Arc::new(tool),
    }
}
