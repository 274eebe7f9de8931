//! Tools domain module.
//!
//! This module is the Tool Gateway: it declares the callable tools, validates
//! and routes calls to them, and normalizes their outcomes.
//!
//! ## Architecture
//!
//! - `definitions/` - Trello tool implementations, grouped by resource
//! - `schema.rs` - Input contracts and the generic validator
//! - `handlers.rs` - Handler traits implemented by every tool
//! - `registry.rs` - Name to descriptor catalogue, built once at startup
//! - `dispatcher.rs` - Lookup, validation, invocation and fault capture
//! - `envelope.rs` - Adapter outcome to tool result normalization
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add a struct to the matching file in `definitions/`
//! 2. Implement `ToolDefinition` and `ToolHandler` for it
//! 3. Register it in `ToolRegistry::catalogue`

pub mod definitions;
mod dispatcher;
mod envelope;
mod error;
pub mod handlers;
mod registry;
pub mod schema;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatcher::Dispatcher;
pub use envelope::{AdapterOutcome, ContentBlock, ERROR_PREFIX, ToolResult, normalize};
pub use error::ToolError;
pub use handlers::{ToolDefinition, ToolHandler};
pub use registry::{ToolDescriptor, ToolRegistry};
pub use schema::{FieldKind, InputContract, ToolInput};
