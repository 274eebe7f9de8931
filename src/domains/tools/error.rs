//! Tool-specific error types.

use thiserror::Error;

use crate::core::protocol::error_codes;

/// Errors that can occur while registering or dispatching tools.
///
/// Failures reported by the Trello adapter are *not* represented here: they
/// travel as [`AdapterOutcome::Failure`](super::AdapterOutcome) and are
/// rendered in-band by the envelope.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// A tool with the same name is already registered.
    #[error("Duplicate tool name: {0}")]
    DuplicateToolName(String),

    /// The arguments do not satisfy the tool's input contract.
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// A handler faulted without producing an adapter outcome.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "duplicate tool name" error.
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateToolName(name.into())
    }

    /// Create a new "invalid params" error.
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// JSON-RPC error code used when this error reaches a transport.
    pub fn rpc_code(&self) -> i32 {
        match self {
            Self::NotFound(_) => error_codes::METHOD_NOT_FOUND,
            Self::InvalidParams(_) => error_codes::INVALID_PARAMS,
            Self::DuplicateToolName(_) | Self::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_codes() {
        assert_eq!(ToolError::not_found("x").rpc_code(), -32601);
        assert_eq!(ToolError::invalid_params("x").rpc_code(), -32602);
        assert_eq!(ToolError::internal("x").rpc_code(), -32603);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ToolError::not_found("get-nothing").to_string(),
            "Tool not found: get-nothing"
        );
        assert_eq!(
            ToolError::duplicate("get-boards").to_string(),
            "Duplicate tool name: get-boards"
        );
    }
}
