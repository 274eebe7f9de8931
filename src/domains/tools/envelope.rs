//! Envelope normalization.
//!
//! Every adapter call ends in an [`AdapterOutcome`]. The normalizer turns it
//! into a [`ToolResult`] holding exactly one text block, whether the remote
//! operation succeeded or not. Failures are reported in-band as text with a
//! fixed `"Error: "` prefix; nothing about them is signalled out of band.

use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix applied to every failed adapter outcome.
pub const ERROR_PREFIX: &str = "Error: ";

/// Result of a single Resource Adapter call.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterOutcome {
    /// The remote operation succeeded and returned `data`.
    Success(Value),
    /// The remote operation failed; the message is passed through verbatim.
    Failure(String),
}

impl AdapterOutcome {
    /// Create a failure outcome.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    /// Transform the success payload, leaving failures untouched.
    pub fn map(self, f: impl FnOnce(Value) -> Value) -> Self {
        match self {
            Self::Success(data) => Self::Success(f(data)),
            failure => failure,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// A single content block of a tool result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// The textual payload of this block.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text } => text,
        }
    }
}

/// Uniform shape returned by every tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ContentBlock>,
}

impl ToolResult {
    /// Build a result with a single text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
        }
    }

    /// Text of the first content block, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(ContentBlock::as_text)
    }
}

impl From<ToolResult> for CallToolResult {
    fn from(result: ToolResult) -> Self {
        let content = result
            .content
            .into_iter()
            .map(|block| match block {
                ContentBlock::Text { text } => Content::text(text),
            })
            .collect();
        CallToolResult::success(content)
    }
}

/// Map an adapter outcome to the protocol's content-block result.
pub fn normalize(outcome: &AdapterOutcome) -> ToolResult {
    match outcome {
        AdapterOutcome::Success(data) => ToolResult::text(data.to_string()),
        AdapterOutcome::Failure(message) => ToolResult::text(format!("{ERROR_PREFIX}{message}")),
    }
}
