//! Tool Registry - central registration of all tools.
//!
//! The catalogue is closed: every tool is registered once at startup in
//! [`ToolRegistry::catalogue`], after which the registry is shared read-only
//! behind an `Arc`. Registering a name twice is a configuration error.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rmcp::model::Tool;
use tracing::debug;

use super::ToolError;
use super::definitions::{
    AddAttachmentToCardTool, AddCommentToCardTool, CreateBoardTool, CreateCardTool,
    CreateListTool, DeleteCardTool, DeleteListTool, GetBoardByIdTool, GetBoardByNameTool,
    GetBoardsTool, GetCardByIdTool, GetCardsByBoardIdTool, GetCardsByListIdTool,
    GetListByIdTool, GetListsByBoardIdTool, MoveCardToListTool, UpdateCardTool, UpdateListTool,
};
use super::handlers::{ToolHandler, describe};
use super::schema::InputContract;
use crate::domains::trello::TrelloApi;

/// A registered tool: its metadata, input contract and handler.
#[derive(Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub title: String,
    pub description: String,
    pub contract: InputContract,
    pub handler: Arc<dyn ToolHandler>,
}

impl ToolDescriptor {
    /// Create a Tool model for this descriptor (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.clone().into(),
            description: Some(self.description.clone().into()),
            input_schema: Arc::new(self.contract.to_json_schema()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some(self.title.clone()),
        }
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("contract", &self.contract)
            .finish_non_exhaustive()
    }
}

/// Tool registry - name to descriptor mapping.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    descriptors: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry with every Trello tool.
    pub fn catalogue(api: Arc<dyn TrelloApi>) -> Result<Self, ToolError> {
        let mut registry = Self::new();

        registry.register(describe(GetBoardsTool::new(api.clone())))?;
        registry.register(describe(GetBoardByIdTool::new(api.clone())))?;
        registry.register(describe(GetBoardByNameTool::new(api.clone())))?;
        registry.register(describe(CreateBoardTool::new(api.clone())))?;
        registry.register(describe(GetListsByBoardIdTool::new(api.clone())))?;
        registry.register(describe(GetCardsByBoardIdTool::new(api.clone())))?;

        registry.register(describe(GetListByIdTool::new(api.clone())))?;
        registry.register(describe(GetCardsByListIdTool::new(api.clone())))?;
        registry.register(describe(CreateListTool::new(api.clone())))?;
        registry.register(describe(UpdateListTool::new(api.clone())))?;
        registry.register(describe(DeleteListTool::new(api.clone())))?;

        registry.register(describe(GetCardByIdTool::new(api.clone())))?;
        registry.register(describe(CreateCardTool::new(api.clone())))?;
        registry.register(describe(UpdateCardTool::new(api.clone())))?;
        registry.register(describe(DeleteCardTool::new(api.clone())))?;
        registry.register(describe(AddCommentToCardTool::new(api.clone())))?;
        registry.register(describe(AddAttachmentToCardTool::new(api.clone())))?;
        registry.register(describe(MoveCardToListTool::new(api)))?;

        Ok(registry)
    }

    /// Add a descriptor, rejecting duplicate names.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<(), ToolError> {
        if self.index.contains_key(&descriptor.name) {
            return Err(ToolError::duplicate(descriptor.name));
        }
        debug!("Registered tool {}", descriptor.name);
        self.index
            .insert(descriptor.name.clone(), self.descriptors.len());
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Find a tool by name.
    pub fn lookup(&self, name: &str) -> Result<&ToolDescriptor, ToolError> {
        self.index
            .get(name)
            .map(|&i| &self.descriptors[i])
            .ok_or_else(|| ToolError::not_found(name))
    }

    /// All descriptors in registration order.
    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.name.as_str()).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn tools(&self) -> Vec<Tool> {
        self.descriptors.iter().map(ToolDescriptor::to_tool).collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
