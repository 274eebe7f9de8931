//! List tools.

use std::sync::Arc;

use crate::domains::tools::handlers::{ToolDefinition, ToolHandler};
use crate::domains::tools::schema::{FieldKind, InputContract, ToolInput};
use crate::domains::tools::AdapterOutcome;
use crate::domains::trello::TrelloApi;

// ============================================================================
// get-list-by-id
// ============================================================================

pub struct GetListByIdTool {
    api: Arc<dyn TrelloApi>,
}

impl GetListByIdTool {
    pub fn new(api: Arc<dyn TrelloApi>) -> Self {
        Self { api }
    }
}

impl ToolDefinition for GetListByIdTool {
    const NAME: &'static str = "get-list-by-id";
    const TITLE: &'static str = "Get List by ID";
    const DESCRIPTION: &'static str = "Get a Trello list by id";

    fn contract() -> InputContract {
        InputContract::new().required("id", FieldKind::String, "The id of the list to get")
    }
}

#[async_trait::async_trait]
impl ToolHandler for GetListByIdTool {
    async fn call(&self, input: ToolInput) -> anyhow::Result<AdapterOutcome> {
        Ok(self.api.get_list_by_id(input.str("id")?).await)
    }
}

// ============================================================================
// get-cards-by-list-id
// ============================================================================

pub struct GetCardsByListIdTool {
    api: Arc<dyn TrelloApi>,
}

impl GetCardsByListIdTool {
    pub fn new(api: Arc<dyn TrelloApi>) -> Self {
        Self { api }
    }
}

impl ToolDefinition for GetCardsByListIdTool {
    const NAME: &'static str = "get-cards-by-list-id";
    const TITLE: &'static str = "Get Cards by List ID";
    const DESCRIPTION: &'static str = "Get the cards of a Trello list by list id";

    fn contract() -> InputContract {
        InputContract::new().required("id", FieldKind::String, "The id of the list to get cards")
    }
}

#[async_trait::async_trait]
impl ToolHandler for GetCardsByListIdTool {
    async fn call(&self, input: ToolInput) -> anyhow::Result<AdapterOutcome> {
        Ok(self.api.get_cards_by_list_id(input.str("id")?).await)
    }
}

// ============================================================================
// create-list
// ============================================================================

pub struct CreateListTool {
    api: Arc<dyn TrelloApi>,
}

impl CreateListTool {
    pub fn new(api: Arc<dyn TrelloApi>) -> Self {
        Self { api }
    }
}

impl ToolDefinition for CreateListTool {
    const NAME: &'static str = "create-list";
    const TITLE: &'static str = "Create List";
    const DESCRIPTION: &'static str = "Create a list on a Trello board";

    fn contract() -> InputContract {
        InputContract::new()
            .required("boardId", FieldKind::String, "The id of the board to create the list on")
            .required("name", FieldKind::String, "The name of the list")
    }
}

#[async_trait::async_trait]
impl ToolHandler for CreateListTool {
    async fn call(&self, input: ToolInput) -> anyhow::Result<AdapterOutcome> {
        Ok(self
            .api
            .create_list(input.str("boardId")?, input.str("name")?)
            .await)
    }
}

// ============================================================================
// update-list
// ============================================================================

pub struct UpdateListTool {
    api: Arc<dyn TrelloApi>,
}

impl UpdateListTool {
    pub fn new(api: Arc<dyn TrelloApi>) -> Self {
        Self { api }
    }
}

impl ToolDefinition for UpdateListTool {
    const NAME: &'static str = "update-list";
    const TITLE: &'static str = "Update List";
    const DESCRIPTION: &'static str = "Rename a Trello list";

    fn contract() -> InputContract {
        InputContract::new()
            .required("id", FieldKind::String, "The id of the list to update")
            .required("name", FieldKind::String, "The new name of the list")
    }
}

#[async_trait::async_trait]
impl ToolHandler for UpdateListTool {
    async fn call(&self, input: ToolInput) -> anyhow::Result<AdapterOutcome> {
        Ok(self
            .api
            .update_list(input.str("id")?, input.str("name")?)
            .await)
    }
}

// ============================================================================
// delete-list
// ============================================================================

pub struct DeleteListTool {
    api: Arc<dyn TrelloApi>,
}

impl DeleteListTool {
    pub fn new(api: Arc<dyn TrelloApi>) -> Self {
        Self { api }
    }
}

impl ToolDefinition for DeleteListTool {
    const NAME: &'static str = "delete-list";
    const TITLE: &'static str = "Delete List";
    const DESCRIPTION: &'static str = "Delete a Trello list by id";

    fn contract() -> InputContract {
        InputContract::new().required("id", FieldKind::String, "The id of the list to delete")
    }
}

#[async_trait::async_trait]
impl ToolHandler for DeleteListTool {
    async fn call(&self, input: ToolInput) -> anyhow::Result<AdapterOutcome> {
        Ok(self.api.delete_list(input.str("id")?).await)
    }
}
