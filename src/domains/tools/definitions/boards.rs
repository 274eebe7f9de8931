//! Board tools.

use std::sync::Arc;

use crate::domains::tools::handlers::{ToolDefinition, ToolHandler};
use crate::domains::tools::schema::{FieldKind, InputContract, ToolInput};
use crate::domains::tools::AdapterOutcome;
use crate::domains::trello::{NewBoard, TrelloApi};

use super::common::summarize_all;

// ============================================================================
// get-boards
// ============================================================================

/// Lists the boards of the authenticated member as summaries.
pub struct GetBoardsTool {
    api: Arc<dyn TrelloApi>,
}

impl GetBoardsTool {
    pub fn new(api: Arc<dyn TrelloApi>) -> Self {
        Self { api }
    }
}

impl ToolDefinition for GetBoardsTool {
    const NAME: &'static str = "get-boards";
    const TITLE: &'static str = "Get Boards";
    const DESCRIPTION: &'static str =
        "Get all boards for the current user. Returns id, name, description and url per board.";

    fn contract() -> InputContract {
        InputContract::new()
    }
}

#[async_trait::async_trait]
impl ToolHandler for GetBoardsTool {
    async fn call(&self, _input: ToolInput) -> anyhow::Result<AdapterOutcome> {
        Ok(self.api.get_boards().await.map(summarize_all))
    }
}

// ============================================================================
// get-board-by-id
// ============================================================================

pub struct GetBoardByIdTool {
    api: Arc<dyn TrelloApi>,
}

impl GetBoardByIdTool {
    pub fn new(api: Arc<dyn TrelloApi>) -> Self {
        Self { api }
    }
}

impl ToolDefinition for GetBoardByIdTool {
    const NAME: &'static str = "get-board-by-id";
    const TITLE: &'static str = "Get Board by ID";
    const DESCRIPTION: &'static str = "Get a Trello board by id";

    fn contract() -> InputContract {
        InputContract::new().required("id", FieldKind::String, "The id of the board to get")
    }
}

#[async_trait::async_trait]
impl ToolHandler for GetBoardByIdTool {
    async fn call(&self, input: ToolInput) -> anyhow::Result<AdapterOutcome> {
        Ok(self.api.get_board_by_id(input.str("id")?).await)
    }
}

// ============================================================================
// get-board-by-name
// ============================================================================

pub struct GetBoardByNameTool {
    api: Arc<dyn TrelloApi>,
}

impl GetBoardByNameTool {
    pub fn new(api: Arc<dyn TrelloApi>) -> Self {
        Self { api }
    }
}

impl ToolDefinition for GetBoardByNameTool {
    const NAME: &'static str = "get-board-by-name";
    const TITLE: &'static str = "Get Board by Name";
    const DESCRIPTION: &'static str = "Get a Trello board by its exact name";

    fn contract() -> InputContract {
        InputContract::new().required("name", FieldKind::String, "The name of the board to get")
    }
}

#[async_trait::async_trait]
impl ToolHandler for GetBoardByNameTool {
    async fn call(&self, input: ToolInput) -> anyhow::Result<AdapterOutcome> {
        Ok(self.api.get_board_by_name(input.str("name")?).await)
    }
}

// ============================================================================
// create-board
// ============================================================================

pub struct CreateBoardTool {
    api: Arc<dyn TrelloApi>,
}

impl CreateBoardTool {
    pub fn new(api: Arc<dyn TrelloApi>) -> Self {
        Self { api }
    }
}

impl ToolDefinition for CreateBoardTool {
    const NAME: &'static str = "create-board";
    const TITLE: &'static str = "Create Board";
    const DESCRIPTION: &'static str = "Create a Trello board";

    fn contract() -> InputContract {
        InputContract::new()
            .required("name", FieldKind::String, "The name of the board to create")
            .optional("description", FieldKind::String, "The description of the board")
    }
}

#[async_trait::async_trait]
impl ToolHandler for CreateBoardTool {
    async fn call(&self, input: ToolInput) -> anyhow::Result<AdapterOutcome> {
        let board = NewBoard {
            name: input.str("name")?.to_string(),
            desc: input.opt_str("description").map(str::to_string),
        };
        Ok(self.api.create_board(&board).await)
    }
}

// ============================================================================
// get-lists-by-board-id
// ============================================================================

pub struct GetListsByBoardIdTool {
    api: Arc<dyn TrelloApi>,
}

impl GetListsByBoardIdTool {
    pub fn new(api: Arc<dyn TrelloApi>) -> Self {
        Self { api }
    }
}

impl ToolDefinition for GetListsByBoardIdTool {
    const NAME: &'static str = "get-lists-by-board-id";
    const TITLE: &'static str = "Get Lists by Board ID";
    const DESCRIPTION: &'static str = "Get the lists of a Trello board by board id";

    fn contract() -> InputContract {
        InputContract::new().required("id", FieldKind::String, "The id of the board to get lists")
    }
}

#[async_trait::async_trait]
impl ToolHandler for GetListsByBoardIdTool {
    async fn call(&self, input: ToolInput) -> anyhow::Result<AdapterOutcome> {
        Ok(self.api.get_lists_by_board_id(input.str("id")?).await)
    }
}

// ============================================================================
// get-cards-by-board-id
// ============================================================================

/// Cards across every list of a board, as summaries.
pub struct GetCardsByBoardIdTool {
    api: Arc<dyn TrelloApi>,
}

impl GetCardsByBoardIdTool {
    pub fn new(api: Arc<dyn TrelloApi>) -> Self {
        Self { api }
    }
}

impl ToolDefinition for GetCardsByBoardIdTool {
    const NAME: &'static str = "get-cards-by-board-id";
    const TITLE: &'static str = "Get Cards by Board ID";
    const DESCRIPTION: &'static str = "Get the cards of every list on a Trello board by board id. Returns id, name, description and url per card.";

    fn contract() -> InputContract {
        InputContract::new().required("id", FieldKind::String, "The id of the board to get cards")
    }
}

#[async_trait::async_trait]
impl ToolHandler for GetCardsByBoardIdTool {
    async fn call(&self, input: ToolInput) -> anyhow::Result<AdapterOutcome> {
        Ok(self
            .api
            .get_cards_by_board_id(input.str("id")?)
            .await
            .map(summarize_all))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::testing::FakeTrello;
    use serde_json::json;

    fn input(contract: InputContract, raw: serde_json::Value) -> ToolInput {
        contract.validate(Some(&raw)).unwrap()
    }

    #[tokio::test]
    async fn test_get_boards_projects_summaries() {
        let fake = Arc::new(FakeTrello::new());
        fake.respond_with(json!([
            { "id": "b1", "name": "Roadmap", "desc": "", "url": "https://trello.com/b/b1", "closed": false }
        ]));
        let tool = GetBoardsTool::new(fake.clone());

        let outcome = tool.call(input(GetBoardsTool::contract(), json!({}))).await.unwrap();
        assert_eq!(
            outcome,
            AdapterOutcome::Success(json!([
                { "id": "b1", "name": "Roadmap", "description": "", "url": "https://trello.com/b/b1" }
            ]))
        );
        assert_eq!(fake.calls(), vec![("get_boards".to_string(), vec![])]);
    }

    #[tokio::test]
    async fn test_get_board_by_id_passes_data_through() {
        let board = json!({ "id": "b1", "name": "Roadmap", "desc": "", "labelNames": {} });
        let fake = Arc::new(FakeTrello::new());
        fake.respond_with(board.clone());
        let tool = GetBoardByIdTool::new(fake);

        let outcome = tool
            .call(input(GetBoardByIdTool::contract(), json!({ "id": "b1" })))
            .await
            .unwrap();
        assert_eq!(outcome, AdapterOutcome::Success(board));
    }

    #[tokio::test]
    async fn test_create_board_forwards_description() {
        let fake = Arc::new(FakeTrello::new());
        let tool = CreateBoardTool::new(fake.clone());

        tool.call(input(
            CreateBoardTool::contract(),
            json!({ "name": "Ops", "description": "On-call rota" }),
        ))
        .await
        .unwrap();
        assert_eq!(
            fake.calls(),
            vec![(
                "create_board".to_string(),
                vec!["Ops".to_string(), "On-call rota".to_string()]
            )]
        );
    }

    #[tokio::test]
    async fn test_cards_by_board_failure_is_not_projected() {
        let fake = Arc::new(FakeTrello::new());
        fake.fail_with("HTTP 401: invalid token");
        let tool = GetCardsByBoardIdTool::new(fake);

        let outcome = tool
            .call(input(GetCardsByBoardIdTool::contract(), json!({ "id": "b1" })))
            .await
            .unwrap();
        assert_eq!(outcome, AdapterOutcome::failure("HTTP 401: invalid token"));
    }
}
