//! Card tools.

use std::sync::Arc;

use crate::domains::tools::handlers::{ToolDefinition, ToolHandler};
use crate::domains::tools::schema::{FieldKind, InputContract, ToolInput};
use crate::domains::tools::AdapterOutcome;
use crate::domains::trello::{CardChanges, NewCard, TrelloApi};

// ============================================================================
// get-card-by-id
// ============================================================================

pub struct GetCardByIdTool {
    api: Arc<dyn TrelloApi>,
}

impl GetCardByIdTool {
    pub fn new(api: Arc<dyn TrelloApi>) -> Self {
        Self { api }
    }
}

impl ToolDefinition for GetCardByIdTool {
    const NAME: &'static str = "get-card-by-id";
    const TITLE: &'static str = "Get Card by ID";
    const DESCRIPTION: &'static str = "Get a Trello card by id";

    fn contract() -> InputContract {
        InputContract::new().required("id", FieldKind::String, "The id of the card to get")
    }
}

#[async_trait::async_trait]
impl ToolHandler for GetCardByIdTool {
    async fn call(&self, input: ToolInput) -> anyhow::Result<AdapterOutcome> {
        Ok(self.api.get_card_by_id(input.str("id")?).await)
    }
}

// ============================================================================
// create-card
// ============================================================================

pub struct CreateCardTool {
    api: Arc<dyn TrelloApi>,
}

impl CreateCardTool {
    pub fn new(api: Arc<dyn TrelloApi>) -> Self {
        Self { api }
    }
}

impl ToolDefinition for CreateCardTool {
    const NAME: &'static str = "create-card";
    const TITLE: &'static str = "Create Card";
    const DESCRIPTION: &'static str = "Create a Trello card in a list";

    fn contract() -> InputContract {
        InputContract::new()
            .required("listId", FieldKind::String, "The id of the list to create the card in")
            .required("name", FieldKind::String, "The name of the card")
            .optional("description", FieldKind::String, "The description of the card")
            .optional("due", FieldKind::String, "The due date of the card (ISO 8601)")
            .optional("labelIds", FieldKind::StringList, "Ids of labels to attach")
    }
}

#[async_trait::async_trait]
impl ToolHandler for CreateCardTool {
    async fn call(&self, input: ToolInput) -> anyhow::Result<AdapterOutcome> {
        let card = NewCard {
            list_id: input.str("listId")?.to_string(),
            name: input.str("name")?.to_string(),
            desc: input.opt_str("description").map(str::to_string),
            due: input.opt_str("due").map(str::to_string),
            label_ids: input.str_list("labelIds"),
        };
        Ok(self.api.create_card(&card).await)
    }
}

// ============================================================================
// update-card
// ============================================================================

pub struct UpdateCardTool {
    api: Arc<dyn TrelloApi>,
}

impl UpdateCardTool {
    pub fn new(api: Arc<dyn TrelloApi>) -> Self {
        Self { api }
    }
}

impl ToolDefinition for UpdateCardTool {
    const NAME: &'static str = "update-card";
    const TITLE: &'static str = "Update Card";
    const DESCRIPTION: &'static str =
        "Update a Trello card. Only the fields provided are changed.";

    fn contract() -> InputContract {
        InputContract::new()
            .required("id", FieldKind::String, "The id of the card to update")
            .optional("name", FieldKind::String, "The new name of the card")
            .optional("description", FieldKind::String, "The new description of the card")
            .optional("due", FieldKind::String, "The new due date of the card (ISO 8601)")
            .optional("dueComplete", FieldKind::Boolean, "Whether the due date is complete")
    }
}

#[async_trait::async_trait]
impl ToolHandler for UpdateCardTool {
    async fn call(&self, input: ToolInput) -> anyhow::Result<AdapterOutcome> {
        let changes = CardChanges {
            name: input.opt_str("name").map(str::to_string),
            desc: input.opt_str("description").map(str::to_string),
            due: input.opt_str("due").map(str::to_string),
            due_complete: input.opt_bool("dueComplete"),
        };
        if changes.is_empty() {
            return Ok(AdapterOutcome::failure("no fields to update"));
        }
        Ok(self.api.update_card(input.str("id")?, &changes).await)
    }
}

// ============================================================================
// delete-card
// ============================================================================

pub struct DeleteCardTool {
    api: Arc<dyn TrelloApi>,
}

impl DeleteCardTool {
    pub fn new(api: Arc<dyn TrelloApi>) -> Self {
        Self { api }
    }
}

impl ToolDefinition for DeleteCardTool {
    const NAME: &'static str = "delete-card";
    const TITLE: &'static str = "Delete Card";
    const DESCRIPTION: &'static str = "Delete a Trello card";

    fn contract() -> InputContract {
        InputContract::new().required("id", FieldKind::String, "The id of the card to delete")
    }
}

#[async_trait::async_trait]
impl ToolHandler for DeleteCardTool {
    async fn call(&self, input: ToolInput) -> anyhow::Result<AdapterOutcome> {
        Ok(self.api.delete_card(input.str("id")?).await)
    }
}

// ============================================================================
// add-comment-to-card
// ============================================================================

pub struct AddCommentToCardTool {
    api: Arc<dyn TrelloApi>,
}

impl AddCommentToCardTool {
    pub fn new(api: Arc<dyn TrelloApi>) -> Self {
        Self { api }
    }
}

impl ToolDefinition for AddCommentToCardTool {
    const NAME: &'static str = "add-comment-to-card";
    const TITLE: &'static str = "Add Comment to Card";
    const DESCRIPTION: &'static str = "Add a comment to a Trello card";

    fn contract() -> InputContract {
        InputContract::new()
            .required("id", FieldKind::String, "The id of the card to add a comment to")
            .required("text", FieldKind::String, "The comment to add to the card")
    }
}

#[async_trait::async_trait]
impl ToolHandler for AddCommentToCardTool {
    async fn call(&self, input: ToolInput) -> anyhow::Result<AdapterOutcome> {
        let text = input.str("text")?;
        if text.is_empty() {
            return Ok(AdapterOutcome::failure("comment text must not be empty"));
        }
        Ok(self.api.add_comment_to_card(input.str("id")?, text).await)
    }
}

// ============================================================================
// add-attachment-to-card
// ============================================================================

pub struct AddAttachmentToCardTool {
    api: Arc<dyn TrelloApi>,
}

impl AddAttachmentToCardTool {
    pub fn new(api: Arc<dyn TrelloApi>) -> Self {
        Self { api }
    }
}

impl ToolDefinition for AddAttachmentToCardTool {
    const NAME: &'static str = "add-attachment-to-card";
    const TITLE: &'static str = "Add Attachment to Card";
    const DESCRIPTION: &'static str = "Attach a URL (for example an image) to a Trello card";

    fn contract() -> InputContract {
        InputContract::new()
            .required("id", FieldKind::String, "The id of the card to add an attachment to")
            .required("url", FieldKind::String, "The http(s) URL to attach")
            .optional("name", FieldKind::String, "Display name of the attachment")
    }
}

#[async_trait::async_trait]
impl ToolHandler for AddAttachmentToCardTool {
    async fn call(&self, input: ToolInput) -> anyhow::Result<AdapterOutcome> {
        let url = input.str("url")?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Ok(AdapterOutcome::failure(format!(
                "attachment url must start with http:// or https://: {url}"
            )));
        }
        Ok(self
            .api
            .add_attachment_to_card(input.str("id")?, url, input.opt_str("name"))
            .await)
    }
}

// ============================================================================
// move-card-to-list
// ============================================================================

pub struct MoveCardToListTool {
    api: Arc<dyn TrelloApi>,
}

impl MoveCardToListTool {
    pub fn new(api: Arc<dyn TrelloApi>) -> Self {
        Self { api }
    }
}

impl ToolDefinition for MoveCardToListTool {
    const NAME: &'static str = "move-card-to-list";
    const TITLE: &'static str = "Move Card to List";
    const DESCRIPTION: &'static str = "Move a Trello card to another list";

    fn contract() -> InputContract {
        InputContract::new()
            .required("id", FieldKind::String, "The id of the card to move")
            .required("listId", FieldKind::String, "The id of the list to move the card to")
    }
}

#[async_trait::async_trait]
impl ToolHandler for MoveCardToListTool {
    async fn call(&self, input: ToolInput) -> anyhow::Result<AdapterOutcome> {
        Ok(self
            .api
            .move_card_to_list(input.str("id")?, input.str("listId")?)
            .await)
    }
}
