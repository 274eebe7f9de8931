//! Resource Adapter contract for the Trello REST API.

use crate::domains::tools::AdapterOutcome;

/// Fields of a board to create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBoard {
    pub name: String,
    pub desc: Option<String>,
}

/// Fields of a card to create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCard {
    pub list_id: String,
    pub name: String,
    pub desc: Option<String>,
    pub due: Option<String>,
    pub label_ids: Vec<String>,
}

/// Partial update of a card. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardChanges {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub due: Option<String>,
    pub due_complete: Option<bool>,
}

impl NewBoard {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("name", self.name.clone())];
        push_opt(&mut params, "desc", self.desc.as_ref());
        params
    }
}

impl NewCard {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("idList", self.list_id.clone()),
            ("name", self.name.clone()),
        ];
        push_opt(&mut params, "desc", self.desc.as_ref());
        push_opt(&mut params, "due", self.due.as_ref());
        if !self.label_ids.is_empty() {
            params.push(("idLabels", self.label_ids.join(",")));
        }
        params
    }
}

impl CardChanges {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_opt(&mut params, "name", self.name.as_ref());
        push_opt(&mut params, "desc", self.desc.as_ref());
        push_opt(&mut params, "due", self.due.as_ref());
        if let Some(done) = self.due_complete {
            params.push(("dueComplete", done.to_string()));
        }
        params
    }

    pub fn is_empty(&self) -> bool {
        self.params().is_empty()
    }
}

fn push_opt(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&String>) {
    if let Some(value) = value {
        params.push((key, value.clone()));
    }
}

/// One method per remote operation.
///
/// Implementations must never fail past this boundary: network, status and
/// decoding problems are all reported as [`AdapterOutcome::Failure`].
#[async_trait::async_trait]
pub trait TrelloApi: Send + Sync {
    /// Boards of the authenticated member.
    async fn get_boards(&self) -> AdapterOutcome;

    async fn get_board_by_id(&self, board_id: &str) -> AdapterOutcome;

    /// First board whose name matches exactly.
    async fn get_board_by_name(&self, name: &str) -> AdapterOutcome;

    async fn create_board(&self, board: &NewBoard) -> AdapterOutcome;

    async fn get_lists_by_board_id(&self, board_id: &str) -> AdapterOutcome;

    /// Cards of every list on the board, in list order.
    async fn get_cards_by_board_id(&self, board_id: &str) -> AdapterOutcome;

    async fn get_list_by_id(&self, list_id: &str) -> AdapterOutcome;

    async fn get_cards_by_list_id(&self, list_id: &str) -> AdapterOutcome;

    async fn create_list(&self, board_id: &str, name: &str) -> AdapterOutcome;

    async fn update_list(&self, list_id: &str, name: &str) -> AdapterOutcome;

    async fn delete_list(&self, list_id: &str) -> AdapterOutcome;

    async fn get_card_by_id(&self, card_id: &str) -> AdapterOutcome;

    async fn create_card(&self, card: &NewCard) -> AdapterOutcome;

    async fn update_card(&self, card_id: &str, changes: &CardChanges) -> AdapterOutcome;

    async fn delete_card(&self, card_id: &str) -> AdapterOutcome;

    async fn add_comment_to_card(&self, card_id: &str, text: &str) -> AdapterOutcome;

    /// Attach a remote URL to a card.
    async fn add_attachment_to_card(
        &self,
        card_id: &str,
        url: &str,
        name: Option<&str>,
    ) -> AdapterOutcome;

    async fn move_card_to_list(&self, card_id: &str, list_id: &str) -> AdapterOutcome;
}
