//! Scripted [`TrelloApi`] used by tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::{Value, json};

use crate::domains::tools::AdapterOutcome;
use crate::domains::trello::{CardChanges, NewBoard, NewCard, TrelloApi};

/// Records every adapter call and answers with a scripted outcome.
///
/// Unless scripted otherwise, every call succeeds with
/// `{"op": <operation>, "id": <first argument>}`.
pub struct FakeTrello {
    calls: Mutex<Vec<(String, Vec<String>)>>,
    outcome: Mutex<Option<AdapterOutcome>>,
    delays: Mutex<HashMap<String, Duration>>,
}

impl FakeTrello {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: Mutex::new(None),
            delays: Mutex::new(HashMap::new()),
        }
    }

    /// Answer every call with `data`.
    pub fn respond_with(&self, data: Value) {
        *self.outcome.lock().unwrap() = Some(AdapterOutcome::Success(data));
    }

    /// Fail every call with `message`.
    pub fn fail_with(&self, message: &str) {
        *self.outcome.lock().unwrap() = Some(AdapterOutcome::failure(message));
    }

    /// Delay calls whose first argument is `id`.
    pub fn delay(&self, id: &str, by: Duration) {
        self.delays.lock().unwrap().insert(id.to_string(), by);
    }

    /// Calls made so far, as (operation, arguments).
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, op: &str, args: &[&str]) -> AdapterOutcome {
        self.calls.lock().unwrap().push((
            op.to_string(),
            args.iter().map(|a| a.to_string()).collect(),
        ));

        let delay = args
            .first()
            .and_then(|id| self.delays.lock().unwrap().get(*id).copied());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self.outcome.lock().unwrap().clone();
        scripted.unwrap_or_else(|| {
            AdapterOutcome::Success(json!({ "op": op, "id": args.first().copied() }))
        })
    }
}

#[async_trait::async_trait]
impl TrelloApi for FakeTrello {
    async fn get_boards(&self) -> AdapterOutcome {
        self.record("get_boards", &[]).await
    }

    async fn get_board_by_id(&self, board_id: &str) -> AdapterOutcome {
        self.record("get_board_by_id", &[board_id]).await
    }

    async fn get_board_by_name(&self, name: &str) -> AdapterOutcome {
        self.record("get_board_by_name", &[name]).await
    }

    async fn create_board(&self, board: &NewBoard) -> AdapterOutcome {
        let desc = board.desc.as_deref().unwrap_or_default();
        self.record("create_board", &[&board.name, desc]).await
    }

    async fn get_lists_by_board_id(&self, board_id: &str) -> AdapterOutcome {
        self.record("get_lists_by_board_id", &[board_id]).await
    }

    async fn get_cards_by_board_id(&self, board_id: &str) -> AdapterOutcome {
        self.record("get_cards_by_board_id", &[board_id]).await
    }

    async fn get_list_by_id(&self, list_id: &str) -> AdapterOutcome {
        self.record("get_list_by_id", &[list_id]).await
    }

    async fn get_cards_by_list_id(&self, list_id: &str) -> AdapterOutcome {
        self.record("get_cards_by_list_id", &[list_id]).await
    }

    async fn create_list(&self, board_id: &str, name: &str) -> AdapterOutcome {
        self.record("create_list", &[board_id, name]).await
    }

    async fn update_list(&self, list_id: &str, name: &str) -> AdapterOutcome {
        self.record("update_list", &[list_id, name]).await
    }

    async fn delete_list(&self, list_id: &str) -> AdapterOutcome {
        self.record("delete_list", &[list_id]).await
    }

    async fn get_card_by_id(&self, card_id: &str) -> AdapterOutcome {
        self.record("get_card_by_id", &[card_id]).await
    }

    async fn create_card(&self, card: &NewCard) -> AdapterOutcome {
        let labels = card.label_ids.join(",");
        self.record(
            "create_card",
            &[
                &card.list_id,
                &card.name,
                card.desc.as_deref().unwrap_or_default(),
                card.due.as_deref().unwrap_or_default(),
                &labels,
            ],
        )
        .await
    }

    async fn update_card(&self, card_id: &str, changes: &CardChanges) -> AdapterOutcome {
        let params: Vec<String> = changes
            .params()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        let mut args = vec![card_id];
        args.extend(params.iter().map(String::as_str));
        self.record("update_card", &args).await
    }

    async fn delete_card(&self, card_id: &str) -> AdapterOutcome {
        self.record("delete_card", &[card_id]).await
    }

    async fn add_comment_to_card(&self, card_id: &str, text: &str) -> AdapterOutcome {
        self.record("add_comment_to_card", &[card_id, text]).await
    }

    async fn add_attachment_to_card(
        &self,
        card_id: &str,
        url: &str,
        name: Option<&str>,
    ) -> AdapterOutcome {
        self.record(
            "add_attachment_to_card",
            &[card_id, url, name.unwrap_or_default()],
        )
        .await
    }

    async fn move_card_to_list(&self, card_id: &str, list_id: &str) -> AdapterOutcome {
        self.record("move_card_to_list", &[card_id, list_id]).await
    }
}
