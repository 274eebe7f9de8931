//! Trello REST client.
//!
//! Every call resolves to an [`AdapterOutcome`]; nothing fails past this
//! boundary. Credentials travel as `key`/`token` query parameters and are kept
//! out of log lines and error messages.

use std::time::Duration;

use futures::{StreamExt, stream};
use reqwest::{Method, Url};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::api::{CardChanges, NewBoard, NewCard, TrelloApi};
use crate::core::config::TrelloConfig;
use crate::core::{Error, Result};
use crate::domains::tools::AdapterOutcome;

const MISSING_CREDENTIALS: &str =
    "Trello credentials are not configured (set TRELLO_API_KEY and TRELLO_TOKEN)";
const EMPTY_ID: &str = "Trello id must not be empty";

/// HTTP implementation of [`TrelloApi`].
#[derive(Debug, Clone)]
pub struct TrelloClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Option<(String, String)>,
    fanout_limit: usize,
}

impl TrelloClient {
    /// Build a client from configuration.
    pub fn new(config: &TrelloConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::config(format!("invalid Trello base URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "invalid Trello base URL: {} cannot carry a path",
                config.base_url
            )));
        }

        let credentials = match (&config.credentials.api_key, &config.credentials.token) {
            (Some(key), Some(token)) => Some((key.clone(), token.clone())),
            _ => None,
        };

        Ok(Self {
            http,
            base_url,
            credentials,
            fanout_limit: config.fanout_limit.max(1),
        })
    }

    /// Append `segments` to the base URL, one path segment each.
    ///
    /// Segments are percent-encoded, so an id containing `/`, `?` or `#`
    /// cannot leave its own segment. Empty and dot segments are refused.
    fn url(&self, segments: &[&str]) -> std::result::Result<Url, &'static str> {
        if segments
            .iter()
            .any(|segment| matches!(segment.trim(), "" | "." | ".."))
        {
            return Err(EMPTY_ID);
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| "Trello base URL cannot carry a path")?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, segments: &[&str]) -> AdapterOutcome {
        self.send(Method::GET, segments, &[]).await
    }

    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        params: &[(&'static str, String)],
    ) -> AdapterOutcome {
        let url = match self.url(segments) {
            Ok(url) => url,
            Err(reason) => return AdapterOutcome::failure(reason),
        };
        let Some((key, token)) = &self.credentials else {
            return AdapterOutcome::failure(MISSING_CREDENTIALS);
        };

        debug!("{} {}", method, url);

        let response = match self
            .http
            .request(method, url.clone())
            .query(&[("key", key), ("token", token)])
            .query(params)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let e = e.without_url();
                warn!("Trello request to {} failed: {}", url, e);
                if e.is_timeout() {
                    return AdapterOutcome::failure("Trello request timed out");
                }
                return AdapterOutcome::failure(format!("Trello request failed: {e}"));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return AdapterOutcome::failure(format!(
                    "Failed to read Trello response: {}",
                    e.without_url()
                ));
            }
        };

        if !status.is_success() {
            let detail = match body.trim() {
                "" => status.canonical_reason().unwrap_or("request failed"),
                text => text,
            };
            warn!("Trello responded {} for {}", status, url);
            return AdapterOutcome::failure(format!("HTTP {}: {}", status.as_u16(), detail));
        }

        if body.trim().is_empty() {
            return AdapterOutcome::Success(Value::Null);
        }

        match serde_json::from_str(&body) {
            Ok(data) => AdapterOutcome::Success(data),
            Err(e) => AdapterOutcome::failure(format!("Invalid JSON in Trello response: {e}")),
        }
    }
}

fn ids_of(items: &Value) -> Vec<String> {
    items
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("id").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait::async_trait]
impl TrelloApi for TrelloClient {
    async fn get_boards(&self) -> AdapterOutcome {
        self.get(&["members", "me", "boards"]).await
    }

    async fn get_board_by_id(&self, board_id: &str) -> AdapterOutcome {
        self.get(&["boards", board_id]).await
    }

    async fn get_board_by_name(&self, name: &str) -> AdapterOutcome {
        let boards = match self.get_boards().await {
            AdapterOutcome::Success(boards) => boards,
            failure => return failure,
        };

        boards
            .as_array()
            .and_then(|boards| {
                boards
                    .iter()
                    .find(|board| board.get("name").and_then(Value::as_str) == Some(name))
            })
            .cloned()
            .map(AdapterOutcome::Success)
            .unwrap_or_else(|| AdapterOutcome::failure(format!("Board not found: {name}")))
    }

    async fn create_board(&self, board: &NewBoard) -> AdapterOutcome {
        self.send(Method::POST, &["boards"], &board.params()).await
    }

    async fn get_lists_by_board_id(&self, board_id: &str) -> AdapterOutcome {
        self.get(&["boards", board_id, "lists"]).await
    }

    #[instrument(skip(self))]
    async fn get_cards_by_board_id(&self, board_id: &str) -> AdapterOutcome {
        let lists = match self.get_lists_by_board_id(board_id).await {
            AdapterOutcome::Success(lists) => lists,
            failure => return failure,
        };
        let list_ids = ids_of(&lists);
        debug!(
            "Fetching cards of {} lists (at most {} at a time)",
            list_ids.len(),
            self.fanout_limit
        );

        let outcomes: Vec<AdapterOutcome> = stream::iter(list_ids)
            .map(|list_id| async move { self.get_cards_by_list_id(&list_id).await })
            .buffered(self.fanout_limit)
            .collect()
            .await;

        let mut cards = Vec::new();
        for outcome in outcomes {
            match outcome {
                AdapterOutcome::Success(Value::Array(items)) => cards.extend(items),
                AdapterOutcome::Success(_) => {}
                failure => return failure,
            }
        }
        AdapterOutcome::Success(Value::Array(cards))
    }

    async fn get_list_by_id(&self, list_id: &str) -> AdapterOutcome {
        self.get(&["lists", list_id]).await
    }

    async fn get_cards_by_list_id(&self, list_id: &str) -> AdapterOutcome {
        self.get(&["lists", list_id, "cards"]).await
    }

    async fn create_list(&self, board_id: &str, name: &str) -> AdapterOutcome {
        let params = [("name", name.to_string()), ("idBoard", board_id.to_string())];
        self.send(Method::POST, &["lists"], &params).await
    }

    async fn update_list(&self, list_id: &str, name: &str) -> AdapterOutcome {
        let params = [("name", name.to_string())];
        self.send(Method::PUT, &["lists", list_id], &params).await
    }

    async fn delete_list(&self, list_id: &str) -> AdapterOutcome {
        self.send(Method::DELETE, &["lists", list_id], &[]).await
    }

    async fn get_card_by_id(&self, card_id: &str) -> AdapterOutcome {
        self.get(&["cards", card_id]).await
    }

    async fn create_card(&self, card: &NewCard) -> AdapterOutcome {
        self.send(Method::POST, &["cards"], &card.params()).await
    }

    async fn update_card(&self, card_id: &str, changes: &CardChanges) -> AdapterOutcome {
        self.send(Method::PUT, &["cards", card_id], &changes.params())
            .await
    }

    async fn delete_card(&self, card_id: &str) -> AdapterOutcome {
        self.send(Method::DELETE, &["cards", card_id], &[]).await
    }

    async fn add_comment_to_card(&self, card_id: &str, text: &str) -> AdapterOutcome {
        let params = [("text", text.to_string())];
        self.send(
            Method::POST,
            &["cards", card_id, "actions", "comments"],
            &params,
        )
        .await
    }

    async fn add_attachment_to_card(
        &self,
        card_id: &str,
        url: &str,
        name: Option<&str>,
    ) -> AdapterOutcome {
        let mut params = vec![("url", url.to_string())];
        if let Some(name) = name {
            params.push(("name", name.to_string()));
        }
        self.send(Method::POST, &["cards", card_id, "attachments"], &params)
            .await
    }

    async fn move_card_to_list(&self, card_id: &str, list_id: &str) -> AdapterOutcome {
        let params = [("idList", list_id.to_string())];
        self.send(Method::PUT, &["cards", card_id], &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CredentialsConfig;
    use serde_json::json;

    fn config(base_url: &str, with_credentials: bool) -> TrelloConfig {
        TrelloConfig {
            base_url: base_url.to_string(),
            request_timeout_secs: 5,
            fanout_limit: 2,
            credentials: CredentialsConfig {
                api_key: with_credentials.then(|| "k".to_string()),
                token: with_credentials.then(|| "t".to_string()),
            },
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_short_circuit() {
        let client = TrelloClient::new(&config("http://127.0.0.1:1", false)).unwrap();
        let outcome = client.get_board_by_id("b1").await;
        assert_eq!(outcome, AdapterOutcome::failure(MISSING_CREDENTIALS));
    }

    #[tokio::test]
    async fn test_connection_failure_is_an_outcome() {
        let client = TrelloClient::new(&config("http://127.0.0.1:1", true)).unwrap();
        let outcome = client.get_boards().await;
        match outcome {
            AdapterOutcome::Failure(message) => {
                assert!(message.starts_with("Trello request failed"));
                assert!(!message.contains("token=t"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_url_joining() {
        let client = TrelloClient::new(&config("https://api.trello.com/1/", true)).unwrap();
        assert_eq!(
            client.url(&["boards", "b1"]).unwrap().as_str(),
            "https://api.trello.com/1/boards/b1"
        );
        assert_eq!(
            client.url(&["cards", "../boards/B1"]).unwrap().as_str(),
            "https://api.trello.com/1/cards/..%2Fboards%2FB1"
        );
        assert_eq!(client.url(&["lists", "  "]), Err(EMPTY_ID));
        assert_eq!(client.url(&["cards", ".."]), Err(EMPTY_ID));
    }

    #[test]
    fn test_unusable_base_url_is_rejected() {
        assert!(TrelloClient::new(&config("not a url", true)).is_err());
        assert!(TrelloClient::new(&config("mailto:ops@example.com", true)).is_err());
    }

    #[tokio::test]
    async fn test_empty_id_fails_before_credentials() {
        let client = TrelloClient::new(&config("http://127.0.0.1:1", false)).unwrap();
        assert_eq!(client.get_card_by_id("").await, AdapterOutcome::failure(EMPTY_ID));
    }

    #[test]
    fn test_ids_of() {
        let lists = json!([{ "id": "l1" }, { "name": "no id" }, { "id": "l2" }]);
        assert_eq!(ids_of(&lists), vec!["l1", "l2"]);
        assert!(ids_of(&json!({ "id": "x" })).is_empty());
    }

    #[cfg(feature = "http")]
    mod against_fake_server {
        use super::*;
        use axum::{
            Json, Router,
            extract::{Path, Query},
            http::StatusCode,
            response::IntoResponse,
            routing::get,
        };
        use std::collections::HashMap;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::{Arc, Mutex};
        use std::time::Duration;

        async fn boards(Query(query): Query<HashMap<String, String>>) -> impl IntoResponse {
            if query.get("key").map(String::as_str) != Some("k")
                || query.get("token").map(String::as_str) != Some("t")
            {
                return (StatusCode::UNAUTHORIZED, "invalid key").into_response();
            }
            Json(json!([
                { "id": "b1", "name": "Roadmap", "desc": "Q1", "url": "https://trello.com/b/b1" },
                { "id": "b2", "name": "Ops", "desc": "", "url": "https://trello.com/b/b2" }
            ]))
            .into_response()
        }

        async fn board_lists(Path(id): Path<String>) -> impl IntoResponse {
            match id.as_str() {
                "b1" => Json(json!([{ "id": "l1" }, { "id": "l2" }, { "id": "l3" }])).into_response(),
                "broken" => Json(json!([{ "id": "l1" }, { "id": "gone" }])).into_response(),
                _ => (StatusCode::NOT_FOUND, "not found").into_response(),
            }
        }

        async fn list_cards(Path(id): Path<String>) -> impl IntoResponse {
            match id.as_str() {
                "l1" => Json(json!([{ "id": "c1" }, { "id": "c2" }])).into_response(),
                "l2" => Json(json!([])).into_response(),
                "l3" => Json(json!([{ "id": "c3" }])).into_response(),
                _ => (StatusCode::NOT_FOUND, "not found").into_response(),
            }
        }

        async fn garbled() -> impl IntoResponse {
            (StatusCode::OK, "<html>maintenance</html>")
        }

        async fn spawn_fake_trello() -> String {
            let app = Router::new()
                .route("/members/me/boards", get(boards))
                .route("/boards/{id}/lists", get(board_lists))
                .route("/lists/{id}/cards", get(list_cards))
                .route("/lists/garbled", get(garbled));
            spawn(app).await
        }

        async fn spawn(app: Router) -> String {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });
            format!("http://{addr}")
        }

        type Seen = Arc<Mutex<Vec<String>>>;

        async fn record(
            axum::extract::State(seen): axum::extract::State<Seen>,
            method: axum::http::Method,
            uri: axum::http::Uri,
        ) -> impl IntoResponse {
            seen.lock().unwrap().push(format!("{} {}", method, uri.path()));
            Json(json!({}))
        }

        #[tokio::test]
        async fn test_ids_stay_inside_their_path_segment() {
            let seen = Seen::default();
            let base = spawn(Router::new().fallback(record).with_state(seen.clone())).await;
            let client = TrelloClient::new(&config(&format!("{base}/1"), true)).unwrap();

            assert!(matches!(
                client.delete_card("../boards/B1").await,
                AdapterOutcome::Success(_)
            ));
            assert!(matches!(
                client.get_list_by_id("l1?fields=all#x").await,
                AdapterOutcome::Success(_)
            ));
            assert_eq!(
                client.get_board_by_id("  ").await,
                AdapterOutcome::failure(EMPTY_ID)
            );
            assert_eq!(client.delete_list("..").await, AdapterOutcome::failure(EMPTY_ID));

            assert_eq!(
                *seen.lock().unwrap(),
                vec![
                    "DELETE /1/cards/..%2Fboards%2FB1".to_string(),
                    "GET /1/lists/l1%3Ffields=all%23x".to_string(),
                ]
            );
        }

        #[derive(Default)]
        struct Gauge {
            in_flight: AtomicUsize,
            peak: AtomicUsize,
        }

        async fn five_lists() -> impl IntoResponse {
            Json(json!([
                { "id": "l1" }, { "id": "l2" }, { "id": "l3" }, { "id": "l4" }, { "id": "l5" }
            ]))
        }

        async fn slow_cards(
            axum::extract::State(gauge): axum::extract::State<Arc<Gauge>>,
            Path(id): Path<String>,
        ) -> impl IntoResponse {
            let now = gauge.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            gauge.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(30)).await;
            gauge.in_flight.fetch_sub(1, Ordering::SeqCst);
            Json(json!([{ "id": format!("card-of-{id}") }]))
        }

        #[tokio::test]
        async fn test_fan_out_respects_limit() {
            let gauge = Arc::new(Gauge::default());
            let app = Router::new()
                .route("/boards/{id}/lists", get(five_lists))
                .route("/lists/{id}/cards", get(slow_cards))
                .with_state(gauge.clone());
            let base = spawn(app).await;

            let mut cfg = config(&base, true);
            cfg.fanout_limit = 2;
            let client = TrelloClient::new(&cfg).unwrap();

            let outcome = client.get_cards_by_board_id("b1").await;
            let AdapterOutcome::Success(cards) = outcome else {
                panic!("expected cards, got {outcome:?}");
            };
            assert_eq!(
                ids_of(&cards),
                vec!["card-of-l1", "card-of-l2", "card-of-l3", "card-of-l4", "card-of-l5"]
            );

            let peak = gauge.peak.load(Ordering::SeqCst);
            assert!((1..=2).contains(&peak), "peak concurrency was {peak}");
            assert_eq!(gauge.in_flight.load(Ordering::SeqCst), 0);
        }

        #[tokio::test]
        async fn test_get_boards_sends_credentials() {
            let base = spawn_fake_trello().await;
            let client = TrelloClient::new(&config(&base, true)).unwrap();
            match client.get_boards().await {
                AdapterOutcome::Success(boards) => assert_eq!(boards.as_array().unwrap().len(), 2),
                other => panic!("expected boards, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_board_by_name() {
            let base = spawn_fake_trello().await;
            let client = TrelloClient::new(&config(&base, true)).unwrap();

            match client.get_board_by_name("Ops").await {
                AdapterOutcome::Success(board) => assert_eq!(board["id"], "b2"),
                other => panic!("expected board, got {other:?}"),
            }
            assert_eq!(
                client.get_board_by_name("Nope").await,
                AdapterOutcome::failure("Board not found: Nope")
            );
        }

        #[tokio::test]
        async fn test_cards_by_board_preserve_list_order() {
            let base = spawn_fake_trello().await;
            for fanout_limit in [1, 4] {
                let mut cfg = config(&base, true);
                cfg.fanout_limit = fanout_limit;
                let client = TrelloClient::new(&cfg).unwrap();

                let outcome = client.get_cards_by_board_id("b1").await;
                let AdapterOutcome::Success(cards) = outcome else {
                    panic!("expected cards, got {outcome:?}");
                };
                assert_eq!(ids_of(&cards), vec!["c1", "c2", "c3"]);
            }
        }

        #[tokio::test]
        async fn test_fan_out_failure_is_propagated() {
            let base = spawn_fake_trello().await;
            let client = TrelloClient::new(&config(&base, true)).unwrap();
            assert_eq!(
                client.get_cards_by_board_id("broken").await,
                AdapterOutcome::failure("HTTP 404: not found")
            );
        }

        #[tokio::test]
        async fn test_http_status_becomes_failure() {
            let base = spawn_fake_trello().await;
            let client = TrelloClient::new(&config(&base, true)).unwrap();
            assert_eq!(
                client.get_lists_by_board_id("missing").await,
                AdapterOutcome::failure("HTTP 404: not found")
            );
        }

        #[tokio::test]
        async fn test_wrong_credentials_become_failure() {
            let base = spawn_fake_trello().await;
            let mut cfg = config(&base, true);
            cfg.credentials.token = Some("wrong".into());
            let client = TrelloClient::new(&cfg).unwrap();
            assert_eq!(
                client.get_boards().await,
                AdapterOutcome::failure("HTTP 401: invalid key")
            );
        }

        #[tokio::test]
        async fn test_invalid_json_becomes_failure() {
            let base = spawn_fake_trello().await;
            let client = TrelloClient::new(&config(&base, true)).unwrap();
            let outcome = client.get(&["lists", "garbled"]).await;
            assert!(
                matches!(outcome, AdapterOutcome::Failure(ref m) if m.starts_with("Invalid JSON")),
                "{outcome:?}"
            );
        }
    }
}
