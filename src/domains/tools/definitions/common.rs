//! Helpers shared by the Trello tool definitions.

use serde_json::{Value, json};

/// Project a Trello record onto `{id, name, description, url}`.
///
/// Missing fields come back as `null`; `description` is read from Trello's
/// `desc` field.
pub fn summary(record: &Value) -> Value {
    json!({
        "id": record.get("id").cloned().unwrap_or(Value::Null),
        "name": record.get("name").cloned().unwrap_or(Value::Null),
        "description": record.get("desc").cloned().unwrap_or(Value::Null),
        "url": record.get("url").cloned().unwrap_or(Value::Null),
    })
}

/// Apply [`summary`] to every element of an array payload.
///
/// Non-array payloads are summarized as a single record.
pub fn summarize_all(data: Value) -> Value {
    match data {
        Value::Array(items) => Value::Array(items.iter().map(summary).collect()),
        other => summary(&other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_projects_fields() {
        let board = json!({
            "id": "b1",
            "name": "Roadmap",
            "desc": "Q1 goals",
            "url": "https://trello.com/b/b1",
            "closed": false,
            "prefs": {}
        });
        assert_eq!(
            summary(&board),
            json!({
                "id": "b1",
                "name": "Roadmap",
                "description": "Q1 goals",
                "url": "https://trello.com/b/b1"
            })
        );
    }

    #[test]
    fn test_summarize_all() {
        let cards = json!([{ "id": "c1", "name": "A" }, { "id": "c2", "desc": "d" }]);
        let projected = summarize_all(cards);
        assert_eq!(projected[0]["name"], "A");
        assert_eq!(projected[0]["description"], Value::Null);
        assert_eq!(projected[1]["description"], "d");
    }
}
