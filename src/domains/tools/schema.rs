//! Input contracts.
//!
//! A contract is a small table of field rules (name, primitive kind,
//! required flag). One generic validator interprets it for every tool, and
//! the same table is rendered as the JSON Schema published in `tools/list`.

use serde_json::{Map, Value, json};

use super::ToolError;

/// Primitive kinds a tool argument may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Boolean,
    /// An array whose elements are all strings.
    StringList,
}

impl FieldKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
            Self::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Boolean => "a boolean",
            Self::StringList => "an array of strings",
        }
    }

    fn json_schema(self, description: &str) -> Value {
        match self {
            Self::String => json!({ "type": "string", "description": description }),
            Self::Boolean => json!({ "type": "boolean", "description": description }),
            Self::StringList => json!({
                "type": "array",
                "items": { "type": "string" },
                "description": description
            }),
        }
    }
}

/// A single named field of an input contract.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub description: &'static str,
}

/// Declarative description of a tool's accepted arguments.
#[derive(Debug, Clone, Default)]
pub struct InputContract {
    fields: Vec<FieldRule>,
}

impl InputContract {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required field.
    pub fn required(self, name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        self.field(name, kind, true, description)
    }

    /// Add an optional field.
    pub fn optional(self, name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        self.field(name, kind, false, description)
    }

    fn field(
        mut self,
        name: &'static str,
        kind: FieldKind,
        required: bool,
        description: &'static str,
    ) -> Self {
        self.fields.push(FieldRule {
            name,
            kind,
            required,
            description,
        });
        self
    }

    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    /// Validate raw arguments and normalize them for a handler.
    ///
    /// Missing arguments count as an empty object. Unknown fields are dropped,
    /// optional `null`s are treated as absent, and every string (including the
    /// elements of string lists) is trimmed.
    pub fn validate(&self, raw: Option<&Value>) -> Result<ToolInput, ToolError> {
        let empty = Map::new();
        let args = match raw {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(ToolError::invalid_params("arguments must be a JSON object"));
            }
        };

        let mut values = Map::new();
        for rule in &self.fields {
            match args.get(rule.name) {
                None | Some(Value::Null) if rule.required => {
                    return Err(ToolError::invalid_params(format!(
                        "missing required field '{}'",
                        rule.name
                    )));
                }
                None | Some(Value::Null) => {}
                Some(value) if !rule.kind.matches(value) => {
                    return Err(ToolError::invalid_params(format!(
                        "field '{}' must be {}",
                        rule.name,
                        rule.kind.describe()
                    )));
                }
                Some(value) => {
                    values.insert(rule.name.to_string(), trim_strings(value));
                }
            }
        }

        Ok(ToolInput { values })
    }

    /// JSON Schema object describing this contract.
    pub fn to_json_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|rule| (rule.name.to_string(), rule.kind.json_schema(rule.description)))
            .collect();
        let required: Vec<Value> = self
            .fields
            .iter()
            .filter(|rule| rule.required)
            .map(|rule| Value::String(rule.name.to_string()))
            .collect();

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert("required".into(), Value::Array(required));
        schema
    }
}

fn trim_strings(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        Value::Array(items) => Value::Array(items.iter().map(trim_strings).collect()),
        other => other.clone(),
    }
}

/// Arguments that passed contract validation.
///
/// Accessors for required fields return an error instead of panicking: if a
/// handler asks for a field its contract does not require, that is a handler
/// defect and the dispatcher reports it as an internal error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolInput {
    values: Map<String, Value>,
}

impl ToolInput {
    /// A required string field.
    pub fn str(&self, name: &str) -> anyhow::Result<&str> {
        self.opt_str(name)
            .ok_or_else(|| anyhow::anyhow!("field '{name}' is not available as a string"))
    }

    /// An optional string field.
    pub fn opt_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    /// An optional boolean field.
    pub fn opt_bool(&self, name: &str) -> Option<bool> {
        self.values.get(name).and_then(Value::as_bool)
    }

    /// An optional string list; absent lists come back empty.
    pub fn str_list(&self, name: &str) -> Vec<String> {
        self.values
            .get(name)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_contract() -> InputContract {
        InputContract::new()
            .required("listId", FieldKind::String, "List id")
            .required("name", FieldKind::String, "Card name")
            .optional("description", FieldKind::String, "Card description")
            .optional("dueComplete", FieldKind::Boolean, "Done flag")
            .optional("labelIds", FieldKind::StringList, "Label ids")
    }

    #[test]
    fn test_valid_input_is_trimmed() {
        let raw = json!({
            "listId": "  L1 ",
            "name": "\tShip it\n",
            "labelIds": [" a ", "b  "]
        });
        let input = card_contract().validate(Some(&raw)).unwrap();
        assert_eq!(input.str("listId").unwrap(), "L1");
        assert_eq!(input.str("name").unwrap(), "Ship it");
        assert_eq!(input.str_list("labelIds"), vec!["a", "b"]);
        assert_eq!(input.opt_str("description"), None);
    }

    #[test]
    fn test_missing_required_field() {
        let raw = json!({ "listId": "L1" });
        let err = card_contract().validate(Some(&raw)).unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(ref m) if m.contains("'name'")));
    }

    #[test]
    fn test_null_required_field_is_missing() {
        let raw = json!({ "listId": "L1", "name": null });
        assert!(card_contract().validate(Some(&raw)).is_err());
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let raw = json!({ "listId": 42, "name": "x" });
        let err = card_contract().validate(Some(&raw)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid params: field 'listId' must be a string");

        let raw = json!({ "listId": "L1", "name": "x", "dueComplete": "yes" });
        assert!(card_contract().validate(Some(&raw)).is_err());

        let raw = json!({ "listId": "L1", "name": "x", "labelIds": ["a", 1] });
        assert!(card_contract().validate(Some(&raw)).is_err());
    }

    #[test]
    fn test_optional_null_is_absent() {
        let raw = json!({ "listId": "L1", "name": "x", "description": null });
        let input = card_contract().validate(Some(&raw)).unwrap();
        assert!(!input.contains("description"));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let raw = json!({ "listId": "L1", "name": "x", "color": "red" });
        let input = card_contract().validate(Some(&raw)).unwrap();
        assert!(!input.contains("color"));
    }

    #[test]
    fn test_missing_arguments_treated_as_empty() {
        let contract = InputContract::new();
        assert!(contract.validate(None).is_ok());
        assert!(card_contract().validate(None).is_err());
    }

    #[test]
    fn test_non_object_arguments_rejected() {
        let err = card_contract().validate(Some(&json!(["L1"]))).unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
    }

    #[test]
    fn test_required_accessor_on_undeclared_field() {
        let input = InputContract::new().validate(None).unwrap();
        assert!(input.str("id").is_err());
    }

    #[test]
    fn test_json_schema() {
        let schema = card_contract().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["listId", "name"]));
        assert_eq!(schema["properties"]["labelIds"]["type"], "array");
        assert_eq!(schema["properties"]["dueComplete"]["type"], "boolean");
        assert_eq!(schema["properties"]["name"]["description"], "Card name");
    }
}
