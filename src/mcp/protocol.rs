// src/mcp/protocol.rs

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

/// Incoming JSON-RPC request. `jsonrpc` and `id` are kept exactly as sent:
/// `None` means the member was absent, `Some(Value::Null)` an explicit null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// Reply envelope. Absent `jsonrpc` / `id` on the request stay absent here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

pub const JSONRPC_VERSION: &str = "2.0";

/// Deserialize a member that is present, keeping an explicit `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Request {
    /// No `id` member at all. `"id": null` still gets a reply.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Success envelope echoing this request's `jsonrpc` and `id`.
    pub fn reply(&self, result: Value) -> Response {
        Response::success(self.jsonrpc.clone(), self.id.clone(), result)
    }

    pub fn reply_error(&self, code: i32, message: impl Into<String>) -> Response {
        Response::error(self.jsonrpc.clone(), self.id.clone(), code, message)
    }

    pub fn reply_error_with_data(&self, code: i32, message: impl Into<String>, data: Value) -> Response {
        Response::error_with_data(self.jsonrpc.clone(), self.id.clone(), code, message, data)
    }
}

impl Response {
    pub fn success(jsonrpc: Option<String>, id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(
        jsonrpc: Option<String>,
        id: Option<Value>,
        code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            jsonrpc,
            id,
            result: None,
            error: Some(ErrorObject {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    pub fn error_with_data(
        jsonrpc: Option<String>,
        id: Option<Value>,
        code: i32,
        message: impl Into<String>,
        data: Value,
    ) -> Self {
        Self {
            jsonrpc,
            id,
            result: None,
            error: Some(ErrorObject {
                code,
                message: message.into(),
                data: Some(data),
            }),
        }
    }
}

// Standard JSON-RPC error codes
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// `params` of a `tools/call` request.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolInvocation {
    pub name: String,
    /// Absent or `null` arguments become `{}`.
    #[serde(default = "empty_arguments", deserialize_with = "arguments_or_empty")]
    pub arguments: Value,
}

fn empty_arguments() -> Value {
    json!({})
}

fn arguments_or_empty<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(if value.is_null() { empty_arguments() } else { value })
}

/// One content block of a tool result. Only text is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

/// The payload of every `tools/call` reply, successful or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
        }
    }

    /// Pretty-printed JSON, keys in insertion order.
    pub fn json(value: &Value) -> Self {
        let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        Self::text(text)
    }

    pub fn error(action: &str, message: impl std::fmt::Display) -> Self {
        Self::text(format!("Error {}: {}", action, message))
    }

    /// Text of the first content block.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|ToolContent::Text { text }| text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults() {
        let req: Request = serde_json::from_str(r#"{"method":"ping"}"#).unwrap();
        assert_eq!(req.jsonrpc, None);
        assert!(req.is_notification());
        assert!(req.params.is_none());
    }

    #[test]
    fn explicit_null_id_is_not_a_notification() {
        let req: Request =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#).unwrap();
        assert_eq!(req.id, Some(Value::Null));
        assert!(!req.is_notification());
        let out = serde_json::to_value(req.reply(json!({}))).unwrap();
        assert_eq!(out, json!({ "jsonrpc": "2.0", "id": null, "result": {} }));
    }

    #[test]
    fn reply_echoes_id_and_marker() {
        let req: Request =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":"abc","method":"ping"}"#).unwrap();
        let out = serde_json::to_value(req.reply(json!({}))).unwrap();
        assert_eq!(out, json!({ "jsonrpc": "2.0", "id": "abc", "result": {} }));
    }

    #[test]
    fn absent_marker_is_not_filled_in() {
        let req: Request = serde_json::from_str(r#"{"id":4,"method":"ping"}"#).unwrap();
        let out = serde_json::to_value(req.reply(json!({}))).unwrap();
        assert_eq!(out, json!({ "id": 4, "result": {} }));

        let req: Request = serde_json::from_str(r#"{"jsonrpc":"1.0","id":5,"method":"x"}"#).unwrap();
        let out = serde_json::to_value(req.reply_error(error_codes::METHOD_NOT_FOUND, "nope")).unwrap();
        assert_eq!(out["jsonrpc"], "1.0");
    }

    #[test]
    fn error_envelope_skips_absent_fields() {
        let out = serde_json::to_value(Response::error(
            Some(JSONRPC_VERSION.to_string()),
            Some(json!(7)),
            error_codes::METHOD_NOT_FOUND,
            "Method \"x\" not found",
        ))
        .unwrap();
        assert_eq!(
            out,
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "error": { "code": -32601, "message": "Method \"x\" not found" }
            })
        );
    }

    #[test]
    fn tool_result_wire_shape() {
        let out = serde_json::to_value(ToolResult::error("fetching balance", "boom")).unwrap();
        assert_eq!(
            out,
            json!({ "content": [{ "type": "text", "text": "Error fetching balance: boom" }] })
        );
    }

    #[test]
    fn json_results_are_pretty_printed_in_order() {
        let result = ToolResult::json(&json!({ "b": 1, "a": 2 }));
        assert_eq!(result.first_text(), Some("{\n  \"b\": 1,\n  \"a\": 2\n}"));
    }

    #[test]
    fn invocation_arguments_default_to_empty_object() {
        let call: ToolInvocation = serde_json::from_value(json!({ "name": "getGasPrice" })).unwrap();
        assert_eq!(call.arguments, json!({}));
        let call: ToolInvocation =
            serde_json::from_value(json!({ "name": "getGasPrice", "arguments": null })).unwrap();
        assert_eq!(call.arguments, json!({}));
    }
}
