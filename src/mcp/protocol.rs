use crate::errors::McpError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    /// `None` only when the member is absent; an explicit `null` id is kept.
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

fn present_id<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError { code, message }),
        }
    }

    pub fn from_error(id: Value, err: McpError) -> Self {
        Self::failure(id, err.code.as_i32(), err.message)
    }
}

/// `tools/call` params.
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// Wraps a tool's JSON body as a single MCP text content block.
pub fn text_content(body: &Value) -> Value {
    let text = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());
    serde_json::json!({
        "content": [ { "type": "text", "text": text } ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_rpc_request_allows_missing_id_for_notifications() {
        let raw = r#"{"jsonrpc":"2.0","method":"notifications/initialized","params":{}}"#;
        let parsed: JsonRpcRequest = serde_json::from_str(raw).expect("must parse");
        assert!(parsed.id.is_none());
        assert_eq!(parsed.method, "notifications/initialized");
    }

    #[test]
    fn explicit_null_id_is_not_a_notification() {
        let raw = r#"{"jsonrpc":"2.0","id":null,"method":"tools/list"}"#;
        let parsed: JsonRpcRequest = serde_json::from_str(raw).expect("must parse");
        assert_eq!(parsed.id, Some(Value::Null));
    }

    #[test]
    fn tool_call_params_default_missing_arguments_to_null() {
        let params: ToolCallParams =
            serde_json::from_value(serde_json::json!({"name": "list_ad_accounts"}))
                .expect("must parse");
        assert_eq!(params.name, "list_ad_accounts");
        assert!(params.arguments.is_null());
    }

    #[test]
    fn text_content_embeds_body_as_json_text() {
        let wrapped = text_content(&serde_json::json!({"data": []}));
        assert_eq!(wrapped["content"][0]["type"], "text");
        assert_eq!(wrapped["content"][0]["text"], r#"{"data":[]}"#);
    }
}
