use crate::constants::limits::ERROR_BODY_PREVIEW_BYTES;
use crate::errors::GraphError;
use crate::utils::redact::redact_body;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    InvalidParams,
    Configuration,
    Transport,
    Timeout,
    Upstream,
    Internal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            hint: None,
            details: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidParams, "INVALID_PARAMS", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Internal, "INTERNAL", message)
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ToolError {}

impl From<std::io::Error> for ToolError {
    fn from(err: std::io::Error) -> Self {
        ToolError::internal(err.to_string())
    }
}

impl From<GraphError> for ToolError {
    fn from(err: GraphError) -> Self {
        let message = err.to_string();
        match err {
            GraphError::Configuration { .. } => {
                ToolError::new(ToolErrorKind::Configuration, "CONFIGURATION_ERROR", message)
                    .with_hint("Pass --fb-token <TOKEN>, set FB_ACCESS_TOKEN, or add FB_ACCESS_TOKEN=<TOKEN> to .env.")
            }
            GraphError::InvalidUrl { .. } => ToolError::invalid_params(message),
            GraphError::Transport { ref source, ref url } => {
                let kind = if source.is_timeout() {
                    ToolErrorKind::Timeout
                } else {
                    ToolErrorKind::Transport
                };
                ToolError::new(kind, "TRANSPORT_ERROR", message)
                    .with_details(serde_json::json!({ "url": url }))
            }
            GraphError::Api(detail) => ToolError::new(ToolErrorKind::Upstream, "API_ERROR", message)
                .with_details(serde_json::json!({
                    "status": detail.status,
                    "message": detail.message,
                    "type": detail.error_type,
                    "code": detail.code,
                    "error_subcode": detail.subcode,
                })),
            GraphError::HttpStatus { status, ref body } => {
                ToolError::new(ToolErrorKind::Upstream, "HTTP_STATUS_ERROR", message)
                    .with_details(serde_json::json!({
                        "status": status,
                        "body": redact_body(body, ERROR_BODY_PREVIEW_BYTES),
                    }))
            }
            GraphError::Decode { .. } => {
                ToolError::new(ToolErrorKind::Upstream, "DECODE_ERROR", message)
            }
        }
    }
}
