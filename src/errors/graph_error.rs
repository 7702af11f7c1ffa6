use serde::Serialize;
use thiserror::Error;

/// Structured error reported by the Graph API in a non-200 response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorDetail {
    pub status: u16,
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
    pub code: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcode: Option<i64>,
}

impl ApiErrorDetail {
    /// `Facebook API Error (400): Invalid token (Type: OAuthException, Code: 190)`
    pub fn composite_message(&self) -> String {
        let mut out = format!(
            "Facebook API Error ({}): {} (Type: {}, Code: {}",
            self.status, self.message, self.error_type, self.code
        );
        if let Some(subcode) = self.subcode {
            out.push_str(&format!(", Subcode: {}", subcode));
        }
        out.push(')');
        out
    }
}

/// Every way a single Graph API call can fail. None of them are retried.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("{message}")]
    Configuration { message: String },

    #[error("Invalid Graph API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// `url` is already redacted; `source` has its URL stripped.
    #[error("Error making Graph API call to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{}", .0.composite_message())]
    Api(ApiErrorDetail),

    #[error("Graph API returned HTTP {status}")]
    HttpStatus { status: u16, body: String },

    #[error("Graph API returned a malformed JSON body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

impl GraphError {
    pub fn configuration(message: impl Into<String>) -> Self {
        GraphError::Configuration {
            message: message.into(),
        }
    }

    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        GraphError::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            GraphError::Api(detail) => Some(detail.status),
            GraphError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
