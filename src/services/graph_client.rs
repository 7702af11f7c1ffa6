use crate::config::GraphConfig;
use crate::constants::graph::ALLOWED_SCHEMES;
use crate::constants::limits::ERROR_BODY_PREVIEW_BYTES;
use crate::errors::{ApiErrorDetail, GraphError};
use crate::services::credentials::CredentialResolver;
use crate::services::graph_options::{GraphOptions, InsightsOptions};
use crate::services::logger::{LogLevel, Logger};
use crate::services::query_encoder::{
    base_params, build_edge_params, build_insights_params, QueryParams,
};
use crate::utils::redact::{redact_body, redact_credentials};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Issues GETs against the Graph API and normalizes every outcome into
/// either the decoded JSON body or a [`GraphError`].
#[derive(Clone)]
pub struct GraphClient {
    logger: Logger,
    config: GraphConfig,
    credentials: Arc<CredentialResolver>,
    http: Client,
}

impl GraphClient {
    pub fn new(
        logger: Logger,
        config: GraphConfig,
        credentials: Arc<CredentialResolver>,
    ) -> Result<Self, GraphError> {
        let mut builder = Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let http = builder.build().map_err(|err| GraphError::Transport {
            url: config.base_url.clone(),
            source: err.without_url(),
        })?;
        Ok(Self {
            logger: logger.child("graph"),
            config,
            credentials,
            http,
        })
    }

    /// `<base>/<path>`; an empty path addresses the API root (`<base>/`).
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    /// Fresh parameter map holding only the access token.
    pub fn authenticated_params(&self) -> Result<QueryParams, GraphError> {
        Ok(base_params(self.credentials.resolve()?))
    }

    pub async fn get(&self, path: &str, params: &QueryParams) -> Result<Value, GraphError> {
        let url = self.endpoint_url(path);
        if self.logger.enabled(LogLevel::Debug) {
            let query = serde_urlencoded::to_string(params).unwrap_or_default();
            self.logger.debug(
                "GET",
                Some(&serde_json::json!({ "url": url, "query": query })),
            );
        }
        let started = Instant::now();
        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|err| self.transport_error(&url, err))?;
        self.read_response(&url, response, started).await
    }

    /// Follows a `paging.next`/`paging.previous` URL verbatim. Nothing is added
    /// to the query; the cursor URL already carries the token.
    pub async fn get_url(&self, raw_url: &str) -> Result<Value, GraphError> {
        let url = parse_http_url(raw_url)?;
        let display = url.to_string();
        self.logger.debug(
            "GET (cursor)",
            Some(&serde_json::json!({ "url": display })),
        );
        let started = Instant::now();
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| self.transport_error(&display, err))?;
        self.read_response(&display, response, started).await
    }

    pub async fn fetch_node(
        &self,
        node_id: &str,
        options: &GraphOptions,
    ) -> Result<Value, GraphError> {
        let params = build_edge_params(self.authenticated_params()?, None, options);
        self.get(node_id, &params).await
    }

    pub async fn fetch_edge(
        &self,
        parent_id: &str,
        edge: &str,
        options: &GraphOptions,
    ) -> Result<Value, GraphError> {
        let params = build_edge_params(self.authenticated_params()?, Some(edge), options);
        self.get(&format!("{}/{}", parent_id, edge), &params).await
    }

    pub async fn fetch_insights(
        &self,
        node_id: &str,
        options: &InsightsOptions,
    ) -> Result<Value, GraphError> {
        let params = build_insights_params(self.authenticated_params()?, options);
        self.get(
            &format!("{}/{}", node_id, crate::constants::edges::INSIGHTS),
            &params,
        )
        .await
    }

    async fn read_response(
        &self,
        url: &str,
        response: Response,
        started: Instant,
    ) -> Result<Value, GraphError> {
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.transport_error(url, err))?;
        self.logger.debug(
            "response",
            Some(&serde_json::json!({
                "url": url,
                "status": status,
                "bytes": body.len(),
                "duration_ms": started.elapsed().as_millis() as u64,
            })),
        );
        interpret_response(&self.logger, status, &body)
    }

    fn transport_error(&self, url: &str, err: reqwest::Error) -> GraphError {
        let url = redact_credentials(url);
        let err = GraphError::Transport {
            url,
            source: err.without_url(),
        };
        self.logger.error(&err.to_string(), None);
        err
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: RawApiError,
}

#[derive(Debug, Deserialize)]
struct RawApiError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
    code: i64,
    #[serde(default)]
    error_subcode: Option<Value>,
}

/// Extracts the Graph `{"error": {...}}` shape, if the body has one.
pub fn parse_api_error(status: u16, body: &[u8]) -> Option<ApiErrorDetail> {
    let envelope: ErrorEnvelope = serde_json::from_slice(body).ok()?;
    let raw = envelope.error;
    let subcode = raw.error_subcode.as_ref().and_then(|v| {
        v.as_i64()
            .or_else(|| v.as_str().and_then(|s| s.trim().parse::<i64>().ok()))
    });
    Some(ApiErrorDetail {
        status,
        message: raw.message.unwrap_or_else(|| "Unknown error".to_string()),
        error_type: raw.error_type.unwrap_or_else(|| "UnknownType".to_string()),
        code: raw.code,
        subcode,
    })
}

/// Maps a status and raw body to the call outcome. Diagnostics for failures
/// are written before the error is returned.
pub fn interpret_response(
    logger: &Logger,
    status: u16,
    body: &[u8],
) -> Result<Value, GraphError> {
    if status == 200 {
        return serde_json::from_slice(body).map_err(|source| {
            logger.error(
                "Graph API returned 200 with a non-JSON body",
                Some(&serde_json::json!({
                    "body": redact_body(&String::from_utf8_lossy(body), ERROR_BODY_PREVIEW_BYTES),
                })),
            );
            GraphError::Decode { source }
        });
    }

    if let Some(detail) = parse_api_error(status, body) {
        let err = GraphError::Api(detail);
        logger.error(&err.to_string(), None);
        return Err(err);
    }

    let text = String::from_utf8_lossy(body).into_owned();
    logger.error(
        &format!(
            "FB API Error Body: {}",
            redact_body(&text, ERROR_BODY_PREVIEW_BYTES)
        ),
        Some(&serde_json::json!({ "status": status })),
    );
    Err(GraphError::HttpStatus { status, body: text })
}

fn parse_http_url(raw: &str) -> Result<Url, GraphError> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed)
        .map_err(|err| GraphError::invalid_url(redact_credentials(trimmed), err.to_string()))?;
    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(GraphError::invalid_url(
            redact_credentials(trimmed),
            "only http/https URLs are supported",
        ));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> Logger {
        Logger::new("test").with_level(LogLevel::Error)
    }

    #[test]
    fn ok_body_is_returned_verbatim() {
        let value = interpret_response(&quiet(), 200, br#"{"data": []}"#).expect("ok");
        assert_eq!(value, serde_json::json!({"data": []}));
    }

    #[test]
    fn malformed_ok_body_is_a_decode_error() {
        let err = interpret_response(&quiet(), 200, b"<html>").expect_err("decode");
        assert!(matches!(err, GraphError::Decode { .. }));
    }

    #[test]
    fn structured_error_body_becomes_api_error() {
        let body = br#"{"error":{"message":"Invalid token","type":"OAuthException","code":190}}"#;
        let err = interpret_response(&quiet(), 400, body).expect_err("api error");
        match err {
            GraphError::Api(detail) => {
                assert_eq!(detail.status, 400);
                assert_eq!(detail.message, "Invalid token");
                assert_eq!(detail.error_type, "OAuthException");
                assert_eq!(detail.code, 190);
                assert_eq!(detail.subcode, None);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn subcode_is_captured_when_present() {
        let body = br#"{"error":{"message":"Session expired","type":"OAuthException","code":190,"error_subcode":463}}"#;
        let detail = parse_api_error(401, body).expect("detail");
        assert_eq!(detail.subcode, Some(463));
    }

    #[test]
    fn unstructured_error_body_becomes_http_status_error() {
        let err = interpret_response(&quiet(), 502, b"Bad Gateway").expect_err("status");
        match err {
            GraphError::HttpStatus { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "Bad Gateway");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn error_object_without_numeric_code_is_not_structured() {
        let body = br#"{"error":{"message":"oops","code":"UnknownCode"}}"#;
        assert!(parse_api_error(500, body).is_none());
        let body = br#"{"error":"flat string"}"#;
        assert!(parse_api_error(500, body).is_none());
    }

    #[test]
    fn non_200_success_codes_are_not_treated_as_success() {
        let err = interpret_response(&quiet(), 204, b"").expect_err("status");
        assert_eq!(err.status(), Some(204));
    }

    #[test]
    fn cursor_urls_must_be_http() {
        assert!(parse_http_url("https://graph.facebook.com/v22.0/act_1/ads?after=x").is_ok());
        assert!(matches!(
            parse_http_url("file:///etc/passwd"),
            Err(GraphError::InvalidUrl { .. })
        ));
        assert!(matches!(
            parse_http_url("not a url"),
            Err(GraphError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn endpoint_url_joins_base_and_path() {
        let client = GraphClient::new(
            quiet(),
            GraphConfig::new("http://127.0.0.1:1/v22.0"),
            Arc::new(CredentialResolver::fixed(quiet(), "tok")),
        )
        .expect("client");
        assert_eq!(client.endpoint_url("act_1/ads"), "http://127.0.0.1:1/v22.0/act_1/ads");
        assert_eq!(client.endpoint_url(""), "http://127.0.0.1:1/v22.0/");
        let params = client.authenticated_params().expect("params");
        assert_eq!(params.get("access_token").map(String::as_str), Some("tok"));
    }
}
