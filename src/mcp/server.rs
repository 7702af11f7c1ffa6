use crate::app::App;
use crate::cli::Cli;
use crate::errors::{ErrorCode, McpError, ToolError};
use crate::mcp::catalog::{list_tools, validate_tool_args};
use crate::mcp::protocol::{text_content, JsonRpcRequest, JsonRpcResponse, ToolCallParams};
use crate::services::logger::Logger;
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

const PROTOCOL_VERSION: &str = "2025-06-18";
const SERVER_NAME: &str = "fb-ads-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct McpServer {
    app: Arc<App>,
    logger: Logger,
}

impl McpServer {
    pub fn new(app: App) -> Self {
        let logger = app.logger.child("mcp");
        Self {
            app: Arc::new(app),
            logger,
        }
    }

    pub fn from_cli(cli: &Cli) -> Result<Self, ToolError> {
        let app = App::initialize(cli.logger(), cli.graph_config(), cli.credential_sources())?;
        Ok(Self::new(app))
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    fn handle_initialize(&self) -> Value {
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {"tools": {"listChanged": false}},
            "serverInfo": {"name": SERVER_NAME, "version": SERVER_VERSION},
        })
    }

    fn handle_tools_list(&self) -> Value {
        serde_json::json!({ "tools": list_tools() })
    }

    async fn handle_tools_call(&self, params: Value) -> Result<Value, McpError> {
        let call: ToolCallParams = serde_json::from_value(params)
            .map_err(|err| McpError::new(ErrorCode::InvalidParams, err.to_string()))?;
        if call.name.is_empty() {
            return Err(McpError::new(ErrorCode::InvalidParams, "Missing tool name"));
        }
        let args = if call.arguments.is_null() {
            Value::Object(Default::default())
        } else {
            call.arguments
        };
        validate_tool_args(&call.name, &args)?;

        let body = self
            .app
            .tool_executor
            .execute(&call.name, args)
            .await
            .map_err(|err| McpError::from_tool_error(&call.name, &err))?;
        Ok(text_content(&body))
    }

    /// Dispatches one request. Notifications (no `id` member) never get a response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != "2.0" {
            return request.id.map(|id| {
                JsonRpcResponse::failure(
                    id,
                    ErrorCode::InvalidRequest.as_i32(),
                    "Invalid request: jsonrpc must be \"2.0\"".to_string(),
                )
            });
        }
        let id = match request.id {
            Some(id) => id,
            None => {
                if !request.method.starts_with("notifications/") {
                    self.logger.debug(
                        "ignoring request without id",
                        Some(&serde_json::json!({ "method": request.method })),
                    );
                }
                return None;
            }
        };

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, self.handle_initialize()),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => JsonRpcResponse::success(id, self.handle_tools_list()),
            "tools/call" => match self.handle_tools_call(request.params).await {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(err) => JsonRpcResponse::from_error(id, err),
            },
            method if method.starts_with("notifications/") => {
                JsonRpcResponse::success(id, serde_json::json!({}))
            }
            _ => JsonRpcResponse::failure(
                id,
                ErrorCode::MethodNotFound.as_i32(),
                "Method not found".to_string(),
            ),
        };
        Some(response)
    }

    /// One newline-delimited frame in, at most one frame out.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        let parsed: Value = match serde_json::from_str(trimmed) {
            Ok(value) => value,
            Err(_) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    ErrorCode::ParseError.as_i32(),
                    "Parse error".to_string(),
                ));
            }
        };
        let id = parsed.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(parsed) {
            Ok(request) => self.handle_request(request).await,
            Err(_) => Some(JsonRpcResponse::failure(
                id,
                ErrorCode::InvalidRequest.as_i32(),
                "Invalid request".to_string(),
            )),
        }
    }

    pub async fn run_stdio(&self) -> Result<(), ToolError> {
        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();
        let mut reader = BufReader::new(stdin).lines();
        let mut writer = BufWriter::new(stdout);

        self.logger.info(
            "serving on stdio",
            Some(&serde_json::json!({
                "version": SERVER_VERSION,
                "graph_url": self.app.config.base_url,
            })),
        );

        while let Some(line) = reader
            .next_line()
            .await
            .map_err(|err| ToolError::internal(err.to_string()))?
        {
            if let Some(response) = self.handle_line(&line).await {
                let payload = serde_json::to_string(&response).unwrap_or_default();
                writer.write_all(payload.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        self.logger.info("stdin closed, shutting down", None);
        Ok(())
    }
}

pub async fn run_stdio(cli: Cli) -> Result<(), ToolError> {
    let server = McpServer::from_cli(&cli)?;
    server.app().warm_credentials();
    server.run_stdio().await
}
