use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::errors::ToolError;
use crate::services::logger::Logger;
use crate::utils::tool_errors::unknown_tool_error;

use serde_json::Value;

/// A group of related tools served by one manager.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn tools(&self) -> &'static [&'static str];

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError>;
}

#[derive(Clone)]
pub struct ToolExecutor {
    logger: Logger,
    handlers: Arc<HashMap<String, Arc<dyn ToolHandler>>>,
}

impl ToolExecutor {
    pub fn new(logger: Logger, handlers: Vec<Arc<dyn ToolHandler>>) -> Self {
        let logger = logger.child("executor");
        let mut map: HashMap<String, Arc<dyn ToolHandler>> = HashMap::new();
        for handler in handlers {
            for tool in handler.tools() {
                if map.contains_key(*tool) {
                    logger.warn(
                        "duplicate tool registration ignored",
                        Some(&serde_json::json!({ "tool": tool })),
                    );
                    continue;
                }
                map.insert((*tool).to_string(), handler.clone());
            }
        }
        Self {
            logger,
            handlers: Arc::new(map),
        }
    }

    pub fn has_tool(&self, tool: &str) -> bool {
        self.handlers.contains_key(tool)
    }

    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn execute(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        let Some(handler) = self.handlers.get(tool) else {
            let names = self.tool_names();
            let known: Vec<&str> = names.iter().map(String::as_str).collect();
            return Err(unknown_tool_error("graph", tool, &known));
        };

        let call_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();
        self.logger.debug(
            "tool call",
            Some(&serde_json::json!({ "tool": tool, "call_id": call_id })),
        );

        let result = handler.handle(tool, args).await;
        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => self.logger.info(
                "tool ok",
                Some(&serde_json::json!({
                    "tool": tool,
                    "call_id": call_id,
                    "duration_ms": duration_ms,
                })),
            ),
            Err(err) => self.logger.warn(
                "tool failed",
                Some(&serde_json::json!({
                    "tool": tool,
                    "call_id": call_id,
                    "duration_ms": duration_ms,
                    "code": err.code,
                })),
            ),
        }
        result
    }
}
