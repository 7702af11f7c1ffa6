use crate::constants::edges::ACTIVITIES;
use crate::errors::{GraphError, ToolError};
use crate::services::graph_client::GraphClient;
use crate::services::graph_options::GraphOptions;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use crate::utils::tool_errors::unknown_tool_error;
use serde_json::Value;

pub const TOOLS: &[&str] = &["get_activities_by_adaccount", "get_activities_by_adset"];

/// Change history for accounts and ad sets. The `activities` edge takes its
/// `time_range`/`since`/`until` window as a separately encoded group.
#[derive(Clone)]
pub struct ActivityManager {
    validation: Validation,
    client: GraphClient,
}

impl ActivityManager {
    pub fn new(validation: Validation, client: GraphClient) -> Self {
        Self { validation, client }
    }

    pub async fn get_activities_by_adaccount(
        &self,
        act_id: &str,
        options: &GraphOptions,
    ) -> Result<Value, GraphError> {
        self.client.fetch_edge(act_id, ACTIVITIES, options).await
    }

    pub async fn get_activities_by_adset(
        &self,
        adset_id: &str,
        options: &GraphOptions,
    ) -> Result<Value, GraphError> {
        self.client.fetch_edge(adset_id, ACTIVITIES, options).await
    }

    pub async fn handle_tool(&self, tool: &str, mut args: Value) -> Result<Value, ToolError> {
        match tool {
            "get_activities_by_adaccount" => {
                let act_id = self.validation.take_id(&mut args, "act_id")?;
                let options: GraphOptions = self.validation.parse_args(tool, args)?;
                Ok(self.get_activities_by_adaccount(&act_id, &options).await?)
            }
            "get_activities_by_adset" => {
                let adset_id = self.validation.take_id(&mut args, "adset_id")?;
                let options: GraphOptions = self.validation.parse_args(tool, args)?;
                Ok(self.get_activities_by_adset(&adset_id, &options).await?)
            }
            _ => Err(unknown_tool_error("activity", tool, TOOLS)),
        }
    }
}

#[async_trait::async_trait]
impl ToolHandler for ActivityManager {
    fn tools(&self) -> &'static [&'static str] {
        TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        self.handle_tool(tool, args).await
    }
}
