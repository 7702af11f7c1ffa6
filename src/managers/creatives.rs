use crate::constants::edges::AD_CREATIVES;
use crate::errors::{GraphError, ToolError};
use crate::services::graph_client::GraphClient;
use crate::services::graph_options::GraphOptions;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use crate::utils::tool_errors::unknown_tool_error;
use serde_json::Value;

pub const TOOLS: &[&str] = &["get_ad_creative_by_id", "get_ad_creatives_by_ad_id"];

#[derive(Clone)]
pub struct CreativeManager {
    validation: Validation,
    client: GraphClient,
}

impl CreativeManager {
    pub fn new(validation: Validation, client: GraphClient) -> Self {
        Self { validation, client }
    }

    pub async fn get_ad_creative_by_id(
        &self,
        creative_id: &str,
        options: &GraphOptions,
    ) -> Result<Value, GraphError> {
        self.client.fetch_node(creative_id, options).await
    }

    pub async fn get_ad_creatives_by_ad_id(
        &self,
        ad_id: &str,
        options: &GraphOptions,
    ) -> Result<Value, GraphError> {
        self.client.fetch_edge(ad_id, AD_CREATIVES, options).await
    }

    pub async fn handle_tool(&self, tool: &str, mut args: Value) -> Result<Value, ToolError> {
        match tool {
            "get_ad_creative_by_id" => {
                let creative_id = self.validation.take_id(&mut args, "creative_id")?;
                let options: GraphOptions = self.validation.parse_args(tool, args)?;
                Ok(self.get_ad_creative_by_id(&creative_id, &options).await?)
            }
            "get_ad_creatives_by_ad_id" => {
                let ad_id = self.validation.take_id(&mut args, "ad_id")?;
                let options: GraphOptions = self.validation.parse_args(tool, args)?;
                Ok(self.get_ad_creatives_by_ad_id(&ad_id, &options).await?)
            }
            _ => Err(unknown_tool_error("creative", tool, TOOLS)),
        }
    }
}

#[async_trait::async_trait]
impl ToolHandler for CreativeManager {
    fn tools(&self) -> &'static [&'static str] {
        TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        self.handle_tool(tool, args).await
    }
}
