use crate::constants::edges::CAMPAIGNS;
use crate::errors::{GraphError, ToolError};
use crate::services::graph_client::GraphClient;
use crate::services::graph_options::GraphOptions;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use crate::utils::tool_errors::unknown_tool_error;
use serde_json::Value;

pub const TOOLS: &[&str] = &["get_campaign_by_id", "get_campaigns_by_adaccount"];

#[derive(Clone)]
pub struct CampaignManager {
    validation: Validation,
    client: GraphClient,
}

impl CampaignManager {
    pub fn new(validation: Validation, client: GraphClient) -> Self {
        Self { validation, client }
    }

    pub async fn get_campaign_by_id(
        &self,
        campaign_id: &str,
        options: &GraphOptions,
    ) -> Result<Value, GraphError> {
        self.client.fetch_node(campaign_id, options).await
    }

    pub async fn get_campaigns_by_adaccount(
        &self,
        act_id: &str,
        options: &GraphOptions,
    ) -> Result<Value, GraphError> {
        self.client.fetch_edge(act_id, CAMPAIGNS, options).await
    }

    pub async fn handle_tool(&self, tool: &str, mut args: Value) -> Result<Value, ToolError> {
        match tool {
            "get_campaign_by_id" => {
                let campaign_id = self.validation.take_id(&mut args, "campaign_id")?;
                let options: GraphOptions = self.validation.parse_args(tool, args)?;
                Ok(self.get_campaign_by_id(&campaign_id, &options).await?)
            }
            "get_campaigns_by_adaccount" => {
                let act_id = self.validation.take_id(&mut args, "act_id")?;
                let options: GraphOptions = self.validation.parse_args(tool, args)?;
                Ok(self.get_campaigns_by_adaccount(&act_id, &options).await?)
            }
            _ => Err(unknown_tool_error("campaign", tool, TOOLS)),
        }
    }
}

#[async_trait::async_trait]
impl ToolHandler for CampaignManager {
    fn tools(&self) -> &'static [&'static str] {
        TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        self.handle_tool(tool, args).await
    }
}
