use crate::constants::edges::ADS;
use crate::errors::{GraphError, ToolError};
use crate::services::graph_client::GraphClient;
use crate::services::graph_options::{GraphOptions, ListOrText};
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use crate::utils::tool_errors::unknown_tool_error;
use serde_json::Value;

pub const TOOLS: &[&str] = &[
    "get_ad_by_id",
    "get_ads_by_adaccount",
    "get_ads_by_campaign",
    "get_ads_by_adset",
];

#[derive(Clone)]
pub struct AdManager {
    validation: Validation,
    client: GraphClient,
}

impl AdManager {
    pub fn new(validation: Validation, client: GraphClient) -> Self {
        Self { validation, client }
    }

    pub async fn get_ad_by_id(
        &self,
        ad_id: &str,
        fields: Option<ListOrText>,
    ) -> Result<Value, GraphError> {
        self.client
            .fetch_node(ad_id, &GraphOptions::with_fields(fields))
            .await
    }

    pub async fn get_ads_by_adaccount(
        &self,
        act_id: &str,
        options: &GraphOptions,
    ) -> Result<Value, GraphError> {
        self.client.fetch_edge(act_id, ADS, options).await
    }

    pub async fn get_ads_by_campaign(
        &self,
        campaign_id: &str,
        options: &GraphOptions,
    ) -> Result<Value, GraphError> {
        self.client.fetch_edge(campaign_id, ADS, options).await
    }

    pub async fn get_ads_by_adset(
        &self,
        adset_id: &str,
        options: &GraphOptions,
    ) -> Result<Value, GraphError> {
        self.client.fetch_edge(adset_id, ADS, options).await
    }

    pub async fn handle_tool(&self, tool: &str, mut args: Value) -> Result<Value, ToolError> {
        let id_key = match tool {
            "get_ad_by_id" => "ad_id",
            "get_ads_by_adaccount" => "act_id",
            "get_ads_by_campaign" => "campaign_id",
            "get_ads_by_adset" => "adset_id",
            _ => return Err(unknown_tool_error("ads", tool, TOOLS)),
        };
        let node_id = self.validation.take_id(&mut args, id_key)?;
        let options: GraphOptions = self.validation.parse_args(tool, args)?;
        let result = match tool {
            "get_ad_by_id" => self.get_ad_by_id(&node_id, options.fields).await,
            "get_ads_by_campaign" => self.get_ads_by_campaign(&node_id, &options).await,
            "get_ads_by_adset" => self.get_ads_by_adset(&node_id, &options).await,
            _ => self.get_ads_by_adaccount(&node_id, &options).await,
        };
        Ok(result?)
    }
}

#[async_trait::async_trait]
impl ToolHandler for AdManager {
    fn tools(&self) -> &'static [&'static str] {
        TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        self.handle_tool(tool, args).await
    }
}
