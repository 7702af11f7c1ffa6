use crate::errors::{GraphError, ToolError};
use crate::services::graph_client::GraphClient;
use crate::services::graph_options::InsightsOptions;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use crate::utils::tool_errors::unknown_tool_error;
use serde_json::Value;

pub const TOOLS: &[&str] = &[
    "get_adaccount_insights",
    "get_campaign_insights",
    "get_adset_insights",
    "get_ad_insights",
    "fetch_pagination_url",
];

/// Performance insights for accounts, campaigns, ad sets and ads, plus the
/// cursor follow-up used to page through any collection response.
#[derive(Clone)]
pub struct InsightsManager {
    validation: Validation,
    client: GraphClient,
}

impl InsightsManager {
    pub fn new(validation: Validation, client: GraphClient) -> Self {
        Self { validation, client }
    }

    pub async fn get_adaccount_insights(
        &self,
        act_id: &str,
        options: InsightsOptions,
    ) -> Result<Value, GraphError> {
        self.client.fetch_insights(act_id, &options).await
    }

    /// `level` defaults to `campaign`.
    pub async fn get_campaign_insights(
        &self,
        campaign_id: &str,
        options: InsightsOptions,
    ) -> Result<Value, GraphError> {
        self.client
            .fetch_insights(campaign_id, &options.with_default_level("campaign"))
            .await
    }

    /// `level` defaults to `adset`.
    pub async fn get_adset_insights(
        &self,
        adset_id: &str,
        options: InsightsOptions,
    ) -> Result<Value, GraphError> {
        self.client
            .fetch_insights(adset_id, &options.with_default_level("adset"))
            .await
    }

    /// `level` defaults to `ad`.
    pub async fn get_ad_insights(
        &self,
        ad_id: &str,
        options: InsightsOptions,
    ) -> Result<Value, GraphError> {
        self.client
            .fetch_insights(ad_id, &options.with_default_level("ad"))
            .await
    }

    /// GETs a `paging.next`/`paging.previous` URL exactly as returned.
    pub async fn fetch_pagination_url(&self, url: &str) -> Result<Value, GraphError> {
        self.client.get_url(url).await
    }

    pub async fn handle_tool(&self, tool: &str, mut args: Value) -> Result<Value, ToolError> {
        let id_key = match tool {
            "get_adaccount_insights" => "act_id",
            "get_campaign_insights" => "campaign_id",
            "get_adset_insights" => "adset_id",
            "get_ad_insights" => "ad_id",
            "fetch_pagination_url" => {
                let url = self.validation.take_id(&mut args, "url")?;
                return Ok(self.fetch_pagination_url(&url).await?);
            }
            _ => return Err(unknown_tool_error("insights", tool, TOOLS)),
        };
        let node_id = self.validation.take_id(&mut args, id_key)?;
        let options: InsightsOptions = self.validation.parse_args(tool, args)?;
        let result = match tool {
            "get_campaign_insights" => self.get_campaign_insights(&node_id, options).await,
            "get_adset_insights" => self.get_adset_insights(&node_id, options).await,
            "get_ad_insights" => self.get_ad_insights(&node_id, options).await,
            _ => self.get_adaccount_insights(&node_id, options).await,
        };
        Ok(result?)
    }
}

#[async_trait::async_trait]
impl ToolHandler for InsightsManager {
    fn tools(&self) -> &'static [&'static str] {
        TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        self.handle_tool(tool, args).await
    }
}
