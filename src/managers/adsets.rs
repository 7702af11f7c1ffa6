use crate::constants::edges::ADSETS;
use crate::errors::{GraphError, ToolError};
use crate::services::graph_client::GraphClient;
use crate::services::graph_options::{GraphOptions, ListOrText};
use crate::services::query_encoder::build_edge_params;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use crate::utils::tool_errors::unknown_tool_error;
use serde_json::Value;

pub const TOOLS: &[&str] = &[
    "get_adset_by_id",
    "get_adsets_by_ids",
    "get_adsets_by_adaccount",
    "get_adsets_by_campaign",
];

#[derive(Clone)]
pub struct AdSetManager {
    validation: Validation,
    client: GraphClient,
}

impl AdSetManager {
    pub fn new(validation: Validation, client: GraphClient) -> Self {
        Self { validation, client }
    }

    pub async fn get_adset_by_id(
        &self,
        adset_id: &str,
        fields: Option<ListOrText>,
    ) -> Result<Value, GraphError> {
        self.client
            .fetch_node(adset_id, &GraphOptions::with_fields(fields))
            .await
    }

    /// Multi-node lookup against the API root with `ids=a,b,c`. The response
    /// is keyed by ad set id.
    pub async fn get_adsets_by_ids(
        &self,
        adset_ids: &[String],
        options: &GraphOptions,
    ) -> Result<Value, GraphError> {
        let mut params = build_edge_params(self.client.authenticated_params()?, None, options);
        params.insert("ids".to_string(), adset_ids.join(","));
        self.client.get("", &params).await
    }

    pub async fn get_adsets_by_adaccount(
        &self,
        act_id: &str,
        options: &GraphOptions,
    ) -> Result<Value, GraphError> {
        self.client.fetch_edge(act_id, ADSETS, options).await
    }

    pub async fn get_adsets_by_campaign(
        &self,
        campaign_id: &str,
        options: &GraphOptions,
    ) -> Result<Value, GraphError> {
        self.client.fetch_edge(campaign_id, ADSETS, options).await
    }

    pub async fn handle_tool(&self, tool: &str, mut args: Value) -> Result<Value, ToolError> {
        if tool == "get_adsets_by_ids" {
            let ids = self.validation.take_id_list(&mut args, "adset_ids")?;
            let options: GraphOptions = self.validation.parse_args(tool, args)?;
            return Ok(self.get_adsets_by_ids(&ids, &options).await?);
        }
        let id_key = match tool {
            "get_adset_by_id" => "adset_id",
            "get_adsets_by_adaccount" => "act_id",
            "get_adsets_by_campaign" => "campaign_id",
            _ => return Err(unknown_tool_error("ad set", tool, TOOLS)),
        };
        let node_id = self.validation.take_id(&mut args, id_key)?;
        let options: GraphOptions = self.validation.parse_args(tool, args)?;
        let result = match tool {
            "get_adset_by_id" => self.get_adset_by_id(&node_id, options.fields).await,
            "get_adsets_by_campaign" => self.get_adsets_by_campaign(&node_id, &options).await,
            _ => self.get_adsets_by_adaccount(&node_id, &options).await,
        };
        Ok(result?)
    }
}

#[async_trait::async_trait]
impl ToolHandler for AdSetManager {
    fn tools(&self) -> &'static [&'static str] {
        TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        self.handle_tool(tool, args).await
    }
}
