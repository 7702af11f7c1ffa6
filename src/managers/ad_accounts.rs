use crate::constants::edges::{AD_ACCOUNTS, ME};
use crate::constants::fields::{AD_ACCOUNT_DEFAULT, AD_ACCOUNT_LIST};
use crate::errors::{GraphError, ToolError};
use crate::services::graph_client::GraphClient;
use crate::services::graph_options::{GraphOptions, ListOrText};
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use crate::utils::tool_errors::unknown_tool_error;
use serde_json::Value;

pub const TOOLS: &[&str] = &["list_ad_accounts", "get_details_of_ad_account"];

#[derive(Clone)]
pub struct AdAccountManager {
    validation: Validation,
    client: GraphClient,
}

impl AdAccountManager {
    pub fn new(validation: Validation, client: GraphClient) -> Self {
        Self { validation, client }
    }

    /// Accounts reachable by the current token (`me/adaccounts`).
    pub async fn list_ad_accounts(&self) -> Result<Value, GraphError> {
        let fields = ListOrText::Text(AD_ACCOUNT_LIST.to_string());
        let options = GraphOptions::with_fields(Some(fields));
        self.client.fetch_edge(ME, AD_ACCOUNTS, &options).await
    }

    pub async fn get_details_of_ad_account(
        &self,
        act_id: &str,
        fields: Option<ListOrText>,
    ) -> Result<Value, GraphError> {
        let fields =
            fields.unwrap_or_else(|| ListOrText::list(AD_ACCOUNT_DEFAULT.iter().copied()));
        self.client
            .fetch_node(act_id, &GraphOptions::with_fields(Some(fields)))
            .await
    }

    pub async fn handle_tool(&self, tool: &str, mut args: Value) -> Result<Value, ToolError> {
        match tool {
            "list_ad_accounts" => Ok(self.list_ad_accounts().await?),
            "get_details_of_ad_account" => {
                let act_id = self.validation.take_id(&mut args, "act_id")?;
                let options: GraphOptions = self.validation.parse_args(tool, args)?;
                Ok(self.get_details_of_ad_account(&act_id, options.fields).await?)
            }
            _ => Err(unknown_tool_error("ad account", tool, TOOLS)),
        }
    }
}

#[async_trait::async_trait]
impl ToolHandler for AdAccountManager {
    fn tools(&self) -> &'static [&'static str] {
        TOOLS
    }

    async fn handle(&self, tool: &str, args: Value) -> Result<Value, ToolError> {
        self.handle_tool(tool, args).await
    }
}
