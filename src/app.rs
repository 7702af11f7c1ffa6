use crate::config::GraphConfig;
use crate::errors::ToolError;
use crate::managers::activities::ActivityManager;
use crate::managers::ad_accounts::AdAccountManager;
use crate::managers::ads::AdManager;
use crate::managers::adsets::AdSetManager;
use crate::managers::campaigns::CampaignManager;
use crate::managers::creatives::CreativeManager;
use crate::managers::insights::InsightsManager;
use crate::mcp::catalog::tool_catalog;
use crate::services::credentials::{CredentialResolver, CredentialSources};
use crate::services::graph_client::GraphClient;
use crate::services::logger::Logger;
use crate::services::tool_executor::{ToolExecutor, ToolHandler};
use crate::services::validation::Validation;
use std::sync::Arc;

pub struct App {
    pub logger: Logger,
    pub config: GraphConfig,
    pub credentials: Arc<CredentialResolver>,
    pub tool_executor: Arc<ToolExecutor>,
    pub ad_accounts: Arc<AdAccountManager>,
    pub insights: Arc<InsightsManager>,
    pub ads: Arc<AdManager>,
    pub adsets: Arc<AdSetManager>,
    pub campaigns: Arc<CampaignManager>,
    pub creatives: Arc<CreativeManager>,
    pub activities: Arc<ActivityManager>,
}

impl App {
    /// Catalog and handlers must describe the same set of tools.
    fn validate_tool_wiring(executor: &ToolExecutor) -> Result<(), ToolError> {
        let mut missing: Vec<String> = tool_catalog()
            .iter()
            .filter(|tool| !executor.has_tool(&tool.name))
            .map(|tool| tool.name.clone())
            .collect();
        let mut unlisted: Vec<String> = executor
            .tool_names()
            .into_iter()
            .filter(|name| !tool_catalog().iter().any(|tool| &tool.name == name))
            .collect();
        if missing.is_empty() && unlisted.is_empty() {
            return Ok(());
        }
        missing.sort();
        unlisted.sort();
        Err(ToolError::internal("Tool wiring is incomplete")
            .with_hint(
                "Every tool in tool_catalog.json needs a manager, and every manager tool needs a catalog entry.",
            )
            .with_details(serde_json::json!({
                "missing_handlers": missing,
                "missing_catalog_entries": unlisted,
            })))
    }

    pub fn initialize(
        logger: Logger,
        config: GraphConfig,
        sources: CredentialSources,
    ) -> Result<Self, ToolError> {
        let credentials = Arc::new(CredentialResolver::new(logger.clone(), sources));
        Self::with_credentials(logger, config, credentials)
    }

    pub fn with_credentials(
        logger: Logger,
        config: GraphConfig,
        credentials: Arc<CredentialResolver>,
    ) -> Result<Self, ToolError> {
        let validation = Validation::new();
        let client = GraphClient::new(logger.clone(), config.clone(), credentials.clone())?;

        let ad_accounts = Arc::new(AdAccountManager::new(validation.clone(), client.clone()));
        let insights = Arc::new(InsightsManager::new(validation.clone(), client.clone()));
        let ads = Arc::new(AdManager::new(validation.clone(), client.clone()));
        let adsets = Arc::new(AdSetManager::new(validation.clone(), client.clone()));
        let campaigns = Arc::new(CampaignManager::new(validation.clone(), client.clone()));
        let creatives = Arc::new(CreativeManager::new(validation.clone(), client.clone()));
        let activities = Arc::new(ActivityManager::new(validation, client));

        let handlers: Vec<Arc<dyn ToolHandler>> = vec![
            ad_accounts.clone(),
            insights.clone(),
            ads.clone(),
            adsets.clone(),
            campaigns.clone(),
            creatives.clone(),
            activities.clone(),
        ];
        let tool_executor = Arc::new(ToolExecutor::new(logger.clone(), handlers));
        Self::validate_tool_wiring(&tool_executor)?;

        Ok(Self {
            logger,
            config,
            credentials,
            tool_executor,
            ad_accounts,
            insights,
            ads,
            adsets,
            campaigns,
            creatives,
            activities,
        })
    }

    /// Resolves the access token up front. Failure is only logged; each tool
    /// call tries again until a source provides one.
    pub fn warm_credentials(&self) -> bool {
        match self.credentials.resolve() {
            Ok(_) => true,
            Err(err) => {
                self.logger.warn(&format!("Configuration Error: {}", err), None);
                false
            }
        }
    }
}
