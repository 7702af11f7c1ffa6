use crate::config::GraphConfig;
use crate::services::credentials::CredentialSources;
use crate::services::logger::{LogLevel, Logger};
use clap::Parser;

/// MCP server exposing read-only Facebook Marketing API (Graph API) tools over stdio.
#[derive(Debug, Clone, Parser)]
#[command(name = "fb-ads-mcp", version, about)]
pub struct Cli {
    /// Graph API access token. Given without a value, FB_ACCESS_TOKEN and
    /// then `.env` are consulted instead.
    #[arg(long = "fb-token", value_name = "TOKEN", num_args = 0..=1)]
    pub fb_token: Option<Option<String>>,

    /// Versioned Graph API base URL (overrides FB_GRAPH_URL).
    #[arg(long = "graph-url", value_name = "URL")]
    pub graph_url: Option<String>,

    /// Per-request timeout in milliseconds (overrides FB_GRAPH_TIMEOUT_MS).
    #[arg(long = "timeout-ms", value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// error, warn, info or debug (overrides FB_ADS_LOG_LEVEL / LOG_LEVEL).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

impl Cli {
    pub fn token(&self) -> Option<String> {
        self.fb_token
            .clone()
            .flatten()
            .filter(|token| !token.trim().is_empty())
    }

    pub fn credential_sources(&self) -> CredentialSources {
        CredentialSources::new(self.token())
    }

    pub fn graph_config(&self) -> GraphConfig {
        let config = GraphConfig::from_env().with_base_url(self.graph_url.as_deref());
        match self.timeout_ms {
            Some(ms) => config.with_timeout_ms(Some(ms).filter(|ms| *ms > 0)),
            None => config,
        }
    }

    pub fn logger(&self) -> Logger {
        let logger = Logger::new("fb-ads");
        match self.log_level {
            Some(level) => logger.with_level(level),
            None => logger,
        }
    }
}
