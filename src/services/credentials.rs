use crate::constants::credentials::{DOTENV_FILE, TOKEN_ENV, TOKEN_FLAG};
use crate::errors::GraphError;
use crate::services::logger::Logger;
use once_cell::sync::OnceCell;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Where an access token may come from, in precedence order.
#[derive(Debug, Clone)]
pub struct CredentialSources {
    /// Value that followed `--fb-token` on the command line.
    pub flag_value: Option<String>,
    pub env_key: String,
    pub dotenv_path: PathBuf,
}

impl CredentialSources {
    pub fn new(flag_value: Option<String>) -> Self {
        Self {
            flag_value,
            env_key: TOKEN_ENV.to_string(),
            dotenv_path: PathBuf::from(DOTENV_FILE),
        }
    }

    pub fn with_env_key(mut self, key: impl Into<String>) -> Self {
        self.env_key = key.into();
        self
    }

    pub fn with_dotenv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv_path = path.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Flag,
    Environment,
    DotEnv,
}

impl CredentialSource {
    pub fn as_str(self) -> &'static str {
        match self {
            CredentialSource::Flag => "flag",
            CredentialSource::Environment => "env",
            CredentialSource::DotEnv => "dotenv",
        }
    }
}

/// Resolves the single process-wide access token and memoizes the first success.
///
/// Failed attempts are not memoized, so a later call can still succeed once a
/// source becomes available (for example after `.env` is written).
pub struct CredentialResolver {
    logger: Logger,
    sources: CredentialSources,
    memo: OnceCell<String>,
}

impl CredentialResolver {
    pub fn new(logger: Logger, sources: CredentialSources) -> Self {
        Self {
            logger: logger.child("credentials"),
            sources,
            memo: OnceCell::new(),
        }
    }

    /// Pre-resolved token; no source is ever consulted.
    pub fn fixed(logger: Logger, token: impl Into<String>) -> Self {
        let resolver = Self::new(logger, CredentialSources::new(None));
        let _ = resolver.memo.set(token.into());
        resolver
    }

    pub fn is_resolved(&self) -> bool {
        self.memo.get().is_some()
    }

    pub fn resolve(&self) -> Result<&str, GraphError> {
        let token = self.memo.get_or_try_init(|| {
            let (token, source) = self.lookup().ok_or_else(|| {
                GraphError::configuration(format!(
                    "Facebook token must be provided via '{}' argument or '{}' environment variable",
                    TOKEN_FLAG, self.sources.env_key
                ))
            })?;
            self.logger.info(
                "access token resolved",
                Some(&serde_json::json!({ "source": source.as_str() })),
            );
            Ok::<String, GraphError>(token)
        })?;
        Ok(token.as_str())
    }

    fn lookup(&self) -> Option<(String, CredentialSource)> {
        if let Some(value) = self.sources.flag_value.as_ref() {
            return Some((value.clone(), CredentialSource::Flag));
        }
        if let Some(value) = std::env::var(&self.sources.env_key)
            .ok()
            .filter(|v| !v.is_empty())
        {
            return Some((value, CredentialSource::Environment));
        }
        read_dotenv_value(&self.sources.dotenv_path, &self.sources.env_key)
            .map(|value| (value, CredentialSource::DotEnv))
    }
}

/// First `KEY=value` line of a dotenv file, trimmed. Unreadable files count as absent.
pub fn read_dotenv_value(path: &Path, key: &str) -> Option<String> {
    let file = std::fs::File::open(path).ok()?;
    let prefix = format!("{}=", key);
    for line in BufReader::new(file).lines() {
        let line = line.ok()?;
        if let Some(rest) = line.strip_prefix(&prefix) {
            return Some(rest.trim().to_string());
        }
    }
    None
}
