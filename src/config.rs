//! Process configuration for the Graph API proxy.

use crate::constants::graph::{BASE_URL_ENV, DEFAULT_BASE_URL, TIMEOUT_ENV};

/// Connection settings for the remote Graph API.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `FB_GRAPH_URL` | `https://graph.facebook.com/v22.0` | Versioned base URL every node path is appended to |
/// | `FB_GRAPH_TIMEOUT_MS` | (absent = no timeout) | Per-request timeout applied by the HTTP client |
///
/// Command-line flags, when given, override the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,

    /// `None` leaves outbound calls unbounded.
    pub timeout_ms: Option<u64>,
}

impl GraphConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            timeout_ms: None,
        }
    }

    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_ms = std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v > 0);
        Self {
            base_url: normalize_base_url(&base_url),
            timeout_ms,
        }
    }

    pub fn with_base_url(mut self, base_url: Option<&str>) -> Self {
        if let Some(base) = base_url.filter(|b| !b.trim().is_empty()) {
            self.base_url = normalize_base_url(base);
        }
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let config = GraphConfig::new("http://127.0.0.1:9999/v1/");
        assert_eq!(config.base_url, "http://127.0.0.1:9999/v1");
    }

    #[test]
    fn blank_override_keeps_existing_base() {
        let config = GraphConfig::default().with_base_url(Some("  "));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
