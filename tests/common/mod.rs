#![allow(dead_code)]

use fb_ads_mcp::app::App;
use fb_ads_mcp::config::GraphConfig;
use fb_ads_mcp::services::credentials::CredentialResolver;
use fb_ads_mcp::services::logger::{LogLevel, Logger};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub const TEST_TOKEN: &str = "test-token";

pub fn quiet_logger() -> Logger {
    Logger::new("test").with_level(LogLevel::Error)
}

pub fn restore_env(key: &str, previous: Option<String>) {
    match previous {
        Some(value) => std::env::set_var(key, value),
        None => std::env::remove_var(key),
    }
}

/// App wired against `base_url` with a pinned token.
pub fn app_for(base_url: &str) -> App {
    let logger = quiet_logger();
    let credentials = Arc::new(CredentialResolver::fixed(logger.clone(), TEST_TOKEN));
    App::with_credentials(logger, GraphConfig::new(base_url), credentials).expect("app")
}

/// Minimal HTTP/1.1 server standing in for the Graph API. Every request gets
/// the same canned reply; request targets (path + query) are recorded.
pub struct FakeGraph {
    pub base_url: String,
    pub origin: String,
    targets: Arc<StdMutex<Vec<String>>>,
    handle: tokio::task::JoinHandle<()>,
}

impl FakeGraph {
    pub async fn start(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let targets = Arc::new(StdMutex::new(Vec::new()));
        let recorded = targets.clone();
        let body = body.to_string();

        let handle = tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let recorded = recorded.clone();
                let body = body.clone();
                tokio::spawn(async move {
                    let mut head = Vec::new();
                    let mut chunk = [0u8; 4096];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => head.extend_from_slice(&chunk[..n]),
                        }
                    }
                    let text = String::from_utf8_lossy(&head).into_owned();
                    let target = text
                        .lines()
                        .next()
                        .and_then(|line| line.split_whitespace().nth(1))
                        .unwrap_or_default()
                        .to_string();
                    recorded.lock().expect("targets lock").push(target);

                    let reply = format!(
                        "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(reply.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        let origin = format!("http://{}", addr);
        Self {
            base_url: format!("{}/v22.0", origin),
            origin,
            targets,
            handle,
        }
    }

    pub fn targets(&self) -> Vec<String> {
        self.targets.lock().expect("targets lock").clone()
    }

    pub fn last_target(&self) -> String {
        self.targets().last().cloned().expect("at least one request")
    }

    pub fn last_path(&self) -> String {
        let target = self.last_target();
        target.split('?').next().unwrap_or_default().to_string()
    }

    /// Decoded query of the last request.
    pub fn last_query(&self) -> BTreeMap<String, String> {
        let url = url::Url::parse(&format!("{}{}", self.origin, self.last_target())).expect("url");
        url.query_pairs().into_owned().collect()
    }
}

impl Drop for FakeGraph {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A base URL nothing listens on.
pub async fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}/v22.0", addr)
}
