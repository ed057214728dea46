use crate::Result;
use reqwest::Proxy;
use std::env;
use std::time::Duration;

/// Connection settings shared by the outbound `reqwest` clients.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: Duration,
    pub proxy_url: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            pool_max_idle_per_host: 16,
            pool_idle_timeout: Duration::from_secs(90),
            proxy_url: None,
        }
    }
}

impl HttpClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Defaults overridable by env:
    /// - `LEARN_HTTP_POOL_MAX_IDLE_PER_HOST`
    /// - `LEARN_HTTP_POOL_IDLE_TIMEOUT_SECS`
    /// - `LEARN_PROXY_URL`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout: defaults.timeout,
            pool_max_idle_per_host: env::var("LEARN_HTTP_POOL_MAX_IDLE_PER_HOST")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(defaults.pool_max_idle_per_host),
            pool_idle_timeout: env::var("LEARN_HTTP_POOL_IDLE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.pool_idle_timeout),
            proxy_url: env::var("LEARN_PROXY_URL").ok(),
        }
    }
}

/// Build a pooled client. The timeout here is the only deadline on a
/// provider call; the orchestrator adds none of its own.
pub fn build_client(cfg: &HttpClientConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .timeout(cfg.timeout)
        .pool_max_idle_per_host(cfg.pool_max_idle_per_host)
        .pool_idle_timeout(Some(cfg.pool_idle_timeout));

    if let Some(proxy_url) = &cfg.proxy_url {
        match Proxy::all(proxy_url) {
            Ok(proxy) => builder = builder.proxy(proxy),
            Err(e) => tracing::warn!(proxy = %proxy_url, error = %e, "ignoring invalid proxy url"),
        }
    }

    builder
        .build()
        .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Read a failed response into a `Status` error, keeping a bounded body excerpt.
    pub async fn from_response(resp: reqwest::Response) -> Self {
        let status = resp.status().as_u16();
        let mut body = resp.text().await.unwrap_or_default();
        if body.len() > 512 {
            let mut cut = 512;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
        TransportError::Status { status, body }
    }
}
