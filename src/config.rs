//! 配置模块：YAML 文件加环境变量覆盖。
//!
//! Service configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file named by
//! `LEARN_CONFIG`, then environment variables. Configuration is read once at
//! process start.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `LEARN_BIND` | `server.bind` |
//! | `PORT` | `server.port` |
//! | `CORS_ORIGINS` | `server.cors_origins` (comma-separated, empty = any origin) |
//! | `CONTENT_CACHE_DURATION_HOURS` | `freshness.cache_duration_hours` |
//! | `MIN_CONFIDENCE_FOR_REGEN` | `freshness.min_confidence_for_regen` |
//! | `GEMINI_API_KEY` | `gemini.api_key` |
//! | `GEMINI_MODEL` | `gemini.model` |
//! | `GEMINI_BASE_URL` | `gemini.base_url` |
//! | `GEMINI_TIMEOUT_SECS` | `gemini.timeout_secs` |
//! | `CONTENT_STORE` | `store.backend` (`firestore` or `memory`) |
//! | `GOOGLE_CLOUD_PROJECT` | `store.project_id` |
//! | `FIRESTORE_DATABASE` | `store.database` |
//! | `FIRESTORE_EMULATOR_HOST` | `store.emulator_host` |
//! | `FIRESTORE_ACCESS_TOKEN` | `store.access_token` |

use crate::cache::FreshnessConfig;
use crate::generator::{GeminiConfig, DEFAULT_GEMINI_MODEL};
use crate::store::FirestoreConfig;
use crate::transport::HttpClientConfig;
use crate::{Error, ErrorContext, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable naming the optional YAML config file.
pub const CONFIG_PATH_ENV: &str = "LEARN_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub freshness: FreshnessConfig,
    pub gemini: GeminiSettings,
    pub store: StoreSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
    pub cors_max_age_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 4000,
            cors_origins: Vec::new(),
            cors_max_age_secs: 86400,
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: None,
            timeout_secs: 60,
        }
    }
}

impl std::fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Firestore,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StoreBackend::Firestore),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    pub project_id: Option<String>,
    pub database: String,
    pub emulator_host: Option<String>,
    pub access_token: Option<String>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Firestore,
            project_id: None,
            database: "(default)".to_string(),
            emulator_host: None,
            access_token: None,
        }
    }
}

impl std::fmt::Debug for StoreSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreSettings")
            .field("backend", &self.backend)
            .field("project_id", &self.project_id)
            .field("database", &self.database)
            .field("emulator_host", &self.emulator_host)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn config_error(field: &str, msg: impl Into<String>) -> Error {
    Error::configuration_with_context(msg, ErrorContext::new().with_field_path(field))
}

fn parse_env<T: FromStr>(name: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| {
        Error::configuration_with_context(
            format!("invalid value for {name}"),
            ErrorContext::new().with_field_path(name).with_details(e.to_string()),
        )
    })
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl AppConfig {
    /// Defaults, then `LEARN_CONFIG`, then the process environment; validated.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV).ok().and_then(non_empty) {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_env_with(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| {
            Error::configuration_with_context(
                "invalid YAML configuration",
                ErrorContext::new().with_details(e.to_string()),
            )
        })
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration_with_context(
                "cannot read configuration file",
                ErrorContext::new()
                    .with_field_path(path.display().to_string())
                    .with_details(e.to_string()),
            )
        })?;
        Self::from_yaml_str(&text)
    }

    /// Overlay environment values. `lookup` returns the raw value of a
    /// variable, or `None` when unset.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).and_then(non_empty);

        if let Some(v) = var("LEARN_BIND") {
            self.server.bind = v;
        }
        if let Some(v) = var("PORT") {
            self.server.port = parse_env("PORT", &v)?;
        }
        if let Some(v) = var("CORS_ORIGINS") {
            self.server.cors_origins = v
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }

        if let Some(v) = var("CONTENT_CACHE_DURATION_HOURS") {
            self.freshness.cache_duration_hours = parse_env("CONTENT_CACHE_DURATION_HOURS", &v)?;
        }
        if let Some(v) = var("MIN_CONFIDENCE_FOR_REGEN") {
            self.freshness.min_confidence_for_regen = parse_env("MIN_CONFIDENCE_FOR_REGEN", &v)?;
        }

        if let Some(v) = var("GEMINI_API_KEY") {
            self.gemini.api_key = Some(v);
        }
        if let Some(v) = var("GEMINI_MODEL") {
            self.gemini.model = v;
        }
        if let Some(v) = var("GEMINI_BASE_URL") {
            self.gemini.base_url = Some(v);
        }
        if let Some(v) = var("GEMINI_TIMEOUT_SECS") {
            self.gemini.timeout_secs = parse_env("GEMINI_TIMEOUT_SECS", &v)?;
        }

        if let Some(v) = var("CONTENT_STORE") {
            self.store.backend = parse_env("CONTENT_STORE", &v)?;
        }
        if let Some(v) = var("GOOGLE_CLOUD_PROJECT") {
            self.store.project_id = Some(v);
        }
        if let Some(v) = var("FIRESTORE_DATABASE") {
            self.store.database = v;
        }
        if let Some(v) = var("FIRESTORE_EMULATOR_HOST") {
            self.store.emulator_host = Some(v);
        }
        if let Some(v) = var("FIRESTORE_ACCESS_TOKEN") {
            self.store.access_token = Some(v);
        }
        Ok(())
    }

    /// Check thresholds and required credentials.
    pub fn validate(&self) -> Result<()> {
        let f = &self.freshness;
        if !f.cache_duration_hours.is_finite() || f.cache_duration_hours < 0.0 {
            return Err(config_error(
                "freshness.cache_duration_hours",
                "cache duration must be a non-negative number of hours",
            ));
        }
        if !f.min_confidence_for_regen.is_finite()
            || !(0.0..=1.0).contains(&f.min_confidence_for_regen)
        {
            return Err(config_error(
                "freshness.min_confidence_for_regen",
                "minimum confidence must lie in [0, 1]",
            ));
        }
        if self.gemini.timeout_secs == 0 {
            return Err(config_error("gemini.timeout_secs", "timeout must be positive"));
        }
        if self.gemini.api_key.is_none() {
            return Err(config_error("gemini.api_key", "GEMINI_API_KEY is not set"));
        }
        if self.store.backend == StoreBackend::Firestore && self.store.project_id.is_none() {
            return Err(config_error(
                "store.project_id",
                "GOOGLE_CLOUD_PROJECT is required for the firestore store",
            ));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.bind, self.server.port);
        addr.parse::<SocketAddr>().map_err(|e| {
            Error::configuration_with_context(
                format!("invalid bind address {addr}"),
                ErrorContext::new()
                    .with_field_path("server.bind")
                    .with_details(e.to_string()),
            )
        })
    }

    pub fn gemini_config(&self) -> Result<GeminiConfig> {
        let key = self
            .gemini
            .api_key
            .clone()
            .ok_or_else(|| config_error("gemini.api_key", "GEMINI_API_KEY is not set"))?;
        let mut cfg = GeminiConfig::new(key)
            .with_model(self.gemini.model.clone())
            .with_timeout(Duration::from_secs(self.gemini.timeout_secs));
        cfg.http = HttpClientConfig::from_env().with_timeout(cfg.http.timeout);
        if let Some(base) = &self.gemini.base_url {
            cfg = cfg.with_base_url(base.clone());
        }
        Ok(cfg)
    }

    pub fn firestore_config(&self) -> Result<FirestoreConfig> {
        let project = self
            .store
            .project_id
            .clone()
            .ok_or_else(|| config_error("store.project_id", "GOOGLE_CLOUD_PROJECT is not set"))?;
        let mut cfg = FirestoreConfig::new(project).with_database(self.store.database.clone());
        cfg.http = HttpClientConfig::from_env();
        if let Some(host) = &self.store.emulator_host {
            cfg = cfg.with_emulator_host(host);
        }
        if let Some(token) = &self.store.access_token {
            cfg = cfg.with_access_token(token.clone());
        }
        Ok(cfg)
    }
}
