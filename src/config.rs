//! Service configuration
//!
//! Layered: an optional TOML file, then `LEASE_AUDITOR__*` environment
//! variables (e.g. `LEASE_AUDITOR__CHAT__BASE_ENDPOINT`).

use crate::error::{AuditError, Result};
use config::{Environment, File, FileFormat};
use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

const ENV_PREFIX: &str = "LEASE_AUDITOR";

/// Upper bound for `chat.max_retries`
pub const MAX_CHAT_RETRIES: usize = 5;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum request body size; contract texts can be long
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_body_limit() -> usize {
    2 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

/// Chat-completion collaborator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// OpenAI-compatible base endpoint; `/chat/completions` is appended
    #[serde(default = "default_base_endpoint")]
    pub base_endpoint: String,

    /// API key (read from env LEASE_AUDITOR__CHAT__API_KEY)
    #[serde(default)]
    pub api_key: Option<Secret<String>>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
}

fn default_base_endpoint() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    500
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> usize {
    2
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_endpoint: default_base_endpoint(),
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl ChatConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full completions URL
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_endpoint.trim_end_matches('/'))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

impl Config {
    /// Load from an optional TOML file plus environment overrides
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(false));
        }

        let config: Self = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Parse TOML text
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chat.base_endpoint.trim().is_empty() {
            return Err(AuditError::Configuration("chat.base_endpoint cannot be empty".to_string()));
        }
        if self.server.port == 0 {
            return Err(AuditError::Configuration("server.port cannot be 0".to_string()));
        }
        if self.chat.max_retries > MAX_CHAT_RETRIES {
            return Err(AuditError::Configuration(format!(
                "chat.max_retries must be at most {}, got {}",
                MAX_CHAT_RETRIES, self.chat.max_retries
            )));
        }
        if !(0.0..=2.0).contains(&self.chat.temperature) {
            return Err(AuditError::Configuration(format!(
                "chat.temperature must be within 0.0..=2.0, got {}",
                self.chat.temperature
            )));
        }
        Ok(())
    }
}
