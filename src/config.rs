//! Configuration management for the holdings engine

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Connection settings for the ILS web service
#[derive(Debug, Deserialize, Clone)]
pub struct IlsConfig {
    /// Base URL every request path is appended to
    pub base_url: String,
    /// Per-request timeout; keeps one slow ILS response from stalling a caller
    pub timeout_secs: u64,
    /// When set, requests are run with curl on this host over ssh
    #[serde(default)]
    pub proxy_host: Option<String>,
    #[serde(default)]
    pub proxy_user: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Redis URL; the in-process cache is used when absent
    #[serde(default)]
    pub redis_url: Option<String>,
    pub namespace: String,
    pub fast_ttl_secs: u64,
    pub user_ttl_secs: u64,
    pub list_ttl_secs: u64,
    /// Entry bound for the in-process cache
    #[serde(default = "default_memory_capacity")]
    pub memory_capacity: u64,
}

fn default_memory_capacity() -> u64 {
    10_000
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub ils: IlsConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Environment variables with prefix HOLDINGS_, e.g. HOLDINGS_ILS__BASE_URL
            .add_source(
                Environment::with_prefix("HOLDINGS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("ils.base_url", env::var("ILS_BASE_URL").ok())?
            .set_override_option("cache.redis_url", env::var("REDIS_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl IlsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CacheConfig {
    pub fn fast_ttl(&self) -> Duration {
        Duration::from_secs(self.fast_ttl_secs)
    }

    pub fn user_ttl(&self) -> Duration {
        Duration::from_secs(self.user_ttl_secs)
    }

    pub fn list_ttl(&self) -> Duration {
        Duration::from_secs(self.list_ttl_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for IlsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081/firehose2".to_string(),
            timeout_secs: 10,
            proxy_host: None,
            proxy_user: None,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            namespace: "ils".to_string(),
            fast_ttl_secs: 300,
            user_ttl_secs: 30,
            list_ttl_secs: 86_400,
            memory_capacity: default_memory_capacity(),
        }
    }
}
