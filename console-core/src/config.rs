use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::StoreConfig;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cache: CacheConfig,
    pub user: UserConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Default TTL for cache entries in seconds (None = no expiry)
    pub default_ttl_secs: Option<u64>,
    /// Expired-key sweep interval in milliseconds
    pub ttl_cleanup_interval_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub password: PasswordPolicy,
}

/// Login lockout policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    /// Failed attempts before the account soft-locks
    pub max_retry_count: u32,
    /// Lock duration in minutes; also the counter's sliding TTL window
    pub lock_time: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            user: UserConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: Some(3600),
            ttl_cleanup_interval_ms: 1000,
        }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            max_retry_count: 5,
            lock_time: 10,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/console".to_string(),
            max_connections: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Convert to cache store configuration
    pub fn to_store_config(&self) -> StoreConfig {
        StoreConfig {
            default_ttl_secs: self.cache.default_ttl_secs,
            ttl_cleanup_interval_ms: self.cache.ttl_cleanup_interval_ms,
        }
    }
}

/// Initialize tracing with the configured level, honoring `RUST_LOG` when set
pub fn init_tracing(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.level.clone()));

    if config.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
