//! Application configuration structs
//!
//! Loads configuration from environment variables (with `.env` support).

use std::env;
use std::time::Duration;

use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub lifecycle: LifecycleConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Content lifecycle tunables
///
/// Windows and sweep cadences for the Just-In -> Headline -> Expired state
/// machine and the coarser maintenance pass.
#[derive(Debug, Clone, Deserialize)]
pub struct LifecycleConfig {
    /// Seconds a Just-In item stays in the flash window
    #[serde(default = "default_just_in_window")]
    pub just_in_window_secs: u64,
    /// Seconds until a content item is hard-removed
    #[serde(default = "default_headline_window")]
    pub headline_window_secs: u64,
    /// Interval of the promotion/expiry sweep
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
    /// Interval of duplicate cleanup + channel stats recomputation
    #[serde(default = "default_maintenance_interval")]
    pub maintenance_interval_secs: u64,
    /// Max Just-In items promoted per sweep batch
    #[serde(default = "default_sweep_batch")]
    pub sweep_batch_size: i64,
}

impl LifecycleConfig {
    #[must_use]
    pub fn just_in_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.just_in_window_secs as i64)
    }

    #[must_use]
    pub fn headline_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.headline_window_secs as i64)
    }

    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    #[must_use]
    pub fn maintenance_interval(&self) -> Duration {
        Duration::from_secs(self.maintenance_interval_secs)
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            just_in_window_secs: default_just_in_window(),
            headline_window_secs: default_headline_window(),
            sweep_interval_secs: default_sweep_interval(),
            maintenance_interval_secs: default_maintenance_interval(),
            sweep_batch_size: default_sweep_batch(),
        }
    }
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "news-backend".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_just_in_window() -> u64 {
    900 // 15 minutes
}

fn default_headline_window() -> u64 {
    172_800 // 48 hours
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_maintenance_interval() -> u64 {
    21_600 // 6 hours
}

fn default_sweep_batch() -> i64 {
    200
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: env::var("API_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", default_max_connections),
                min_connections: env_or("DATABASE_MIN_CONNECTIONS", default_min_connections),
            },
            redis: RedisConfig {
                url: env::var("REDIS_URL").map_err(|_| ConfigError::MissingVar("REDIS_URL"))?,
                max_connections: env_or("REDIS_MAX_CONNECTIONS", default_redis_max_connections),
            },
            lifecycle: LifecycleConfig {
                just_in_window_secs: env_or("JUST_IN_WINDOW_SECS", default_just_in_window),
                headline_window_secs: env_or("HEADLINE_WINDOW_SECS", default_headline_window),
                sweep_interval_secs: env_or("SWEEP_INTERVAL_SECS", default_sweep_interval),
                maintenance_interval_secs: env_or(
                    "MAINTENANCE_INTERVAL_SECS",
                    default_maintenance_interval,
                ),
                sweep_batch_size: env_or("SWEEP_BATCH_SIZE", default_sweep_batch),
            },
            snowflake: SnowflakeConfig {
                worker_id: env_or("WORKER_ID", || 0),
            },
        })
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: fn() -> T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(default)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
