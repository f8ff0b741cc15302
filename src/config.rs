use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: String,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub default_limit: Option<u16>,
    pub max_limit: Option<u16>,
}

impl MatchingSettings {
    /// Resolve a requested result size against the configured default and cap
    pub fn resolve_limit(&self, requested: Option<u16>) -> usize {
        let max = self.max_limit.unwrap_or(100);
        let limit = requested.unwrap_or_else(|| self.default_limit.unwrap_or(10));
        limit.min(max) as usize
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_per_shared_interest")]
    pub per_shared_interest: u32,
    #[serde(default = "default_shared_interests_cap")]
    pub shared_interests_cap: u32,
    #[serde(default = "default_industry_weight")]
    pub industry: u32,
    #[serde(default = "default_per_complementary_skill")]
    pub per_complementary_skill: u32,
    #[serde(default = "default_complementary_cap")]
    pub complementary_cap: u32,
    #[serde(default = "default_location_weight")]
    pub location: u32,
    #[serde(default = "default_role_weight")]
    pub role: u32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            per_shared_interest: default_per_shared_interest(),
            shared_interests_cap: default_shared_interests_cap(),
            industry: default_industry_weight(),
            per_complementary_skill: default_per_complementary_skill(),
            complementary_cap: default_complementary_cap(),
            location: default_location_weight(),
            role: default_role_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            per_shared_interest: config.per_shared_interest,
            shared_interests_cap: config.shared_interests_cap,
            industry: config.industry,
            per_complementary_skill: config.per_complementary_skill,
            complementary_cap: config.complementary_cap,
            location: config.location,
            role: config.role,
        }
    }
}

fn default_per_shared_interest() -> u32 { 10 }
fn default_shared_interests_cap() -> u32 { 30 }
fn default_industry_weight() -> u32 { 25 }
fn default_per_complementary_skill() -> u32 { 8 }
fn default_complementary_cap() -> u32 { 25 }
fn default_location_weight() -> u32 { 10 }
fn default_role_weight() -> u32 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SIPORT_)
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SIPORT__SERVER__PORT -> server.port
            .add_source(environment());

        with_database_url_override(builder)?.build()?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment());

        with_database_url_override(builder)?.build()?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SIPORT")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// `DATABASE_URL` takes precedence over every other source, as most
/// Postgres tooling expects
fn with_database_url_override(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => builder.set_override("database.url", url),
        Err(_) => Ok(builder),
    }
}
