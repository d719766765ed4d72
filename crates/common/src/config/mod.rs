//! Configuration management for Friendly Search
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default, config/{APP_ENV}, config/local)
//! - Default values

use crate::errors::{AppError, Result};
use crate::{DEFAULT_MAX_DEPTH, DEFAULT_POPULARITY};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Ranking configuration
    #[serde(default)]
    pub ranking: RankingConfig,

    /// Social snapshot source
    #[serde(default)]
    pub snapshot: SnapshotConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// How to treat a person referenced by the graph or a band but missing from a relation
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissingPersonPolicy {
    /// Fail the whole ranking with `AppError::PersonNotFound`
    #[default]
    FailFast,
    /// Missing people have no friends and no likes
    TreatAsEmpty,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RankingConfig {
    /// Degrees of friendship expanded from the current user
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Weight of the current user's own like
    #[serde(default = "default_self_weight")]
    pub self_weight: f64,

    /// Weight of a first-degree friend's like
    #[serde(default = "default_first_degree_weight")]
    pub first_degree_weight: f64,

    /// Multiplier applied per additional degree
    #[serde(default = "default_decay")]
    pub decay: f64,

    #[serde(default)]
    pub missing_person: MissingPersonPolicy,

    /// Popularity substituted when the provider has no rating
    #[serde(default = "default_popularity")]
    pub default_popularity: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SnapshotConfig {
    /// JSON file holding friendships, likes and an optional catalog
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Metrics port (0 to disable)
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Service name reported in logs
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_max_depth() -> usize { DEFAULT_MAX_DEPTH }
fn default_self_weight() -> f64 { 2.0 }
fn default_first_degree_weight() -> f64 { 1.0 }
fn default_decay() -> f64 { 0.5 }
fn default_popularity() -> f64 { DEFAULT_POPULARITY }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_metrics_port() -> u16 { 9090 }
fn default_service_name() -> String { "friendly-search".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            self_weight: default_self_weight(),
            first_degree_weight: default_first_degree_weight(),
            decay: default_decay(),
            missing_person: MissingPersonPolicy::default(),
            default_popularity: default_popularity(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            metrics_port: default_metrics_port(),
            service_name: default_service_name(),
        }
    }
}

impl RankingConfig {
    /// Weight of a like at each degree, index 0 being first-degree friends
    pub fn degree_weights(&self) -> Vec<f64> {
        (0..self.max_depth)
            .map(|level| self.first_degree_weight * self.decay.powi(level as i32))
            .collect()
    }

    /// Reject settings that would break the ordering laws
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(invalid("ranking.max_depth", "must be at least 1"));
        }
        for (field, value) in [
            ("ranking.self_weight", self.self_weight),
            ("ranking.first_degree_weight", self.first_degree_weight),
            ("ranking.decay", self.decay),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, "must be a positive finite number"));
            }
        }
        if self.degree_weights().iter().any(|w| *w <= 0.0) {
            return Err(invalid("ranking.decay", "underflows to zero within max_depth"));
        }
        if !self.default_popularity.is_finite() {
            return Err(invalid("ranking.default_popularity", "must be finite"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> AppError {
    AppError::Configuration {
        message: format!("{} {}", field, reason),
    }
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> std::result::Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__RANKING__MAX_DEPTH=4
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )

            .build()?;

        config.try_deserialize()
    }

    /// Validate every section that has constraints
    pub fn validate(&self) -> Result<()> {
        self.ranking.validate()
    }

    /// Socket address the HTTP server binds to
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| invalid("server.host", &format!("is not a valid address: {}", e)))
    }
}
