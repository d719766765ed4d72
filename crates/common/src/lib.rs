//! Friendly Search Common Library
//!
//! Shared code for the Friendly Search crates including:
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod config;
pub mod errors;
pub mod metrics;

// Re-export commonly used types
pub use config::{AppConfig, MissingPersonPolicy, RankingConfig};
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Popularity assigned to items the search provider has no rating for
pub const DEFAULT_POPULARITY: f64 = 2.5;

/// Degrees of friendship that contribute to ranking
pub const DEFAULT_MAX_DEPTH: usize = 5;
