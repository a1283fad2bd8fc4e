//! Kumo-Weave: a scoped web crawler with near-duplicate detection
//!
//! This crate implements a concurrent crawler that stays inside a configured
//! set of root domains, fingerprints every accepted page (SimHash over the
//! page vocabulary), rejects near-duplicate content, and accumulates
//! corpus-wide statistics into a plain-text report.

pub mod config;
pub mod crawler;
pub mod dedup;
pub mod robots;
pub mod stats;
pub mod text;
pub mod url;

use thiserror::Error;

/// Main error type for Kumo-Weave operations
#[derive(Debug, Error)]
pub enum KumoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fingerprint store error: {0}")]
    Store(#[from] dedup::StoreError),

    #[error("Invalid seed URL '{url}': {source}")]
    Seed {
        url: String,
        source: ::url::ParseError,
    },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Failed to write report to {path}: {source}")]
    Report {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain in config: {0}")]
    InvalidDomain(String),
}

/// Result type alias for Kumo-Weave operations
pub type Result<T> = std::result::Result<T, KumoError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::crawl;
pub use dedup::{Fingerprint, FingerprintStore};
pub use stats::StatsAggregator;
