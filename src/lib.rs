//! Anzeigen-Harvester: a Kleinanzeigen seller-inventory scraper
//!
//! This crate retrieves every listing of a given seller on the Kleinanzeigen
//! classifieds marketplace, extracts structured wheel/tyre attributes from
//! each listing's free-text title and description, and downloads the
//! associated images. Results are exported as one CSV row per listing.

pub mod config;
pub mod export;
pub mod extract;
pub mod images;
pub mod scrape;
pub mod urls;

use thiserror::Error;

/// Main error type for harvester operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the HTTP session layer
///
/// A fetch either fails in transport (DNS, timeout, connection) or completes
/// with a terminal non-success status. There is no retry loop; a single
/// failure aborts that one fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("URL must be absolute: {url}")]
    InvalidUrl { url: String },

    #[error("Request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
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
}

/// Result type alias for harvester operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{Attributes, ListingRecord, Ruleset};
pub use scrape::{Scraper, Session};
