//! Configuration module for the harvester
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, including the environment-variable overrides for User-Agent and
//! session cookie.
//!
//! # Example
//!
//! ```no_run
//! use anzeigen_harvester::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Scraping {}", config.site.root);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, DiscoveryConfig, DiscoveryStrategy, HttpConfig, OutputConfig, SiteConfig,
};

// Re-export parser functions
pub use parser::{apply_overrides, load_config, COOKIE_ENV, UA_ENV};
