use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Environment variable overriding the configured User-Agent
pub const UA_ENV: &str = "KLEINANZEIGEN_UA";

/// Environment variable overriding the configured Cookie header
pub const COOKIE_ENV: &str = "KLEINANZEIGEN_COOKIE";

/// Loads and parses a configuration file from the given path
///
/// Environment overrides (`KLEINANZEIGEN_UA`, `KLEINANZEIGEN_COOKIE`) are
/// applied on top of the file values before validation, so a cookie copied
/// from a browser session never has to live in the config file.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let mut config: Config = toml::from_str(&content)?;

    apply_overrides(
        &mut config,
        std::env::var(UA_ENV).ok(),
        std::env::var(COOKIE_ENV).ok(),
    );

    validate(&config)?;

    Ok(config)
}

/// Applies User-Agent and Cookie overrides to a configuration
///
/// Kept separate from the environment lookup so the override logic is
/// testable without mutating process state.
pub fn apply_overrides(config: &mut Config, user_agent: Option<String>, cookie: Option<String>) {
    if let Some(ua) = user_agent {
        if !ua.trim().is_empty() {
            config.http.user_agent = ua;
        }
    }
    if let Some(c) = cookie {
        if !c.trim().is_empty() {
            config.http.cookie = Some(c);
        }
    }
}
