use serde::Deserialize;

/// Main configuration structure for the harvester
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Root URL of the marketplace (e.g. "https://www.kleinanzeigen.de")
    pub root: String,
}

/// HTTP session behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Delay in seconds applied after each successful request
    #[serde(rename = "delay-seconds", default = "default_delay")]
    pub delay_seconds: f64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Raw Cookie header attached to every request (consent/session cookies)
    #[serde(default)]
    pub cookie: Option<String>,
}

/// How seller ad URLs are discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryStrategy {
    /// Collect from the entry page, then switch to the seller's full
    /// inventory endpoint when the entry view looks truncated.
    Inventory,

    /// Follow "next page" links from the entry page until none remain.
    Pagination,
}

/// Discovery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    /// Which discovery strategy to use; the two are never combined
    #[serde(default = "default_strategy")]
    pub strategy: DiscoveryStrategy,

    /// Below this many collected ads the entry view is treated as a
    /// truncated profile and the inventory endpoint is consulted
    #[serde(rename = "inventory-threshold", default = "default_threshold")]
    pub inventory_threshold: usize,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory downloaded images are written to
    #[serde(rename = "image-dir")]
    pub image_dir: String,

    /// Path of the CSV export
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

fn default_delay() -> f64 {
    1.0
}

fn default_user_agent() -> String {
    // Plain browser signature; overridable via config or KLEINANZEIGEN_UA
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36"
        .to_string()
}

fn default_strategy() -> DiscoveryStrategy {
    DiscoveryStrategy::Inventory
}

fn default_threshold() -> usize {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            delay_seconds: default_delay(),
            user_agent: default_user_agent(),
            cookie: None,
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            inventory_threshold: default_threshold(),
        }
    }
}
