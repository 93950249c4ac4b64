//! HTTP session layer
//!
//! All page and image requests go through a single [`Session`], which owns
//! the HTTP client, the browser-like header set, the optional consent
//! cookie, and the inter-request delay. Requests are issued one at a time;
//! the delay is applied after each successful request to throttle whatever
//! comes next.

use crate::config::Config;
use crate::{FetchError, HarvestError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, COOKIE, REFERER};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// HTTP session with persistent cookies and throttling
pub struct Session {
    client: Client,
    delay: Duration,
}

impl Session {
    /// Creates a session and issues a warm-up request to the site root
    ///
    /// The warm-up establishes baseline cookies (load balancer, consent).
    /// Its failure is logged and ignored; real requests will surface any
    /// persistent problem themselves.
    ///
    /// # Arguments
    ///
    /// * `config` - The harvester configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - Ready-to-use session
    /// * `Err(HarvestError)` - Client construction failed or the configured
    ///   cookie is not a valid header value
    pub async fn new(config: &Config) -> Result<Self, HarvestError> {
        let client = build_client(config)?;

        let session = Self {
            client,
            delay: Duration::from_secs_f64(config.http.delay_seconds),
        };

        if let Err(e) = session.client.get(&config.site.root).send().await {
            tracing::debug!("Warm-up request to {} failed: {}", config.site.root, e);
        }

        Ok(session)
    }

    /// Fetches a URL and returns its text content
    ///
    /// The URL must be absolute. A `Referer` header can be provided to
    /// mimic browser navigation from a known page. On success the
    /// configured delay is awaited after the body has been read.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL to fetch
    /// * `referer` - Optional Referer header value
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Response body
    /// * `Err(FetchError)` - Transport failure or non-success status
    pub async fn fetch(&self, url: &str, referer: Option<&str>) -> Result<String, FetchError> {
        let response = self.request(url, referer).await?;

        let body = response.text().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })?;

        self.pause().await;
        Ok(body)
    }

    /// Fetches a URL and returns its raw bytes (image downloads)
    ///
    /// Same contract as [`fetch`](Self::fetch).
    pub async fn fetch_bytes(&self, url: &str, referer: Option<&str>) -> Result<Vec<u8>, FetchError> {
        let response = self.request(url, referer).await?;

        let bytes = response.bytes().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })?;

        self.pause().await;
        Ok(bytes.to_vec())
    }

    /// Issues the GET request and checks the terminal status
    async fn request(
        &self,
        url: &str,
        referer: Option<&str>,
    ) -> Result<reqwest::Response, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl {
            url: url.to_string(),
        })?;

        let mut request = self.client.get(parsed);
        if let Some(referer) = referer {
            request = request.header(REFERER, referer);
        }

        let response = request.send().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// Sleeps the configured inter-request delay
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Builds the HTTP client with the session-wide header set
///
/// Headers mimic a real browser; the marketplace answers plain clients
/// with 403s or a consent interstitial.
fn build_client(config: &Config) -> Result<Client, HarvestError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("de-DE,de;q=0.9,en;q=0.8"),
    );
    headers.insert(
        "Upgrade-Insecure-Requests",
        HeaderValue::from_static("1"),
    );

    if let Some(cookie) = &config.http.cookie {
        let value = HeaderValue::from_str(cookie).map_err(|_| {
            crate::ConfigError::Validation("cookie is not a valid header value".to_string())
        })?;
        headers.insert(COOKIE, value);
    }

    let client = Client::builder()
        .user_agent(config.http.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(20))
        .connect_timeout(Duration::from_secs(10))
        .cookie_store(true)
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}
