//! Scraping pipeline
//!
//! This module contains the network-facing half of the harvester:
//! - the throttled HTTP session
//! - seller listing discovery
//! - ad page parsing
//! - the [`Scraper`] orchestrating one seller scrape
//!
//! Only the two `Scraper` operations raise errors to the caller;
//! everything beneath them degrades to partial or empty results.

mod discovery;
mod page;
mod session;

pub use discovery::{collect_ad_links, discover, extract_user_id, find_next_url, LinkCollector};
pub use page::{parse_listing_page, ListingPage};
pub use session::Session;

use crate::config::Config;
use crate::extract::{ListingRecord, Ruleset};
use crate::images::{download_images, resolve_images, DownloadOutcome};
use crate::Result;
use std::path::Path;

/// Scraper for one run, owning the HTTP session and the rule table
pub struct Scraper {
    session: Session,
    config: Config,
    ruleset: Ruleset,
}

impl Scraper {
    /// Creates a scraper, establishing the HTTP session (warm-up included)
    ///
    /// # Arguments
    ///
    /// * `config` - The harvester configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Scraper)` - Ready to scrape
    /// * `Err(HarvestError)` - Session construction failed
    pub async fn new(config: Config) -> Result<Self> {
        let session = Session::new(&config).await?;

        Ok(Self {
            session,
            config,
            ruleset: Ruleset::new(),
        })
    }

    /// Returns all ad URLs of a seller, ordered and de-duplicated
    ///
    /// This is one of the two raising operations: an unreachable or
    /// failing entry page surfaces as an error. Secondary fetches during
    /// discovery degrade silently.
    pub async fn scrape_seller(&self, entry_url: &str) -> Result<Vec<String>> {
        let ad_urls = discover(&self.session, &self.config, entry_url).await?;
        tracing::info!("Discovered {} ads for {}", ad_urls.len(), entry_url);
        Ok(ad_urls)
    }

    /// Fetches one ad page and assembles its structured record
    ///
    /// The second raising operation: a failing ad-page fetch surfaces as
    /// an error. Missing fields and missing images are normal outcomes.
    pub async fn scrape_listing(&self, ad_url: &str) -> Result<ListingRecord> {
        let html = self.session.fetch(ad_url, None).await?;

        let page = parse_listing_page(&html);
        let image_urls = resolve_images(&html);
        let attributes = self.ruleset.extract(&page.title, &page.description);

        tracing::debug!(
            "Scraped {}: {} image(s), title '{}'",
            ad_url,
            image_urls.len(),
            page.title
        );

        Ok(ListingRecord {
            url: ad_url.to_string(),
            title: page.title,
            attributes,
            image_urls,
        })
    }

    /// Downloads a listing's images through this scraper's session
    ///
    /// Per-image failures are reported in the outcomes, never raised.
    pub async fn download_listing_images(
        &self,
        listing: &ListingRecord,
        output_dir: &Path,
    ) -> std::io::Result<Vec<DownloadOutcome>> {
        download_images(&self.session, listing, output_dir).await
    }
}
