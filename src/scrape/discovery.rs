//! Seller listing discovery
//!
//! Given a seller's entry URL (a profile page or a pre-built inventory
//! list), discovery returns the complete, ordered, de-duplicated set of ad
//! URLs. Two strategies exist and are selected by configuration:
//!
//! - `inventory` (default): profile views cap the number of listing cards
//!   they render, so when the entry page yields fewer ads than the
//!   configured threshold, the seller's numeric id is derived from the page
//!   source and the full inventory endpoint is fetched instead. The
//!   inventory page is authoritative: it replaces, never merges with, the
//!   entry-page links.
//! - `pagination`: "next page" links are followed from the entry page until
//!   none remain or the next candidate equals the current page.
//!
//! Failures past the entry page degrade to whatever was already collected.

use crate::config::{Config, DiscoveryStrategy};
use crate::scrape::Session;
use crate::urls::absolutize;
use crate::FetchError;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Tokens identifying a "next page" control, checked against link text and
/// aria-label
const NEXT_LABELS: &[&str] = &["weiter", "nächste", "next"];

/// Ordered set of discovered ad URLs
///
/// First occurrence wins; output order equals first-seen order. Lives only
/// for the duration of one discovery call.
#[derive(Debug, Default)]
pub struct LinkCollector {
    seen: HashSet<String>,
    urls: Vec<String>,
}

impl LinkCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a URL unless it was already collected
    pub fn insert(&mut self, url: String) {
        if self.seen.insert(url.clone()) {
            self.urls.push(url);
        }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Drops everything collected so far (inventory replacement)
    pub fn clear(&mut self) {
        self.seen.clear();
        self.urls.clear();
    }

    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }
}

/// Discovers all ad URLs for a seller
///
/// Only the entry-page fetch can fail; every later step degrades to the
/// links already collected.
///
/// # Arguments
///
/// * `session` - HTTP session to fetch through
/// * `config` - Harvester configuration (strategy, threshold, site root)
/// * `entry_url` - Seller profile or inventory URL
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Ordered, unique ad URLs
/// * `Err(FetchError)` - Entry URL malformed or entry-page fetch failed
pub async fn discover(
    session: &Session,
    config: &Config,
    entry_url: &str,
) -> Result<Vec<String>, FetchError> {
    let entry = Url::parse(entry_url).map_err(|_| FetchError::InvalidUrl {
        url: entry_url.to_string(),
    })?;

    let html = session.fetch(entry_url, None).await?;

    let links = match config.discovery.strategy {
        DiscoveryStrategy::Inventory => {
            discover_via_inventory(session, config, &entry, &html).await
        }
        DiscoveryStrategy::Pagination => follow_pagination(session, &entry, html).await,
    };

    Ok(links.into_urls())
}

/// Inventory-first strategy
///
/// Collects from the entry page; when the result looks truncated, derives
/// the seller id and replaces the collection with the inventory endpoint's
/// links.
async fn discover_via_inventory(
    session: &Session,
    config: &Config,
    entry: &Url,
    entry_html: &str,
) -> LinkCollector {
    let mut links = LinkCollector::new();
    collect_ad_links(entry_html, entry, &mut links);

    if links.len() >= config.discovery.inventory_threshold {
        return links;
    }

    let uid = match extract_user_id(entry_html) {
        Some(uid) => Some(uid),
        None => fetch_user_id_from_first_ad(session, entry, entry_html).await,
    };

    let Some(uid) = uid else {
        tracing::debug!("No seller id found for {}, keeping entry-page links", entry);
        return links;
    };

    let root = site_root(config, entry);
    let inventory_url = format!(
        "{}/s-bestandsliste.html?userId={}",
        root.as_str().trim_end_matches('/'),
        uid
    );

    match session.fetch(&inventory_url, Some(entry.as_str())).await {
        Ok(inventory_html) => {
            // The inventory page lists the seller's complete stock; the
            // capped entry view is discarded, not merged.
            links.clear();
            collect_ad_links(&inventory_html, &root, &mut links);
        }
        Err(e) => {
            tracing::warn!("Inventory fetch failed for seller {}: {}", uid, e);
        }
    }

    links
}

/// Pagination strategy
///
/// Collects each page then follows the next-page control. Stops when no
/// next link exists, when the candidate equals the current page, or when a
/// follow-up fetch fails.
async fn follow_pagination(session: &Session, entry: &Url, entry_html: String) -> LinkCollector {
    let mut links = LinkCollector::new();
    let mut current = entry.clone();
    let mut html = entry_html;

    loop {
        collect_ad_links(&html, &current, &mut links);

        let Some(next) = find_next_url(&html, &current) else {
            break;
        };
        if next == current.as_str() {
            tracing::debug!("Next-page link points at the current page, stopping");
            break;
        }

        match session.fetch(&next, Some(current.as_str())).await {
            Ok(next_html) => {
                let Ok(next_url) = Url::parse(&next) else {
                    break;
                };
                html = next_html;
                current = next_url;
            }
            Err(e) => {
                tracing::warn!("Pagination fetch failed at {}: {}", next, e);
                break;
            }
        }
    }

    links
}

/// Collects ad links from one page of HTML
///
/// Primary source: listing cards `<article data-href="...">` carrying the
/// relative detail link. Fallback: any anchor whose path starts with the
/// ad-detail prefix `/s-anzeige/`.
pub fn collect_ad_links(html: &str, base: &Url, links: &mut LinkCollector) {
    let document = Html::parse_document(html);

    if let Ok(card_selector) = Selector::parse("article[data-href]") {
        for element in document.select(&card_selector) {
            if let Some(href) = element.value().attr("data-href") {
                if let Some(absolute) = absolutize(base, href) {
                    links.insert(absolute);
                }
            }
        }
    }

    if let Ok(anchor_selector) = Selector::parse("a[href]") {
        for element in document.select(&anchor_selector) {
            if let Some(href) = element.value().attr("href") {
                if href.starts_with("/s-anzeige/") {
                    if let Some(absolute) = absolutize(base, href) {
                        links.insert(absolute);
                    }
                }
            }
        }
    }
}

/// Extracts a numeric seller id from page source
///
/// Seller pages and ad pages embed the id under several labels inside JSON
/// and markup. The label variants are tried in order and the first capture
/// wins.
pub fn extract_user_id(html: &str) -> Option<String> {
    let patterns = [
        r#"(?i)userId["']?\s*[:=]\s*["']?(\d+)"#,
        r#"(?i)sellerId["']?\s*[:=]\s*["']?(\d+)"#,
        r#"(?i)memberId["']?\s*[:=]\s*["']?(\d+)"#,
        r#"(?i)"userId"\s*:\s*"?(\d+)"?"#,
    ];

    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid regex");
        if let Some(captures) = re.captures(html) {
            return Some(captures[1].to_string());
        }
    }
    None
}

/// Fetches the first discovered ad page and retries id extraction there
///
/// Ad pages embed the seller id even when the profile page does not. Any
/// failure here returns `None`; the caller degrades gracefully.
async fn fetch_user_id_from_first_ad(
    session: &Session,
    entry: &Url,
    entry_html: &str,
) -> Option<String> {
    let first_ad = first_ad_link(entry_html, entry)?;

    match session.fetch(&first_ad, Some(entry.as_str())).await {
        Ok(ad_html) => extract_user_id(&ad_html),
        Err(e) => {
            tracing::debug!("Could not fetch first ad {} for seller id: {}", first_ad, e);
            None
        }
    }
}

/// Finds the first anchor pointing at an ad detail page
fn first_ad_link(html: &str, base: &Url) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").ok()?;

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if href.contains("/s-anzeige/") {
                return absolutize(base, href);
            }
        }
    }
    None
}

/// Locates the next-page link on a listing page
///
/// Prefers an explicit `rel="next"` anchor, then falls back to anchors
/// whose text or aria-label matches a known "next" token.
pub fn find_next_url(html: &str, base: &Url) -> Option<String> {
    let document = Html::parse_document(html);

    if let Ok(rel_selector) = Selector::parse("a[rel='next']") {
        if let Some(element) = document.select(&rel_selector).next() {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = absolutize(base, href) {
                    return Some(absolute);
                }
            }
        }
    }

    let anchor_selector = Selector::parse("a[href]").ok()?;
    for element in document.select(&anchor_selector) {
        let label = element
            .value()
            .attr("aria-label")
            .map(str::to_string)
            .unwrap_or_else(|| element.text().collect::<String>());
        let label = label.to_lowercase();

        if NEXT_LABELS.iter().any(|token| label.contains(token)) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = absolutize(base, href) {
                    return Some(absolute);
                }
            }
        }
    }
    None
}

/// Resolves the site root used to absolutize inventory links
///
/// The configured root is validated at load time; a seller entry URL still
/// provides the fallback base if it somehow fails to parse.
fn site_root(config: &Config, entry: &Url) -> Url {
    Url::parse(&config.site.root).unwrap_or_else(|_| entry.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.kleinanzeigen.de/pro/reifenhandel").unwrap()
    }

    #[test]
    fn test_collect_from_listing_cards() {
        let html = r#"
            <html><body>
            <article data-href="/s-anzeige/bmw-felgen/111-223-1"></article>
            <article data-href="/s-anzeige/audi-felgen/222-223-1"></article>
            </body></html>
        "#;
        let mut links = LinkCollector::new();
        collect_ad_links(html, &base(), &mut links);

        assert_eq!(
            links.into_urls(),
            vec![
                "https://www.kleinanzeigen.de/s-anzeige/bmw-felgen/111-223-1",
                "https://www.kleinanzeigen.de/s-anzeige/audi-felgen/222-223-1",
            ]
        );
    }

    #[test]
    fn test_collect_from_anchor_fallback() {
        let html = r#"
            <html><body>
            <a href="/s-anzeige/winterreifen/333-223-1">Winterreifen</a>
            <a href="/hilfe.html">Hilfe</a>
            </body></html>
        "#;
        let mut links = LinkCollector::new();
        collect_ad_links(html, &base(), &mut links);

        assert_eq!(
            links.into_urls(),
            vec!["https://www.kleinanzeigen.de/s-anzeige/winterreifen/333-223-1"]
        );
    }

    #[test]
    fn test_cards_precede_anchors_and_duplicates_collapse() {
        let html = r#"
            <html><body>
            <article data-href="/s-anzeige/a/1-223-1">
              <a href="/s-anzeige/a/1-223-1">A</a>
            </article>
            <a href="/s-anzeige/b/2-223-1">B</a>
            </body></html>
        "#;
        let mut links = LinkCollector::new();
        collect_ad_links(html, &base(), &mut links);

        assert_eq!(
            links.into_urls(),
            vec![
                "https://www.kleinanzeigen.de/s-anzeige/a/1-223-1",
                "https://www.kleinanzeigen.de/s-anzeige/b/2-223-1",
            ]
        );
    }

    #[test]
    fn test_collector_preserves_first_seen_order() {
        let mut links = LinkCollector::new();
        links.insert("https://a.example/1".to_string());
        links.insert("https://a.example/2".to_string());
        links.insert("https://a.example/1".to_string());

        assert_eq!(links.len(), 2);
        assert_eq!(
            links.into_urls(),
            vec!["https://a.example/1", "https://a.example/2"]
        );
    }

    #[test]
    fn test_extract_user_id_label_variants() {
        assert_eq!(
            extract_user_id(r#"var x = { userId: 12345 };"#).as_deref(),
            Some("12345")
        );
        assert_eq!(
            extract_user_id(r#"sellerId=98765&page=1"#).as_deref(),
            Some("98765")
        );
        assert_eq!(
            extract_user_id(r#"data-memberId="555""#).as_deref(),
            Some("555")
        );
        assert_eq!(
            extract_user_id(r#"{"userId": "42"}"#).as_deref(),
            Some("42")
        );
    }

    #[test]
    fn test_extract_user_id_prefers_first_variant() {
        let html = r#"sellerId=111 userId: 222"#;
        assert_eq!(extract_user_id(html).as_deref(), Some("222"));
    }

    #[test]
    fn test_extract_user_id_none() {
        assert!(extract_user_id("<html><body>nothing here</body></html>").is_none());
    }

    #[test]
    fn test_find_next_by_rel() {
        let html = r#"<a rel="next" href="/pro/reifenhandel?page=2">2</a>"#;
        assert_eq!(
            find_next_url(html, &base()).as_deref(),
            Some("https://www.kleinanzeigen.de/pro/reifenhandel?page=2")
        );
    }

    #[test]
    fn test_find_next_by_label_text() {
        let html = r#"
            <a href="/pro/reifenhandel?page=1">1</a>
            <a href="/pro/reifenhandel?page=2">Nächste Seite</a>
        "#;
        assert_eq!(
            find_next_url(html, &base()).as_deref(),
            Some("https://www.kleinanzeigen.de/pro/reifenhandel?page=2")
        );
    }

    #[test]
    fn test_find_next_by_aria_label() {
        let html = r#"<a href="/pro/reifenhandel?page=3" aria-label="Weiter">&raquo;</a>"#;
        assert_eq!(
            find_next_url(html, &base()).as_deref(),
            Some("https://www.kleinanzeigen.de/pro/reifenhandel?page=3")
        );
    }

    #[test]
    fn test_find_next_absent() {
        let html = r#"<a href="/pro/reifenhandel?page=1">1</a>"#;
        assert!(find_next_url(html, &base()).is_none());
    }
}
