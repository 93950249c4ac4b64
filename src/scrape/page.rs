//! Listing page parsing
//!
//! Pulls the title and the free-text description out of an ad detail page.
//! The marketplace has rendered the description in several different
//! containers over time, so a ladder of known selectors is tried before
//! falling back to text search.

use scraper::{ElementRef, Html, Selector};

/// Known containers for the ad description, newest markup first
const DESCRIPTION_SELECTORS: &[&str] = &[
    "#viewad-description",
    "#vip-ad-description",
    "div[data-testid='description']",
    "section[data-testid='ad-description']",
];

/// Title and description of one ad page
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub title: String,
    pub description: String,
}

/// Parses an ad detail page
///
/// The title comes from the first non-empty `h1`/`h2`, falling back to the
/// document `<title>`. The description comes from the selector ladder,
/// then from the first section/div mentioning "Beschreibung", and as a
/// last resort from the whole page text (noisy, but the extraction rules
/// only react to labelled patterns).
pub fn parse_listing_page(html: &str) -> ListingPage {
    let document = Html::parse_document(html);

    ListingPage {
        title: extract_title(&document),
        description: extract_description(&document),
    }
}

/// Joins an element's text nodes with newlines, trimming each
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn extract_title(document: &Html) -> String {
    if let Ok(heading_selector) = Selector::parse("h1, h2") {
        for element in document.select(&heading_selector) {
            let text = element_text(element);
            if !text.is_empty() {
                return text;
            }
        }
    }

    if let Ok(title_selector) = Selector::parse("title") {
        if let Some(element) = document.select(&title_selector).next() {
            return element_text(element);
        }
    }

    String::new()
}

fn extract_description(document: &Html) -> String {
    for selector_str in DESCRIPTION_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let text = element_text(element);
                if !text.is_empty() {
                    return text;
                }
            }
        }
    }

    // Fallback: the first container that at least mentions the
    // "Beschreibung" heading.
    if let Ok(container_selector) = Selector::parse("section, div") {
        for element in document.select(&container_selector) {
            let text = element_text(element);
            if text.contains("Beschreibung") {
                return text;
            }
        }
    }

    element_text(document.root_element())
}
