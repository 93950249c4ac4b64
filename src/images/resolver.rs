//! Image URL resolution
//!
//! Collects candidate image URLs from a listing page. Candidates come from
//! three sources, merged in order: direct `<img src>` attributes, the
//! alternate resolutions inside `srcset`, and `ImageObject` entries in the
//! page's JSON-LD metadata. Only URLs served from the ad-image CDN path
//! qualify, and every URL is stored query-stripped: the CDN encodes crop
//! and size rules as query parameters, so stripping collapses all variants
//! of one image into a single canonical URL.

use crate::urls::strip_query;
use scraper::{Html, Selector};

/// Path segment identifying the ad-image CDN
const IMAGE_PATH_MARKER: &str = "/api/v1/prod-ads/images/";

/// Resolves all image URLs of a listing page
///
/// # Arguments
///
/// * `html` - The listing page markup
///
/// # Returns
///
/// Ordered, unique, query-stripped image URLs; empty when the page has no
/// resolvable images.
pub fn resolve_images(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut images: Vec<String> = Vec::new();

    if let Ok(img_selector) = Selector::parse("img") {
        for element in document.select(&img_selector) {
            if let Some(src) = element.value().attr("src") {
                push_candidate(&mut images, src);
            }

            // srcset lists alternate resolutions as "url descriptor" pairs
            if let Some(srcset) = element.value().attr("srcset") {
                for part in srcset.split(',') {
                    if let Some(candidate) = part.trim().split_whitespace().next() {
                        push_candidate(&mut images, candidate);
                    }
                }
            }
        }
    }

    if let Ok(script_selector) = Selector::parse(r#"script[type="application/ld+json"]"#) {
        for element in document.select(&script_selector) {
            let raw = element.text().collect::<String>();
            let Ok(value) = serde_json::from_str::<serde_json::Value>(&raw) else {
                continue;
            };
            collect_image_objects(&value, &mut images);
        }
    }

    images
}

/// Adds a candidate URL if it is served from the image CDN and new
fn push_candidate(images: &mut Vec<String>, candidate: &str) {
    if !candidate.contains(IMAGE_PATH_MARKER) {
        return;
    }
    let clean = strip_query(candidate).to_string();
    if !images.contains(&clean) {
        images.push(clean);
    }
}

/// Recursively walks a JSON-LD value for `ImageObject` content URLs
///
/// Structured data nests arbitrarily (`@graph` containers, product
/// objects holding image lists), so every object and array is visited.
fn collect_image_objects(value: &serde_json::Value, images: &mut Vec<String>) {
    match value {
        serde_json::Value::Object(map) => {
            let is_image_object = map
                .get("@type")
                .and_then(|t| t.as_str())
                .is_some_and(|t| t == "ImageObject");

            if is_image_object {
                if let Some(url) = map.get("contentUrl").and_then(|u| u.as_str()) {
                    push_candidate(images, url);
                }
            }

            for nested in map.values() {
                collect_image_objects(nested, images);
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                collect_image_objects(item, images);
            }
        }
        _ => {}
    }
}
