//! URL helpers shared by discovery and image resolution

use url::Url;

/// Resolves an href against a base URL and returns its absolute form
///
/// Returns `None` for empty hrefs, fragment-only links, non-http(s)
/// results, and anything the `url` crate refuses to join.
pub fn absolutize(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match base.join(href) {
        Ok(absolute) => {
            if absolute.scheme() == "http" || absolute.scheme() == "https" {
                Some(absolute.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

/// Strips the query string (and anything after it) from a URL
///
/// Image URLs are compared and stored in this form: the CDN appends sizing
/// rules as query parameters, so two crops of the same image differ only in
/// their query string.
pub fn strip_query(url: &str) -> &str {
    match url.split_once('?') {
        Some((base, _)) => base,
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.kleinanzeigen.de/pro/haendler").unwrap()
    }

    #[test]
    fn test_absolutize_relative_path() {
        let result = absolutize(&base(), "/s-anzeige/felgen/12345-223-1").unwrap();
        assert_eq!(
            result,
            "https://www.kleinanzeigen.de/s-anzeige/felgen/12345-223-1"
        );
    }

    #[test]
    fn test_absolutize_keeps_absolute_url() {
        let result = absolutize(&base(), "https://other.example/page").unwrap();
        assert_eq!(result, "https://other.example/page");
    }

    #[test]
    fn test_absolutize_skips_empty_and_fragment() {
        assert!(absolutize(&base(), "").is_none());
        assert!(absolutize(&base(), "   ").is_none());
        assert!(absolutize(&base(), "#top").is_none());
    }

    #[test]
    fn test_absolutize_skips_non_http_schemes() {
        assert!(absolutize(&base(), "mailto:x@example.com").is_none());
        assert!(absolutize(&base(), "javascript:void(0)").is_none());
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(
            strip_query("https://img.example/api/v1/prod-ads/images/a1.jpg?rule=$_59.JPG"),
            "https://img.example/api/v1/prod-ads/images/a1.jpg"
        );
    }

    #[test]
    fn test_strip_query_without_query() {
        assert_eq!(strip_query("https://img.example/a.jpg"), "https://img.example/a.jpg");
    }
}
