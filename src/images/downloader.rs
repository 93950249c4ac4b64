//! Image downloading
//!
//! Persists a listing's resolved images under deterministic names. Every
//! image is reported as an explicit [`DownloadOutcome`], so one failing
//! image never aborts the batch; callers collapse the outcomes to the
//! saved paths at the boundary.

use crate::extract::ListingRecord;
use crate::scrape::Session;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Result of a single image download
#[derive(Debug)]
pub enum DownloadOutcome {
    /// Image fetched and written to disk
    Saved(PathBuf),

    /// Image skipped; fetch or write failed
    Failed { url: String, reason: String },
}

/// Downloads all images of a listing into `output_dir`
///
/// Filenames are `{ad_id}_{index+1}{ext}`, the ad id taken from the
/// listing URL. Each request carries the listing URL as Referer and goes
/// through the session, so cookies and the inter-request delay apply.
///
/// # Arguments
///
/// * `session` - HTTP session to download through
/// * `listing` - The listing whose images are downloaded
/// * `output_dir` - Target directory, created if absent
///
/// # Returns
///
/// * `Ok(Vec<DownloadOutcome>)` - One outcome per image URL, in order
/// * `Err(std::io::Error)` - Only when the output directory cannot be
///   created
pub async fn download_images(
    session: &Session,
    listing: &ListingRecord,
    output_dir: &Path,
) -> std::io::Result<Vec<DownloadOutcome>> {
    std::fs::create_dir_all(output_dir)?;

    let ad_id = ad_id_from_url(&listing.url);
    let mut outcomes = Vec::with_capacity(listing.image_urls.len());

    for (index, image_url) in listing.image_urls.iter().enumerate() {
        let filename = format!("{}_{}{}", ad_id, index + 1, extension_for(image_url));
        let path = output_dir.join(filename);

        let outcome = match session.fetch_bytes(image_url, Some(&listing.url)).await {
            Ok(bytes) => match std::fs::write(&path, &bytes) {
                Ok(()) => DownloadOutcome::Saved(path),
                Err(e) => {
                    tracing::warn!("Could not write {}: {}", path.display(), e);
                    DownloadOutcome::Failed {
                        url: image_url.clone(),
                        reason: e.to_string(),
                    }
                }
            },
            Err(e) => {
                tracing::warn!("Image download failed for {}: {}", image_url, e);
                DownloadOutcome::Failed {
                    url: image_url.clone(),
                    reason: e.to_string(),
                }
            }
        };

        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// Collapses download outcomes to the saved file paths
pub fn saved_paths(outcomes: Vec<DownloadOutcome>) -> Vec<PathBuf> {
    outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            DownloadOutcome::Saved(path) => Some(path),
            DownloadOutcome::Failed { .. } => None,
        })
        .collect()
}

/// Derives the ad identifier used for image filenames
///
/// Ad URLs carry a numeric id in their path, e.g.
/// `/s-anzeige/bmw-felgen/3044514967-223-3462`. The first digit run
/// preceding a hyphen is the id; URLs without one fall back to a literal.
pub fn ad_id_from_url(url: &str) -> String {
    let re = Regex::new(r"/(\d+)-").expect("valid regex");
    re.captures(url)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| "listing".to_string())
}

/// Picks a file extension from the image URL's path, defaulting to `.jpg`
fn extension_for(url: &str) -> String {
    let path = crate::urls::strip_query(url);
    let segment = path.rsplit('/').next().unwrap_or("");

    match segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => format!(".{}", ext),
        _ => ".jpg".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ad_id_from_detail_url() {
        assert_eq!(
            ad_id_from_url("https://www.kleinanzeigen.de/s-anzeige/bmw-felgen/3044514967-223-3462"),
            "3044514967"
        );
    }

    #[test]
    fn test_ad_id_fallback() {
        assert_eq!(
            ad_id_from_url("https://www.kleinanzeigen.de/s-anzeige/bmw-felgen"),
            "listing"
        );
    }

    #[test]
    fn test_extension_from_path() {
        assert_eq!(
            extension_for("https://img.example/api/v1/prod-ads/images/a1.png?rule=x"),
            ".png"
        );
    }

    #[test]
    fn test_extension_defaults_to_jpg() {
        assert_eq!(
            extension_for("https://img.example/api/v1/prod-ads/images/a1"),
            ".jpg"
        );
    }

    #[test]
    fn test_saved_paths_drops_failures() {
        let outcomes = vec![
            DownloadOutcome::Saved(PathBuf::from("/tmp/1_1.jpg")),
            DownloadOutcome::Failed {
                url: "https://img.example/x.jpg".to_string(),
                reason: "HTTP 500".to_string(),
            },
            DownloadOutcome::Saved(PathBuf::from("/tmp/1_3.jpg")),
        ];

        let paths = saved_paths(outcomes);
        assert_eq!(
            paths,
            vec![PathBuf::from("/tmp/1_1.jpg"), PathBuf::from("/tmp/1_3.jpg")]
        );
    }
}
