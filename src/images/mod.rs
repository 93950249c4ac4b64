//! Image resolution and downloading
//!
//! This module finds the image URLs of a listing page (markup and JSON-LD
//! metadata) and persists them to the output directory. Per-image failures
//! are isolated; a broken image just goes missing from the result.

mod downloader;
mod resolver;

pub use downloader::{ad_id_from_url, download_images, saved_paths, DownloadOutcome};
pub use resolver::resolve_images;
