//! Anzeigen-Harvester command-line interface
//!
//! Drives the scraping pipeline over one or more seller URLs: discovery,
//! per-ad extraction, image downloads, and the final CSV export. A failing
//! seller or ad is skipped and the run continues.

use anyhow::Context;
use anzeigen_harvester::config::load_config;
use anzeigen_harvester::export::write_csv;
use anzeigen_harvester::images::saved_paths;
use anzeigen_harvester::Scraper;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Anzeigen-Harvester: Kleinanzeigen seller-inventory scraper
///
/// Retrieves every listing of the given sellers, extracts wheel/tyre
/// attributes from the listing text, downloads the listing images, and
/// writes one CSV row per ad.
#[derive(Parser, Debug)]
#[command(name = "anzeigen-harvester")]
#[command(version = "1.0.0")]
#[command(about = "Kleinanzeigen seller-inventory scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Seller profile or inventory URLs
    #[arg(value_name = "SELLER_URL", required_unless_present = "sellers_file")]
    sellers: Vec<String>,

    /// Read seller URLs from a file, one per line
    #[arg(long, value_name = "FILE")]
    sellers_file: Option<PathBuf>,

    /// Override the configured inter-request delay (seconds)
    #[arg(long, value_name = "SECONDS")]
    delay: Option<f64>,

    /// Scrape listings without downloading images
    #[arg(long)]
    skip_images: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = load_config(&cli.config).context("failed to load configuration")?;

    if let Some(delay) = cli.delay {
        anyhow::ensure!(
            (0.0..=10.0).contains(&delay),
            "--delay must be between 0 and 10 seconds, got {}",
            delay
        );
        config.http.delay_seconds = delay;
    }

    let sellers = collect_sellers(&cli)?;
    anyhow::ensure!(!sellers.is_empty(), "no seller URLs given");

    let image_dir = PathBuf::from(&config.output.image_dir);
    let csv_path = PathBuf::from(&config.output.csv_path);

    // Leftover images from a previous run would end up in the next
    // archive, so the directory is emptied up front.
    clear_directory(&image_dir).context("failed to clear image directory")?;

    let scraper = Scraper::new(config).await?;

    let mut records = Vec::new();
    let mut image_count = 0usize;

    for (seller_index, seller) in sellers.iter().enumerate() {
        tracing::info!(
            "Processing seller {}/{}: {}",
            seller_index + 1,
            sellers.len(),
            seller
        );

        let ad_urls = match scraper.scrape_seller(seller).await {
            Ok(urls) => urls,
            Err(e) => {
                tracing::error!("Skipping seller {}: {}", seller, e);
                continue;
            }
        };

        for (ad_index, ad_url) in ad_urls.iter().enumerate() {
            tracing::info!("Ad {}/{}: {}", ad_index + 1, ad_urls.len(), ad_url);

            let listing = match scraper.scrape_listing(ad_url).await {
                Ok(listing) => listing,
                Err(e) => {
                    tracing::warn!("Skipping ad {}: {}", ad_url, e);
                    continue;
                }
            };

            if !cli.skip_images {
                match scraper.download_listing_images(&listing, &image_dir).await {
                    Ok(outcomes) => image_count += saved_paths(outcomes).len(),
                    Err(e) => {
                        tracing::warn!("Image downloads failed for {}: {}", ad_url, e);
                    }
                }
            }

            records.push(listing);
        }
    }

    write_csv(&records, &csv_path).context("failed to write CSV export")?;

    tracing::info!(
        "Done: {} listings, {} images, CSV at {}",
        records.len(),
        image_count,
        csv_path.display()
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("anzeigen_harvester=info,warn"),
            1 => EnvFilter::new("anzeigen_harvester=debug,info"),
            2 => EnvFilter::new("anzeigen_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Gathers seller URLs from positional arguments and the optional file
fn collect_sellers(cli: &Cli) -> anyhow::Result<Vec<String>> {
    let mut sellers = cli.sellers.clone();

    if let Some(path) = &cli.sellers_file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        sellers.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    Ok(sellers)
}

/// Removes all files below `dir`, creating it when absent
fn clear_directory(dir: &Path) -> std::io::Result<()> {
    if !dir.exists() {
        return std::fs::create_dir_all(dir);
    }

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            clear_directory(&entry.path())?;
        } else {
            std::fs::remove_file(entry.path())?;
        }
    }

    Ok(())
}
