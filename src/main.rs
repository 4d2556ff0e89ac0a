//! Article crawler binary.
//!
//! Crawls the Reuters Brazil archive listings for the requested categories
//! and date, downloads each article in sequence and appends the results to
//! the SQLite store. Categories are validated before any network access;
//! a failed category is logged and the run continues with the rest.
//!
//! ## Usage
//!
//! ```sh
//! acervo -c mundo -c negocios -d today --database news.db
//! ```

use acervo::cli::Cli;
use acervo::config::Config;
use acervo::fetch::HttpFetcher;
use acervo::scrapers::reuters::{self, ReutersScraper};
use acervo::storage::Storage;
use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("acervo starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.categories, %args.date, "Parsed CLI arguments");

    // --- Configuration: defaults, then file, then flags on top ---
    let mut config = match args.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(ref database) = args.database {
        config.database = database.clone();
    }
    info!(
        origin = %config.origin,
        database = %config.database.display(),
        timeout_secs = config.timeout_secs,
        "Configuration loaded"
    );

    // Validate every requested category before touching the network.
    let categories: Vec<String> = if args.categories.is_empty() {
        reuters::known_categories()
            .iter()
            .map(|c| c.to_string())
            .collect()
    } else {
        args.categories.clone()
    };
    for category in &categories {
        reuters::section_for(category)?;
    }
    info!(count = categories.len(), ?categories, "Categories to crawl");

    // --- Storage and the shared fetcher ---
    let storage = Storage::open(&config.database).await?;
    let fetcher = HttpFetcher::new(Duration::from_secs(config.timeout_secs), &config.user_agent)?;
    let scraper = ReutersScraper::new(fetcher, &config.origin);

    // ---- Crawl each category in sequence ----
    let mut total_indexed = 0usize;
    let mut total_stored = 0usize;
    let mut total_failed = 0usize;

    for category in &categories {
        match reuters::crawl_category(&scraper, &storage, category, &args.date).await {
            Ok(summary) => {
                total_indexed += summary.indexed;
                total_stored += summary.stored;
                total_failed += summary.failed;
            }
            Err(e) => {
                error!(error = %e, %category, "Category crawl failed; continuing with the rest");
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        categories = categories.len(),
        indexed = total_indexed,
        stored = total_stored,
        failed = total_failed,
        ?elapsed,
        secs = elapsed.as_secs(),
        "Execution complete"
    );

    Ok(())
}
