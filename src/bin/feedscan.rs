//! Feed discovery binary.
//!
//! Reads a seed list (one URL per line), walks outbound links from each
//! seed up to a depth bound, probes every reached page for RSS/Atom feeds
//! and stores what it finds, one batch per page. Failures are contained at
//! each stage: a dead seed, page or candidate is logged and the run moves
//! on.
//!
//! ## Usage
//!
//! ```sh
//! feedscan seeds.txt -d 2 --database news.db
//! ```

use acervo::config::Config;
use acervo::feeds::{finder, scanner};
use acervo::fetch::HttpFetcher;
use acervo::storage::Storage;
use acervo::utils::read_seed_list;
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

/// Command-line arguments for the feed discovery tool.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// File with one seed URL per line (# comments allowed)
    file: PathBuf,

    /// How many link hops to follow from each seed
    #[arg(short, long, default_value_t = 2)]
    depth: usize,

    /// Path of the SQLite database file
    #[arg(long, env = "ACERVO_DATABASE")]
    database: Option<PathBuf>,
}

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
    info!("feedscan starting up");

    // Parse CLI
    let args = Args::parse();
    debug!(file = %args.file.display(), depth = args.depth, "Parsed CLI arguments");

    let mut config = Config::default();
    if let Some(ref database) = args.database {
        config.database = database.clone();
    }

    let seeds = read_seed_list(&args.file)?;
    if seeds.is_empty() {
        warn!(file = %args.file.display(), "Seed list is empty; nothing to scan");
        return Ok(());
    }
    info!(count = seeds.len(), "Loaded seed URLs");

    let storage = Storage::open(&config.database).await?;
    let fetcher = HttpFetcher::new(Duration::from_secs(config.timeout_secs), &config.user_agent)?;

    // ---- Scan each seed, probe each reached page ----
    let mut total_pages = 0usize;
    let mut total_feeds = 0u64;

    for seed in &seeds {
        let pages = match scanner::scan(&fetcher, seed, args.depth).await {
            Ok(pages) => pages,
            Err(e) => {
                error!(error = %e, %seed, "Seed scan failed; continuing with the next seed");
                continue;
            }
        };
        total_pages += pages.len();

        for page in &pages {
            let feeds = match finder::find_feeds(&fetcher, page).await {
                Ok(feeds) => feeds,
                Err(e) => {
                    warn!(error = %e, %page, "Feed probe failed; skipping page");
                    continue;
                }
            };
            if feeds.is_empty() {
                continue;
            }

            match storage.store_feeds(page, &feeds).await {
                Ok(written) => total_feeds += written,
                Err(e) => error!(error = %e, %page, "Failed to store feed batch"),
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        seeds = seeds.len(),
        pages = total_pages,
        feeds = total_feeds,
        ?elapsed,
        secs = elapsed.as_secs(),
        "Execution complete"
    );

    Ok(())
}
