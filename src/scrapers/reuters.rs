//! Reuters Brazil article scraper.
//!
//! This module captures articles from the Reuters Brazil archive listings.
//! Each listing page groups the day's stories for one editorial section
//! inside a `module` block, which keeps the harvesting step simple and
//! consistent.
//!
//! # URL Pattern
//!
//! Listings live at `{origin}/news/archive/{section}?date={date}`, where
//! `date` is passed through verbatim (the live site accepted the literal
//! `today` as well as compact numeric dates). Article links inside the
//! listing are site-relative and are made absolute by prefixing the origin.
//!
//! # Category Mapping
//!
//! Callers address sections by Portuguese category key:
//!
//! | Category   | Section           |
//! |------------|-------------------|
//! | `brasil`   | domesticNews      |
//! | `cultura`  | entertainmentNews |
//! | `esportes` | sportsNews        |
//! | `internet` | internetNews      |
//! | `mundo`    | worldNews         |
//! | `negocios` | businessNews      |
//!
//! Any other key is rejected before any network access.

use crate::codec;
use crate::error::{Error, Result};
use crate::fetch::PageFetcher;
use crate::language::detect_language;
use crate::models::Article;
use crate::storage::Storage;
use crate::utils::truncate_for_log;
use chrono::NaiveDateTime;
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use readability::extractor;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use std::io::Cursor;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Source tag stamped on every article this scraper captures.
pub const SOURCE_TAG: &str = "crawler_reuters";

static CATEGORIES: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("brasil", "domesticNews"),
        ("cultura", "entertainmentNews"),
        ("esportes", "sportsNews"),
        ("internet", "internetNews"),
        ("mundo", "worldNews"),
        ("negocios", "businessNews"),
    ])
});

static MONTHS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("janeiro", "Jan"),
        ("fevereiro", "Feb"),
        ("março", "Mar"),
        ("abril", "Apr"),
        ("maio", "May"),
        ("junho", "Jun"),
        ("julho", "Jul"),
        ("agosto", "Aug"),
        ("setembro", "Sep"),
        ("outubro", "Oct"),
        ("novembro", "Nov"),
        ("dezembro", "Dec"),
    ])
});

static MODULE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div.module").unwrap());
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static TIMESTAMP_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.timestampHeader").unwrap());

// Weekday, day, month name, year and HH:MM, all before the literal BRT marker,
// e.g. "quarta-feira, 10 de fevereiro de 2015 14:30 BRT".
static TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\p{L}+(?:-\p{L}+)?),\s+(\d{1,2}) de (\p{L}+) de (\d{4})\s+(\d{1,2}:\d{2})\s+BRT")
        .unwrap()
});

/// The category keys the scraper accepts, in stable order.
pub fn known_categories() -> Vec<&'static str> {
    CATEGORIES.keys().copied().collect()
}

/// Resolve a Portuguese category key to its Reuters section identifier.
///
/// # Returns
///
/// The section identifier, or [`Error::InvalidCategory`] naming the rejected
/// key. This is the validation gate for every entry point that takes a
/// category, so bad keys fail before any I/O.
pub fn section_for(category: &str) -> Result<&'static str> {
    CATEGORIES
        .get(category)
        .copied()
        .ok_or_else(|| Error::InvalidCategory(category.to_string()))
}

/// Build the archive listing URL for a category and date token.
///
/// The `date` token is passed through verbatim; the listing server decides
/// what it means.
pub fn listing_url(origin: &str, category: &str, date: &str) -> Result<String> {
    let section = section_for(category)?;
    Ok(format!("{origin}/news/archive/{section}?date={date}"))
}

/// Harvest article URLs from a listing page.
///
/// Takes the first `module` block on the page and collects every anchor
/// `href` inside it, in document order, prefixed with the site origin.
/// Links are kept verbatim: no deduplication and no well-formedness checks,
/// the downloader deals with whatever the listing carried.
///
/// # Returns
///
/// The absolute article URLs, or [`Error::Parse`] if the page has no
/// `module` block.
pub fn extract_index_urls(origin: &str, html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let module = document
        .select(&MODULE_SELECTOR)
        .next()
        .ok_or_else(|| Error::Parse("listing page has no module block".to_string()))?;

    let mut urls = Vec::new();
    for anchor in module.select(&ANCHOR_SELECTOR) {
        if let Some(href) = anchor.value().attr("href") {
            urls.push(format!("{origin}{href}"));
        }
    }
    Ok(urls)
}

/// Parse a Reuters Brazil timestamp line into a wall-clock datetime.
///
/// Expects the shape `"quarta-feira, 10 de fevereiro de 2015 14:30 BRT"`.
/// The Portuguese month name goes through a closed twelve-entry table; a
/// month outside the table is logged and yields `None` rather than a
/// defaulted date. The source prints no numeric offset, so the result is
/// naive wall-clock time.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let caps = TIMESTAMP_RE.captures(text)?;
    let day = &caps[2];
    let month_name = caps[3].to_lowercase();
    let year = &caps[4];
    let time = &caps[5];

    let Some(month) = MONTHS.get(month_name.as_str()) else {
        error!(month = %month_name, "Unknown Portuguese month name in timestamp");
        return None;
    };

    let composed = format!("{day} {month} {year} {time}");
    match NaiveDateTime::parse_from_str(&composed, "%d %b %Y %H:%M") {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            error!(error = %e, composed = %composed, "Timestamp failed to parse");
            None
        }
    }
}

/// Pull the publication time out of a raw article page.
///
/// Looks for the first `timestampHeader` block and runs its text through
/// [`parse_timestamp`]. Absent block or unparseable text yields `None`.
pub fn extract_published_time(html: &str) -> Option<NaiveDateTime> {
    let document = Html::parse_document(html);
    let header = document.select(&TIMESTAMP_SELECTOR).next()?;
    let text = header.text().collect::<Vec<_>>().join(" ");
    parse_timestamp(&text)
}

/// Scraper for the Reuters Brazil archive.
///
/// Holds the injected page fetcher and the site origin; all network access
/// goes through the fetcher so the scraper can be driven offline in tests.
#[derive(Debug)]
pub struct ReutersScraper<F> {
    fetcher: F,
    origin: String,
}

impl<F: PageFetcher> ReutersScraper<F> {
    /// Create a scraper for `origin` using `fetcher` for page access.
    pub fn new(fetcher: F, origin: &str) -> Self {
        Self {
            fetcher,
            origin: origin.to_string(),
        }
    }

    /// Index the archive listing for a category and date.
    ///
    /// Validates the category first (unknown keys fail before any fetch),
    /// fetches the listing page and harvests the article URLs from its
    /// first `module` block.
    ///
    /// # Arguments
    ///
    /// * `category` - Portuguese category key (`mundo`, `brasil`, ...)
    /// * `date` - Date token passed through to the listing server
    ///
    /// # Returns
    ///
    /// A vector of absolute article URLs in document order, or an error if
    /// the category is unknown, the fetch failed, or the page had no
    /// listing block.
    #[instrument(level = "info", skip_all, fields(%category, %date))]
    pub async fn find_articles(&self, category: &str, date: &str) -> Result<Vec<String>> {
        let listing = listing_url(&self.origin, category, date)?;
        let html = self.fetcher.fetch_page(&listing).await?;
        let urls = extract_index_urls(&self.origin, &html)?;

        info!(count = urls.len(), listing = %listing, "Indexed article URLs");
        debug!(urls = ?urls, "Article URLs");
        Ok(urls)
    }

    /// Download one article page and assemble its document.
    ///
    /// A fetch failure is logged and returned as an error: no partial
    /// record is produced. Once the page body is in hand every extraction
    /// step degrades independently, so the returned [`Article`] always
    /// exists with whatever fields could be filled.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn download_article(&self, url: &str) -> Result<Article> {
        let raw = match self.fetcher.fetch_page(url).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, %url, "Article fetch failed");
                return Err(e);
            }
        };
        Ok(assemble_article(url, &raw))
    }
}

/// Build the article document from a fetched page body.
///
/// Runs entirely on owned data: codec, language detection, readable-content
/// extraction and timestamp parsing each fill their field or leave it absent
/// with a log line. Nothing here fails the article as a whole.
fn assemble_article(url: &str, raw: &str) -> Article {
    let mut article = Article::new(url, SOURCE_TAG);

    match codec::compress(raw) {
        Ok(blob) => {
            article.link_content = Some(blob);
            article.compressed = true;
        }
        Err(e) => error!(error = %e, %url, "Failed to pack page content"),
    }

    article.language = detect_language(raw);

    if let Some((title, body)) = extract_readable(url, raw) {
        article.title = Some(normalize_title(url, &title));
        inspect_body(url, &body);
        article.body_content = Some(body);
    }

    article.published_time = extract_published_time(raw);
    if article.published_time.is_none() {
        warn!(%url, "No publication time found on page");
    }

    article
}

/// Run the readability extractor over the raw page.
///
/// Returns the candidate title and cleaned body text, or `None` (logged) if
/// the URL does not parse or the extractor gave up on the page.
fn extract_readable(url: &str, raw: &str) -> Option<(String, String)> {
    let base = match Url::parse(url) {
        Ok(base) => base,
        Err(e) => {
            error!(error = %e, %url, "Article URL does not parse; skipping readable extraction");
            return None;
        }
    };

    let mut reader = Cursor::new(raw.as_bytes());
    match extractor::extract(&mut reader, &base) {
        Ok(product) => Some((product.title, product.text)),
        Err(e) => {
            error!(error = %e, %url, "Readable-content extraction failed");
            None
        }
    }
}

/// Normalize an extracted title for storage.
///
/// Titles have arrived URL-encoded from this source, so non-empty values are
/// percent-decoded. An empty title is logged and stored as-is; there is no
/// synthesized fallback.
fn normalize_title(url: &str, title: &str) -> String {
    if title.is_empty() {
        error!(%url, "Extracted title is empty");
        return title.to_string();
    }
    match urlencoding::decode(title) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            warn!(error = %e, %url, "Title percent-decode failed; keeping raw value");
            title.to_string()
        }
    }
}

/// Log-only content-quality probe over the extracted body.
///
/// Surfaces the last whitespace-delimited token so truncated extractions
/// stand out in debug logs. The stored value is never altered.
fn inspect_body(url: &str, body: &str) {
    if body.is_empty() {
        error!(%url, "Extracted body is empty");
        return;
    }
    if let Some(last_token) = body.split_whitespace().last() {
        debug!(
            %url,
            last_token,
            preview = %truncate_for_log(body, 120),
            "Body content probe"
        );
    }
}

/// Outcome counts for one category crawl.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CrawlSummary {
    /// URLs harvested from the listing.
    pub indexed: usize,
    /// Articles written to storage.
    pub stored: usize,
    /// URLs that failed to download or store.
    pub failed: usize,
}

/// Crawl one category for one date and persist every article.
///
/// Indexes the listing, then downloads and stores the articles strictly in
/// sequence, one page in flight at a time. Download and store failures are
/// counted and skipped; a listing failure aborts the whole category.
///
/// # Returns
///
/// The [`CrawlSummary`] for the category, or an error if the listing could
/// not be indexed.
#[instrument(level = "info", skip_all, fields(%category, %date))]
pub async fn crawl_category<F: PageFetcher>(
    scraper: &ReutersScraper<F>,
    storage: &Storage,
    category: &str,
    date: &str,
) -> Result<CrawlSummary> {
    let urls = scraper.find_articles(category, date).await?;
    let mut summary = CrawlSummary {
        indexed: urls.len(),
        ..Default::default()
    };

    let outcomes: Vec<Option<Article>> = stream::iter(urls)
        .then(|url: String| async move {
            match scraper.download_article(&url).await {
                Ok(article) => Some(article),
                // fetch failure already logged at the download site
                Err(_) => None,
            }
        })
        .collect()
        .await;

    for outcome in outcomes {
        match outcome {
            Some(article) => match storage.insert_article(&article).await {
                Ok(id) => {
                    debug!(id, link = %article.link, "Stored article");
                    summary.stored += 1;
                }
                Err(e) => {
                    error!(error = %e, link = %article.link, "Failed to store article");
                    summary.failed += 1;
                }
            },
            None => summary.failed += 1,
        }
    }

    info!(
        indexed = summary.indexed,
        stored = summary.stored,
        failed = summary.failed,
        "Category crawl finished"
    );
    Ok(summary)
}
