//! Depth-bounded link scanning.
//!
//! The scanner walks outbound links breadth-first from a seed page, keeping
//! a visited set of normalized URLs so cyclic link graphs terminate no
//! matter the depth bound. Depth counts hops from the seed: at the bound a
//! page is still collected, but its links are not followed, so a bound of
//! zero collects only the seed and touches the network not at all.

use crate::error::{Error, Result};
use crate::fetch::PageFetcher;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::{HashSet, VecDeque};
use tracing::{info, instrument, warn};
use url::Url;

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Normalize a URL for visited-set membership.
///
/// Only `http` and `https` URLs are crawlable; anything else yields `None`.
/// Fragments are stripped, so `page#a` and `page#b` count as one visit.
pub fn normalize_url(raw: &str) -> Option<String> {
    let mut url = Url::parse(raw).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);
    Some(url.to_string())
}

/// Collect a page's outbound links, resolved against the page URL and
/// normalized. Non-crawlable targets (mailto, javascript, bad hrefs) are
/// dropped.
pub fn extract_links(page_url: &str, html: &str) -> Vec<String> {
    let base = match Url::parse(page_url) {
        Ok(base) => base,
        Err(_) => return Vec::new(),
    };

    let document = Html::parse_document(html);
    let mut links = Vec::new();
    for anchor in document.select(&ANCHOR_SELECTOR) {
        if let Some(href) = anchor.value().attr("href") {
            if let Ok(resolved) = base.join(href) {
                if let Some(normalized) = normalize_url(resolved.as_str()) {
                    links.push(normalized);
                }
            }
        }
    }
    links
}

/// Walk outbound links breadth-first from `seed`, up to `max_depth` hops.
///
/// Every reached URL is collected exactly once, seed first. Pages that fail
/// to fetch are logged and kept in the result, but their links are not
/// followed; the traversal continues with the rest of the queue.
///
/// # Arguments
///
/// * `fetcher` - Page access for the traversal
/// * `seed` - Starting page
/// * `max_depth` - Hop bound; `0` collects only the seed with zero fetches
///
/// # Returns
///
/// The reached URLs in traversal order, or [`Error::Parse`] if the seed is
/// not a crawlable http(s) URL.
#[instrument(level = "info", skip_all, fields(%seed, max_depth))]
pub async fn scan<F: PageFetcher>(fetcher: &F, seed: &str, max_depth: usize) -> Result<Vec<String>> {
    let root = normalize_url(seed)
        .ok_or_else(|| Error::Parse(format!("seed is not a crawlable http(s) URL: {seed}")))?;

    let mut visited = HashSet::new();
    let mut pages = Vec::new();
    let mut queue = VecDeque::new();

    visited.insert(root.clone());
    queue.push_back((root, 0usize));

    while let Some((url, depth)) = queue.pop_front() {
        pages.push(url.clone());

        // At the bound the page is kept but its links are not followed.
        if depth >= max_depth {
            continue;
        }

        let html = match fetcher.fetch_page(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, %url, "Page unreachable during scan; not following its links");
                continue;
            }
        };

        for link in extract_links(&url, &html) {
            if visited.insert(link.clone()) {
                queue.push_back((link, depth + 1));
            }
        }
    }

    info!(pages = pages.len(), "Link scan finished");
    Ok(pages)
}
