//! Feed detection on scanned pages.
//!
//! Detection is markup-based only. A page is checked for being a feed
//! itself; otherwise candidates are collected from `link[rel="alternate"]`
//! elements and feed-looking anchors, and each candidate is fetched and
//! kept only if its body really is RSS, Atom or RDF. No path guessing.

use crate::error::Result;
use crate::fetch::PageFetcher;
use itertools::Itertools;
use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::Reader;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

static ALTERNATE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"link[rel="alternate"]"#).unwrap());
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Whether `body` is syndication-feed markup.
///
/// Skips the XML prolog and looks at the root element: `rss`, `feed` (Atom)
/// and `RDF` (RSS 1.0) count. Anything unparseable or rooted elsewhere,
/// HTML included, does not.
pub fn is_feed_markup(body: &str) -> bool {
    let mut reader = Reader::from_str(body);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return matches!(e.local_name().as_ref(), b"rss" | b"feed" | b"RDF");
            }
            Ok(Event::Eof) => return false,
            Err(_) => return false,
            _ => {}
        }
    }
}

/// Collect feed candidates from a page, in document order, deduplicated.
///
/// Candidates come from two places:
/// - `link[rel="alternate"]` elements whose `type` mentions rss, atom or xml
/// - anchors whose href looks feed-like (`.rss`/`.rdf`/`.xml`/`.atom`
///   suffix, or an `rss`/`atom`/`feed` substring)
///
/// Hrefs are resolved against the page URL; unresolvable ones are dropped.
pub fn feed_candidates(page_url: &str, html: &str) -> Vec<String> {
    let base = match Url::parse(page_url) {
        Ok(base) => base,
        Err(_) => return Vec::new(),
    };

    let document = Html::parse_document(html);
    let mut candidates = Vec::new();

    for node in document.select(&ALTERNATE_SELECTOR) {
        let Some(kind) = node.value().attr("type") else {
            continue;
        };
        if kind.contains("rss") || kind.contains("atom") || kind.contains("xml") {
            if let Some(href) = node.value().attr("href") {
                if let Ok(resolved) = base.join(href) {
                    candidates.push(resolved.to_string());
                }
            }
        }
    }

    for anchor in document.select(&ANCHOR_SELECTOR) {
        if let Some(href) = anchor.value().attr("href") {
            if looks_feedish(href) {
                if let Ok(resolved) = base.join(href) {
                    candidates.push(resolved.to_string());
                }
            }
        }
    }

    candidates.into_iter().unique().collect()
}

fn looks_feedish(href: &str) -> bool {
    let lower = href.to_lowercase();
    let path = lower.split(['?', '#']).next().unwrap_or_default();
    path.ends_with(".rss")
        || path.ends_with(".rdf")
        || path.ends_with(".xml")
        || path.ends_with(".atom")
        || lower.contains("rss")
        || lower.contains("atom")
        || lower.contains("feed")
}

/// Find the verified feeds reachable from one page.
///
/// Fetches the page; if the body itself is feed markup the page URL is the
/// single result. Otherwise every candidate from [`feed_candidates`] is
/// fetched in turn and kept only if it sniffs as a feed. Unreachable
/// candidates are logged and skipped; an unreachable page is an error for
/// the caller to contain.
#[instrument(level = "info", skip_all, fields(%page_url))]
pub async fn find_feeds<F: PageFetcher>(fetcher: &F, page_url: &str) -> Result<Vec<String>> {
    let body = fetcher.fetch_page(page_url).await?;

    if is_feed_markup(&body) {
        debug!(%page_url, "Page is itself a feed");
        return Ok(vec![page_url.to_string()]);
    }

    let candidates = feed_candidates(page_url, &body);
    debug!(count = candidates.len(), "Collected feed candidates");

    let mut feeds = Vec::new();
    for candidate in candidates {
        match fetcher.fetch_page(&candidate).await {
            Ok(candidate_body) => {
                if is_feed_markup(&candidate_body) {
                    feeds.push(candidate);
                } else {
                    debug!(url = %candidate, "Candidate is not feed markup");
                }
            }
            Err(e) => {
                warn!(error = %e, url = %candidate, "Feed candidate unreachable; skipping");
            }
        }
    }

    info!(count = feeds.len(), "Verified feeds on page");
    Ok(feeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::MapFetcher;

    const RSS_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- canal de noticias -->
<rss version="2.0"><channel><title>Noticias</title></channel></rss>"#;

    const ATOM_BODY: &str = r#"<?xml version="1.0"?>
<feed xmlns="http://www.w3.org/2005/Atom"><title>Noticias</title></feed>"#;

    const RDF_BODY: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns="http://purl.org/rss/1.0/"><channel rdf:about="x"/></rdf:RDF>"#;

    #[test]
    fn test_is_feed_markup_accepts_feed_roots() {
        assert!(is_feed_markup(RSS_BODY));
        assert!(is_feed_markup(ATOM_BODY));
        assert!(is_feed_markup(RDF_BODY));
    }

    #[test]
    fn test_is_feed_markup_rejects_other_content() {
        assert!(!is_feed_markup("<html><body>pagina</body></html>"));
        assert!(!is_feed_markup("<!DOCTYPE html><html></html>"));
        assert!(!is_feed_markup("texto sem marcacao"));
        assert!(!is_feed_markup(""));
    }

    #[test]
    fn test_feed_candidates_orders_and_dedups() {
        let html = r#"<html><head>
            <link rel="alternate" type="application/rss+xml" href="/rss.xml">
        </head><body>
            <a href="/rss.xml">RSS</a>
            <a href="/feeds/atom">Atom</a>
            <a href="/contato">Contato</a>
        </body></html>"#;

        let candidates = feed_candidates("http://example.com/", html);
        assert_eq!(
            candidates,
            vec![
                "http://example.com/rss.xml",
                "http://example.com/feeds/atom",
            ]
        );
    }

    #[test]
    fn test_feed_candidates_requires_feed_type_on_alternates() {
        let html = r#"<html><head>
            <link rel="alternate" type="text/html" href="/mobile">
            <link rel="alternate" type="application/atom+xml" href="/atom.xml">
        </head></html>"#;

        let candidates = feed_candidates("http://example.com/", html);
        assert_eq!(candidates, vec!["http://example.com/atom.xml"]);
    }

    #[test]
    fn test_looks_feedish() {
        assert!(looks_feedish("/noticias.rss"));
        assert!(looks_feedish("/index.rdf"));
        assert!(looks_feedish("/feeds/principal"));
        assert!(looks_feedish("http://example.com/atom.xml"));
        assert!(!looks_feedish("/contato"));
        assert!(!looks_feedish("/sobre.html"));
    }

    #[tokio::test]
    async fn test_find_feeds_page_is_itself_a_feed() {
        let fetcher = MapFetcher::new(&[("http://example.com/rss.xml", RSS_BODY)]);

        let feeds = find_feeds(&fetcher, "http://example.com/rss.xml").await.unwrap();
        assert_eq!(feeds, vec!["http://example.com/rss.xml"]);
        assert_eq!(fetcher.hits(), 1);
    }

    #[tokio::test]
    async fn test_find_feeds_verifies_candidates() {
        let page = r#"<html><head>
            <link rel="alternate" type="application/rss+xml" href="/rss.xml">
        </head><body>
            <a href="/falso-feed">Feed?</a>
        </body></html>"#;
        let fetcher = MapFetcher::new(&[
            ("http://example.com/", page),
            ("http://example.com/rss.xml", RSS_BODY),
            ("http://example.com/falso-feed", "<html><body>nada</body></html>"),
        ]);

        let feeds = find_feeds(&fetcher, "http://example.com/").await.unwrap();
        assert_eq!(feeds, vec!["http://example.com/rss.xml"]);
    }

    #[tokio::test]
    async fn test_find_feeds_skips_unreachable_candidates() {
        let page = r#"<html><body><a href="/rss.xml">RSS</a></body></html>"#;
        let fetcher = MapFetcher::new(&[("http://example.com/", page)]);

        let feeds = find_feeds(&fetcher, "http://example.com/").await.unwrap();
        assert!(feeds.is_empty());
    }

    #[tokio::test]
    async fn test_find_feeds_unreachable_page_is_error() {
        let fetcher = MapFetcher::new(&[]);
        let result = find_feeds(&fetcher, "http://example.com/").await;
        assert!(result.is_err());
    }
}
