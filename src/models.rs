//! Data models for captured articles and discovered feeds.
//!
//! This module defines the documents the pipeline persists:
//! - [`Article`]: one captured news page with its extracted fields
//! - [`FeedRecord`]: one syndication feed URL and the page it was found on
//!
//! An [`Article`] starts out empty (only `link` and `source` set) and is
//! populated field by field as extraction proceeds. Every extraction-derived
//! field is optional: a failed extraction leaves its field absent, which is a
//! valid state and never an error.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A captured news article.
///
/// One `Article` is produced per successfully fetched page. The raw page
/// text is stored compressed in `link_content`; the remaining fields carry
/// whatever the extractors managed to pull out of the page.
///
/// # Field presence
///
/// * `link` and `source` are always set.
/// * `link_content` is set (and `compressed` is true) iff the content codec
///   succeeded.
/// * `language` is set iff detection reported a reliable result.
/// * `title` and `body_content` are set iff readable-content extraction ran.
/// * `published_time` is set iff the page timestamp parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// The URL the article was fetched from.
    pub link: String,
    /// Fixed tag identifying the crawler that captured the article.
    pub source: String,
    /// The raw page text, serialized and zlib-compressed.
    pub link_content: Option<Vec<u8>>,
    /// Whether `link_content` holds compressed bytes.
    pub compressed: bool,
    /// ISO 639-3 language code, when detection was reliable.
    pub language: Option<String>,
    /// Extracted headline, percent-decoded.
    pub title: Option<String>,
    /// Publication wall-clock time; the source carries no usable offset.
    pub published_time: Option<NaiveDateTime>,
    /// Cleaned readable body text.
    pub body_content: Option<String>,
}

impl Article {
    /// Create an empty article for `link`, tagged with `source`.
    ///
    /// All extraction-derived fields start absent and are filled in as the
    /// download pipeline runs.
    pub fn new(link: &str, source: &str) -> Self {
        Self {
            link: link.to_string(),
            source: source.to_string(),
            link_content: None,
            compressed: false,
            language: None,
            title: None,
            published_time: None,
            body_content: None,
        }
    }
}

/// A syndication feed discovered on a scanned page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRecord {
    /// The feed URL.
    pub url: String,
    /// The page the feed was discovered on.
    pub discovered_on: String,
}
