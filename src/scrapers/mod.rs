//! News source scrapers.
//!
//! Each scraper follows the same two-phase pattern:
//!
//! 1. **Indexing**: Discover article URLs from the source's archive listing
//! 2. **Downloading**: Fetch each page and assemble the article document
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Reuters Brazil | [`reuters`] | HTML scraping | Archive listings by section and date |
//!
//! Scrapers take their page fetcher by injection, degrade per-field on
//! extraction failures, and keep one request in flight at a time.

pub mod reuters;
