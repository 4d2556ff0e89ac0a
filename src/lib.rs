//! # Acervo
//!
//! A capture pipeline for Brazilian news: articles are indexed from the
//! Reuters Brazil archive listings, downloaded one at a time, reduced to
//! their readable content and appended to a local SQLite store with the raw
//! page kept compressed alongside. A second, independent tool discovers
//! RSS/Atom feeds reachable from seed pages.
//!
//! ## Architecture
//!
//! The crawler is a pipeline over injected page access:
//! 1. **Indexing**: [`scrapers::reuters`] turns a category and date into
//!    article URLs from the archive listing
//! 2. **Downloading**: each page is fetched and assembled into a
//!    [`models::Article`], with every extraction step degrading on its own
//! 3. **Persistence**: [`storage::Storage`] appends articles and serves
//!    reads by source tag
//!
//! Feed discovery ([`feeds`]) shares the fetcher and the store but is its
//! own pipeline, driven by the `feedscan` binary.

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod feeds;
pub mod fetch;
pub mod language;
pub mod models;
pub mod scrapers;
pub mod storage;
pub mod utils;

pub use error::{Error, Result};
pub use models::{Article, FeedRecord};
