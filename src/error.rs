//! Crate-wide error type and result alias.
//!
//! Every fetch/parse/store boundary in the pipeline returns [`Result`], so
//! callers decide per stage whether a failure skips one item or aborts the
//! batch. The variants map one-to-one onto the failure classes the pipeline
//! can hit:
//!
//! - [`Error::InvalidCategory`]: configuration error, raised before any I/O
//! - [`Error::Http`]: transport failures from the shared client
//! - [`Error::Parse`]: page structure did not match expectations
//! - [`Error::Codec`]: content serialization failures
//! - [`Error::Storage`]: database failures
//! - [`Error::Config`]: config file failures
//! - [`Error::Io`]: filesystem and stream failures

use thiserror::Error;

/// Errors produced by the capture pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// A category key outside the closed category mapping.
    #[error("unknown news category: {0}")]
    InvalidCategory(String),

    /// HTTP transport failure (connect, timeout, body read).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The fetched page did not have the structure we scrape.
    #[error("page parse failed: {0}")]
    Parse(String),

    /// Content codec failure while packing or unpacking stored text.
    #[error("content codec failed: {0}")]
    Codec(#[from] bincode::Error),

    /// Database failure.
    #[error("storage operation failed: {0}")]
    Storage(#[from] sqlx::Error),

    /// Configuration file could not be read or parsed.
    #[error("bad configuration: {0}")]
    Config(String),

    /// Filesystem or stream failure.
    #[error("i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
