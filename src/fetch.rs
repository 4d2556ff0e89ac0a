//! Page fetching behind an injectable trait.
//!
//! Every stage that touches the network goes through [`PageFetcher`], so the
//! pipeline can be driven offline in tests by an in-memory implementation.
//! The real implementation, [`HttpFetcher`], wraps one shared reqwest client
//! built once at startup with an explicit timeout and User-Agent.

use crate::error::Result;
use std::time::Duration;
use tracing::{debug, instrument};

/// Trait for fetching a page body by URL.
///
/// Implementors return the response body as text; transport failures come
/// back as errors and the caller decides whether to skip or abort.
pub trait PageFetcher {
    /// Fetch `url` and return the response body.
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// Fetching through a shared reference delegates to the referent, so one
/// fetcher can back several pipeline stages at once.
impl<F: PageFetcher> PageFetcher for &F {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        (**self).fetch_page(url).await
    }
}

/// HTTP fetcher backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build the shared client.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Applied to every request, connect through body read
    /// * `user_agent` - Sent with every request
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let body = self.client.get(url).send().await?.text().await?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
