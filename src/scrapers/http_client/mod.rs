//! HTTP fetcher with per-request identity rotation.

mod response;
mod user_agent;

pub use response::{FetchError, RawDocument};
pub use user_agent::{random_user_agent, IdentityPolicy, IMPERSONATE, IMPERSONATE_USER_AGENTS};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::debug;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default cap on followed redirects.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Source of raw documents for the lookup pipeline.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url`, identifying as `identity`.
    async fn fetch(&self, url: &str, identity: &str) -> Result<RawDocument, FetchError>;
}

/// Fetcher backed by a shared reqwest client.
///
/// The client is built once; identity is set per request so concurrent
/// lookups never share a rotation cursor.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with default timeout and redirect cap.
    pub fn new() -> Result<Self, FetchError> {
        Self::builder().build()
    }

    pub fn builder() -> HttpFetcherBuilder {
        HttpFetcherBuilder::default()
    }
}

/// Builder for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct HttpFetcherBuilder {
    timeout: Duration,
    max_redirects: usize,
    system_proxy: bool,
}

impl Default for HttpFetcherBuilder {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            system_proxy: true,
        }
    }
}

impl HttpFetcherBuilder {
    /// Total time allowed for one request, body included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment (default on).
    pub fn system_proxy(mut self, enabled: bool) -> Self {
        self.system_proxy = enabled;
        self
    }

    pub fn build(self) -> Result<HttpFetcher, FetchError> {
        let mut builder = Client::builder();
        if !self.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .timeout(self.timeout)
            .connect_timeout(self.timeout)
            .redirect(Policy::limited(self.max_redirects))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, identity: &str) -> Result<RawDocument, FetchError> {
        debug!("GET {}", url);

        // Dropping this future (e.g. on command cancellation) drops the
        // in-flight response, returning the connection to reqwest.
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, identity)
            .header(ACCEPT, "text/html,application/xhtml+xml")
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        let final_url = response.url().to_string();
        debug!("{} -> {} ({})", url, status.as_u16(), final_url);

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let text = response.text().await?;

        Ok(RawDocument {
            text,
            final_url,
            status_code: status.as_u16(),
        })
    }
}
