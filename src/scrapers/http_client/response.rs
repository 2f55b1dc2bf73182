//! Fetched documents and fetch failures.

use thiserror::Error;

/// An HTML document as returned by the remote site.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub text: String,
    /// URL after redirects.
    pub final_url: String,
    pub status_code: u16,
}

impl RawDocument {
    pub fn new(text: impl Into<String>, final_url: impl Into<String>, status_code: u16) -> Self {
        Self {
            text: text.into(),
            final_url: final_url.into(),
            status_code,
        }
    }
}

/// Failure to obtain a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// DNS, TLS, connect, timeout, redirect cap or body read failure.
    #[error("Request failed: {0}")]
    Network(String),

    /// Final response was not 2xx.
    #[error("Unexpected status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return FetchError::Status(status.as_u16());
        }
        let kind = if err.is_timeout() {
            "timeout"
        } else if err.is_redirect() {
            "too many redirects"
        } else if err.is_connect() {
            "connect"
        } else if err.is_body() || err.is_decode() {
            "body"
        } else {
            "request"
        };
        FetchError::Network(format!("{}: {}", kind, err))
    }
}
