//! HTTP access used by the fetch pipeline.

pub use error::TransportError;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// The one network operation the pipeline needs.
///
/// Kept behind a trait so tests can drive the pipeline without a network;
/// [`HttpTransport`] is the production implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphTransport: Send + Sync {
    /// Fetch `url` and return the response body. A non-success status is
    /// an error, not a body.
    async fn get(&self, url: Url) -> Result<String, TransportError>;
}

/// [`GraphTransport`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GraphTransport for HttpTransport {
    async fn get(&self, url: Url) -> Result<String, TransportError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum TransportError {
        #[error("request failed: {0}")]
        Http(#[from] reqwest::Error),
    }
}
