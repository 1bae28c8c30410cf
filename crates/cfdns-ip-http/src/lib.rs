// # HTTP IP Lookup
//
// Discovers the host's public IP by asking an external echo service
// (e.g. ifconfig.co, api.ipify.org) that answers with the caller's address
// as plain text.
//
// ## Architecture
//
// - `UrlRetriever`: one GET per call, raw body out (`ByteRetriever`)
// - `public_ip_retriever`: `UrlRetriever` behind a `CachedRetriever`, built
//   from an `IpLookupConfig`
//
// The body is handed over untouched; decoding, trimming and the empty-value
// check belong to the cache layer.

use async_trait::async_trait;
use cfdns_core::traits::ByteRetriever;
use cfdns_core::{CachedRetriever, Error, IpLookupConfig, Result};
use std::time::Duration;

/// Plain HTTP GET against a fixed URL
#[derive(Debug, Clone)]
pub struct UrlRetriever {
    url: String,
    client: reqwest::Client,
}

impl UrlRetriever {
    /// Create a retriever for `url` with a per-request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(url, client))
    }

    /// Create a retriever sharing an existing HTTP client
    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// URL queried on every fetch
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ByteRetriever for UrlRetriever {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Querying public IP from {}", self.url);

        let response = self
            .client
            .get(self.url.as_str())
            .send()
            .await
            .map_err(|e| Error::discovery(format!("Request to '{}' failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::discovery(format!(
                "'{}' answered with HTTP {}",
                self.url, status
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            Error::discovery(format!("Failed to read response from '{}': {}", self.url, e))
        })?;

        Ok(body.to_vec())
    }
}

/// Cached public IP source built from configuration
///
/// # Errors
///
/// [`Error::Config`] if the configuration is invalid.
pub fn public_ip_retriever(config: &IpLookupConfig) -> Result<CachedRetriever<UrlRetriever>> {
    config.validate()?;

    if config.url.starts_with("http://") {
        tracing::warn!(
            "IP lookup URL {} uses plain HTTP; the answer can be tampered with in transit",
            config.url
        );
    }

    let source = UrlRetriever::new(config.url.clone(), config.timeout())?;
    Ok(CachedRetriever::new(source, config.cache_ttl()))
}
