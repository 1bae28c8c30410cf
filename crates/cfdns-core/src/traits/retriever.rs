// # Retriever Traits
//
// Sources of externally supplied values.
//
// - `ByteRetriever`: raw body from somewhere (an HTTP endpoint, a test stub)
// - `StringRetriever`: a ready-to-use string value (cached or fixed)
//
// ## Implementations
//
// - `cfdns-ip-http::UrlRetriever`: plain HTTP GET (`ByteRetriever`)
// - `crate::retriever::CachedRetriever`: TTL cache over a `ByteRetriever`
// - `crate::retriever::StaticRetriever`: a fixed string

use async_trait::async_trait;

/// Fetches a raw value from an external source on every call
#[async_trait]
pub trait ByteRetriever: Send + Sync {
    /// Fetch the current body
    async fn fetch(&self) -> Result<Vec<u8>, crate::Error>;
}

/// Yields a string value, possibly served from a cache
#[async_trait]
pub trait StringRetriever: Send + Sync {
    /// Get the value
    async fn get(&self) -> Result<String, crate::Error>;
}
