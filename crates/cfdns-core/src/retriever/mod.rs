//! String retrievers for externally sourced values
//!
//! - [`CachedRetriever`]: TTL-bounded cache over a [`ByteRetriever`](crate::traits::ByteRetriever)
//! - [`StaticRetriever`]: fixed value, never expires

pub mod cached;
pub mod fixed;

pub use cached::CachedRetriever;
pub use fixed::StaticRetriever;
