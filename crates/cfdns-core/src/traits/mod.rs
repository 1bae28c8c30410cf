//! Core traits for the cfdns system
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`DnsClient`]: Remote zone/record directory
//! - [`ByteRetriever`], [`StringRetriever`]: Sources of external values

pub mod dns_client;
pub mod retriever;

pub use dns_client::DnsClient;
pub use retriever::{ByteRetriever, StringRetriever};
