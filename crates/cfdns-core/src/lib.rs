// # cfdns-core
//
// Core library for reconciling DNS records with a discovered or supplied
// value (typically the host's public IP).
//
// ## Architecture Overview
//
// - **DnsClient**: Trait for the remote zone/record directory
// - **resolver**: Locates zones and records by name via full listings
// - **DnsEngine**: Decides between create, update, or no-op and applies it
// - **CachedRetriever**: TTL cache for the discovered public IP
// - **DnsRecordRequest::sanitize**: Single gate for outbound payloads
//
// ## Design Principles
//
// 1. **Library-First**: The CLI only parses flags and prints results
// 2. **Idempotency**: Repeating an update with the same value sends nothing
// 3. **No Hidden Retries**: Every failure surfaces to the caller
// 4. **Explicit Configuration**: Built per invocation, never global

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod normalize;
pub mod resolver;
pub mod retriever;
pub mod traits;

// Re-export core types for convenience
pub use config::{ClientConfig, IpLookupConfig, RecordSet, read_token_file};
pub use engine::{DnsEngine, UpdateOutcome};
pub use error::{Error, Result};
pub use model::{DnsRecord, DnsRecordRequest, Record, Zone};
pub use normalize::normalize_record_name;
pub use retriever::{CachedRetriever, StaticRetriever};
pub use traits::{ByteRetriever, DnsClient, StringRetriever};
