//! Data model shared by the engine and directory clients
//!
//! - [`Zone`] and [`DnsRecord`] mirror what the remote directory reports.
//! - [`DnsRecordRequest`] is the outbound create/update draft.
//! - [`Record`] is the caller's desired state.

pub mod record;
pub mod request;
pub mod zone;

pub use record::{DnsRecord, Record};
pub use request::DnsRecordRequest;
pub use zone::Zone;

/// Host-address record type used whenever no type is given
pub const DEFAULT_RECORD_TYPE: &str = "A";

/// Priority submitted with newly created records
pub const DEFAULT_PRIORITY: u16 = 10;

/// DNS TTL (seconds) used when the caller does not pick one
pub const DEFAULT_TTL: u32 = 3600;
