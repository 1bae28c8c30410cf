// # DNS Client Trait
//
// Defines the capability interface to the remote DNS directory.
//
// ## Implementations
//
// - Cloudflare: `cfdns-cloudflare` crate
// - Tests: recording doubles under `tests/common`
//
// ## Usage
//
// ```rust,ignore
// use cfdns_core::DnsClient;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let client = /* DnsClient implementation */;
//
//     for zone in client.list_zones().await? {
//         let records = client.list_records(&zone.id).await?;
//         println!("{}: {} record(s)", zone.name, records.len());
//     }
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::model::{DnsRecord, DnsRecordRequest, Zone};

/// Remote directory of zones and records
///
/// The directory is keyed by opaque provider IDs and offers only coarse
/// list/create/update/delete operations; there is no lookup by name and no
/// upsert. Name resolution and the create-or-update decision live in
/// [`crate::resolver`] and [`crate::engine`].
///
/// # Failure Reporting
///
/// Implementations must keep transport failures
/// ([`Error::Transport`](crate::Error::Transport)) apart from non-success
/// statuses ([`Error::Status`](crate::Error::Status)), and attach the
/// response body to the latter.
///
/// # Forbidden Capabilities
/// - ❌ Retry or back off (a failed call surfaces immediately)
/// - ❌ Decide whether a mutation is needed (owned by `DnsEngine`)
/// - ❌ Cache listings between calls
#[async_trait]
pub trait DnsClient: Send + Sync {
    /// List the zones visible to the credentials
    ///
    /// Only the first page the provider returns is considered.
    async fn list_zones(&self) -> Result<Vec<Zone>, crate::Error>;

    /// List the records of one zone
    ///
    /// Only the first page the provider returns is considered.
    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>, crate::Error>;

    /// Create a record from a sanitized request (no `id`)
    async fn create_record(&self, request: &DnsRecordRequest) -> Result<DnsRecord, crate::Error>;

    /// Replace a record from a sanitized request carrying its `id`
    async fn update_record(&self, request: &DnsRecordRequest) -> Result<DnsRecord, crate::Error>;

    /// Delete a record, returning the provider's confirmation id
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<String, crate::Error>;

    /// Current external value (public IP) used when no explicit content is given
    async fn external_ip(&self) -> Result<String, crate::Error>;
}
