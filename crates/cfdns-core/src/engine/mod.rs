//! Reconciliation engine
//!
//! The DnsEngine is responsible for:
//! - Resolving zones and records by name via the [`resolver`](crate::resolver)
//! - Choosing the target content (explicit value or discovered public IP)
//! - Creating, updating, or leaving records untouched
//! - Deleting and listing records by name
//!
//! ## Architecture
//!
//! ```text
//!             Record (desired)
//!                    │
//!                    ▼
//!            ┌──────────────┐
//!            │  DnsEngine   │
//!            └──────────────┘
//!                    │
//!       ┌────────────┼─────────────┐
//!       ▼            ▼             ▼
//! ┌──────────┐ ┌───────────┐ ┌────────────┐
//! │ Resolver │ │ DnsClient │ │ external_ip│
//! │ (scan)   │ │ (mutate)  │ │ (cached)   │
//! └──────────┘ └───────────┘ └────────────┘
//! ```
//!
//! ## Update Flow
//!
//! ```text
//! Resolving ──► Found ──► Unchanged | Updated
//!          └──► NotFound ──► Created
//! ```
//!
//! 1. List zones, pick the zone by name (missing zone is fatal)
//! 2. List its records, pick the record by name
//! 3. Found: compare target content with the record's content, update only
//!    when they differ
//! 4. Not found: create the record in the resolved zone
//!
//! The remote side offers no upsert, so every mutation follows a full scan.
//! Nothing is retried here; a failed call surfaces to the caller.

use tracing::{debug, info};

use crate::error::Result;
use crate::model::{DnsRecord, DnsRecordRequest, Record, Zone};
use crate::resolver;
use crate::traits::DnsClient;

/// Terminal state of [`DnsEngine::update_record`]
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// Record already held the target content; nothing was sent
    Unchanged {
        record: DnsRecord,
    },
    /// Record content differed and was replaced
    Updated {
        previous_content: String,
        record: DnsRecord,
    },
    /// Record did not exist and was created
    Created {
        record: DnsRecord,
    },
}

impl UpdateOutcome {
    /// The record as it now exists remotely
    pub fn record(&self) -> &DnsRecord {
        match self {
            Self::Unchanged { record } | Self::Updated { record, .. } | Self::Created { record } => {
                record
            }
        }
    }

    pub fn into_record(self) -> DnsRecord {
        match self {
            Self::Unchanged { record } | Self::Updated { record, .. } | Self::Created { record } => {
                record
            }
        }
    }

    /// True when a create or update call was issued
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Unchanged { .. })
    }
}

/// Converges remote records towards desired [`Record`]s
///
/// Holds no state between calls apart from what the client itself caches
/// (the public IP).
pub struct DnsEngine {
    client: Box<dyn DnsClient>,
}

impl DnsEngine {
    /// Create an engine over a directory client
    pub fn new(client: Box<dyn DnsClient>) -> Self {
        Self { client }
    }

    /// Access the underlying directory client
    pub fn client(&self) -> &dyn DnsClient {
        self.client.as_ref()
    }

    /// Make the remote record match `desired`
    ///
    /// Idempotent: once the record holds the target content, further calls
    /// issue no mutation and return [`UpdateOutcome::Unchanged`].
    ///
    /// # Errors
    ///
    /// - [`Error::ZoneNotFound`](crate::Error::ZoneNotFound): no zone to
    ///   place the record in; nothing is created
    /// - [`Error::Validation`](crate::Error::Validation): the outbound
    ///   request failed sanitization; nothing is sent
    /// - Directory and discovery failures, unchanged
    pub async fn update_record(&self, desired: &Record) -> Result<UpdateOutcome> {
        let (zone, existing) =
            resolver::locate_record(self.client(), &desired.zone_name, &desired.name).await?;

        match existing {
            Some(existing) => self.update_existing(existing, desired).await,
            None => self.create(&zone, desired).await,
        }
    }

    /// Delete the record named by `desired`
    ///
    /// Returns the record that was deleted, as it was resolved before the
    /// delete call.
    ///
    /// # Errors
    ///
    /// Zone or record not found (no delete is attempted), or the delete
    /// call failing.
    pub async fn delete_record(&self, desired: &Record) -> Result<DnsRecord> {
        let record =
            resolver::resolve_record(self.client(), &desired.zone_name, &desired.name).await?;

        info!(
            "Deleting DNS [{} {}] record (id {})",
            record.record_type, record.name, record.id
        );
        let confirmation = self.client.delete_record(&record.zone_id, &record.id).await?;
        debug!("Delete confirmed with id {}", confirmation);

        Ok(record)
    }

    /// List every record of the named zone
    pub async fn list_records(&self, zone_name: &str) -> Result<Vec<DnsRecord>> {
        let zone = resolver::resolve_zone(self.client(), zone_name).await?;
        self.client.list_records(&zone.id).await
    }

    /// Content the record should hold: the explicit value when given,
    /// otherwise the discovered public IP
    async fn target_content(&self, desired: &Record) -> Result<String> {
        match desired.explicit_content() {
            Some(ip) => {
                debug!("Using explicit content: {}", ip);
                Ok(ip.to_string())
            }
            None => {
                let ip = self.client.external_ip().await?;
                debug!("Discovered public ip: {}", ip);
                Ok(ip)
            }
        }
    }

    async fn update_existing(&self, existing: DnsRecord, desired: &Record) -> Result<UpdateOutcome> {
        let content = self.target_content(desired).await?;

        if content == existing.content {
            info!(
                "DNS [{} {}] content already contains: {}",
                existing.record_type, existing.name, content
            );
            return Ok(UpdateOutcome::Unchanged { record: existing });
        }

        let mut request = DnsRecordRequest::for_update(&existing, content, desired.ttl);
        request.sanitize()?;

        info!(
            "Updating DNS [{} {}] record content: {} -> {}",
            request.record_type, request.name, existing.content, request.content
        );
        let record = self.client.update_record(&request).await?;

        Ok(UpdateOutcome::Updated {
            previous_content: existing.content,
            record,
        })
    }

    async fn create(&self, zone: &Zone, desired: &Record) -> Result<UpdateOutcome> {
        debug!(
            "No record '{}' in zone '{}', creating it",
            desired.name, zone.name
        );
        let content = self.target_content(desired).await?;

        let mut request = DnsRecordRequest::for_create(zone, desired, content);
        request.sanitize()?;

        info!(
            "Creating DNS [{} {}] record with content: {}",
            request.record_type, request.name, request.content
        );
        let record = self.client.create_record(&request).await?;

        Ok(UpdateOutcome::Created { record })
    }
}
