use serde::{Deserialize, Serialize};

use super::{DEFAULT_PRIORITY, DEFAULT_RECORD_TYPE, DnsRecord, Record, Zone};
use crate::error::{Error, Result};

/// Outbound create/update payload
///
/// Built fresh for every mutation and never reused. Only the body fields
/// are serialized; `id` and `zone_id` address the request and travel in the
/// URL path.
///
/// [`sanitize`](Self::sanitize) must succeed before the request is handed
/// to a directory client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecordRequest {
    /// Present for updates only
    #[serde(skip)]
    pub id: Option<String>,
    #[serde(skip)]
    pub zone_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
    pub proxied: bool,
    pub priority: u16,
    pub ttl: u32,
}

impl DnsRecordRequest {
    /// Draft a create request for `desired` inside `zone`
    pub fn for_create(zone: &Zone, desired: &Record, content: impl Into<String>) -> Self {
        Self {
            id: None,
            zone_id: zone.id.clone(),
            name: desired.name.clone(),
            record_type: desired.record_type.clone(),
            content: content.into(),
            proxied: false,
            priority: DEFAULT_PRIORITY,
            ttl: desired.ttl,
        }
    }

    /// Draft an update of `existing` carrying new content and TTL
    ///
    /// Identity, type and proxy flag are taken from the existing record.
    pub fn for_update(existing: &DnsRecord, content: impl Into<String>, ttl: u32) -> Self {
        Self {
            id: Some(existing.id.clone()),
            zone_id: existing.zone_id.clone(),
            name: existing.name.clone(),
            record_type: existing.record_type.clone(),
            content: content.into(),
            proxied: existing.proxied,
            priority: DEFAULT_PRIORITY,
            ttl,
        }
    }

    /// Normalize and validate the request in place
    ///
    /// - type is trimmed and defaults to `A` when blank
    /// - content is trimmed and must not be empty
    /// - zone id must not be empty
    pub fn sanitize(&mut self) -> Result<()> {
        self.record_type = self.record_type.trim().to_string();
        if self.record_type.is_empty() {
            self.record_type = DEFAULT_RECORD_TYPE.to_string();
        }

        self.content = self.content.trim().to_string();
        if self.content.is_empty() {
            return Err(Error::validation("content cannot be empty"));
        }

        if self.zone_id.trim().is_empty() {
            return Err(Error::validation("zone id cannot be empty"));
        }

        Ok(())
    }
}
