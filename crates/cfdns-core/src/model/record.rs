use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DEFAULT_RECORD_TYPE, DEFAULT_TTL};

/// A DNS record as reported by the remote directory
///
/// Existence is defined entirely by the remote side; nothing is persisted
/// locally between invocations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsRecord {
    pub id: String,
    pub zone_id: String,
    pub zone_name: String,
    /// Fully-qualified record name
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
    pub proxiable: bool,
    pub proxied: bool,
    pub ttl: u32,
    pub locked: bool,
    pub created_on: Option<DateTime<Utc>>,
    pub modified_on: Option<DateTime<Utc>>,
    /// Provider-specific metadata, kept opaque
    pub meta: Option<serde_json::Value>,
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ttl={} proxied={} id={} zone={}",
            self.record_type, self.name, self.content, self.ttl, self.proxied, self.id, self.zone_id
        )
    }
}

/// Desired state of a single record, as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Name of the zone the record lives in
    pub zone_name: String,
    /// Record name, matched exactly against the remote listing
    pub name: String,
    /// Desired record type; blank means the host-address type
    #[serde(default = "default_record_type")]
    pub record_type: String,
    /// Explicit content; when absent the public IP is discovered
    #[serde(default)]
    pub ip: Option<String>,
    /// Desired DNS TTL in seconds
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

impl Record {
    /// Create a desired A record with the default TTL and discovered content
    pub fn new(zone_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            zone_name: zone_name.into(),
            name: name.into(),
            record_type: default_record_type(),
            ip: None,
            ttl: DEFAULT_TTL,
        }
    }

    /// Pin the record content instead of discovering it
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    /// Set the DNS TTL
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the record type
    pub fn with_record_type(mut self, record_type: impl Into<String>) -> Self {
        self.record_type = record_type.into();
        self
    }

    /// The explicit content value, if one was given and is non-empty
    pub fn explicit_content(&self) -> Option<&str> {
        self.ip.as_deref().filter(|ip| !ip.is_empty())
    }
}

fn default_record_type() -> String {
    DEFAULT_RECORD_TYPE.to_string()
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}
