use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A DNS zone hosted by the provider
///
/// Zones are read-only here: they are listed and matched by name, never
/// created, modified or deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Zone {
    /// Provider-assigned identifier
    pub id: String,
    /// Human readable name, unique within the account
    pub name: String,
    pub status: String,
    pub paused: bool,
    #[serde(rename = "type")]
    pub zone_type: String,
    pub development_mode: i64,
    pub name_servers: Vec<String>,
    pub original_name_servers: Option<Vec<String>>,
    pub original_registrar: Option<String>,
    pub created_on: Option<DateTime<Utc>>,
    pub modified_on: Option<DateTime<Utc>>,
    pub activated_on: Option<DateTime<Utc>>,
}

impl Zone {
    /// Create a zone with only an id and a name (other fields defaulted)
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}
