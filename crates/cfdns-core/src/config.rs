//! Configuration types for the cfdns system
//!
//! Every invocation builds these values explicitly and passes them down;
//! nothing is shared process-wide.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::model::{DEFAULT_RECORD_TYPE, DEFAULT_TTL, Record};
use crate::normalize::normalize_record_name;

/// Cloudflare API v4 base URL
pub const CLOUDFLARE_API_V4: &str = "https://api.cloudflare.com/client/v4/";

/// Public IP lookup service used when none is configured
pub const DEFAULT_IP_LOOKUP_URL: &str = "https://ifconfig.co";

/// Directory client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API token (never logged)
    pub api_token: String,
}

impl ClientConfig {
    /// Configuration for the public Cloudflare API
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_url: default_api_url(),
            api_token: api_token.into(),
        }
    }

    /// Point the client at another base URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Validate the client configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.api_token.trim().is_empty() {
            return Err(crate::Error::config("API token cannot be empty"));
        }
        if !self.api_url.starts_with("https://") && !self.api_url.starts_with("http://") {
            return Err(crate::Error::config(format!(
                "API URL must use HTTP or HTTPS scheme. Got: {}",
                self.api_url
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &"<REDACTED>")
            .finish()
    }
}

/// Public IP discovery configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpLookupConfig {
    /// URL answering with the caller's public IP as plain text
    #[serde(default = "default_ip_lookup_url")]
    pub url: String,

    /// Request timeout (in seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How long a discovered IP is reused (in seconds)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl IpLookupConfig {
    /// Validate the lookup configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.url.is_empty() {
            return Err(crate::Error::config("IP lookup URL cannot be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(crate::Error::config("IP lookup timeout must be > 0"));
        }
        if self.cache_ttl_secs == 0 {
            return Err(crate::Error::config("IP cache TTL must be > 0"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for IpLookupConfig {
    fn default() -> Self {
        Self {
            url: default_ip_lookup_url(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

/// A batch of records sharing one zone and one desired state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Zone the records live in
    pub zone_name: String,

    /// Record names, bare labels or fully qualified
    pub names: Vec<String>,

    /// Record type
    #[serde(default = "default_record_type")]
    pub record_type: String,

    /// Explicit content; discovered when absent
    #[serde(default)]
    pub ip: Option<String>,

    /// DNS TTL (in seconds)
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

impl RecordSet {
    /// Create a record set with default type and TTL
    pub fn new(zone_name: impl Into<String>, names: Vec<String>) -> Self {
        Self {
            zone_name: zone_name.into(),
            names,
            record_type: default_record_type(),
            ip: None,
            ttl: default_ttl(),
        }
    }

    /// Validate the record set
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.zone_name.trim().is_empty() {
            return Err(crate::Error::config("Zone name cannot be empty"));
        }
        if self.names.iter().all(|name| name.trim().is_empty()) {
            return Err(crate::Error::config("At least one record name is required"));
        }
        Ok(())
    }

    /// One desired [`Record`] per non-blank name, qualified under the zone
    pub fn records(&self) -> Vec<Record> {
        self.names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(|name| Record {
                zone_name: self.zone_name.clone(),
                name: normalize_record_name(&self.zone_name, name),
                record_type: self.record_type.clone(),
                ip: self.ip.clone(),
                ttl: self.ttl,
            })
            .collect()
    }
}

/// Read an API token from a file that only its owner can read
///
/// The file must be a regular file granting no permissions to group or
/// others (checked on Unix). Surrounding whitespace is removed.
pub fn read_token_file(path: impl AsRef<Path>) -> Result<String, crate::Error> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path)?;

    if !metadata.is_file() {
        return Err(crate::Error::config(format!(
            "Token path is not a regular file: {}",
            path.display()
        )));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mode = metadata.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            return Err(crate::Error::config(format!(
                "Token file {} has invalid permissions {:o}; it must not be accessible by group or others (try chmod 600)",
                path.display(),
                mode
            )));
        }
    }

    let token = std::fs::read_to_string(path)?.trim().to_string();
    if token.is_empty() {
        return Err(crate::Error::config(format!(
            "Token file is empty: {}",
            path.display()
        )));
    }

    Ok(token)
}

fn default_api_url() -> String {
    CLOUDFLARE_API_V4.to_string()
}

fn default_ip_lookup_url() -> String {
    DEFAULT_IP_LOOKUP_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_record_type() -> String {
    DEFAULT_RECORD_TYPE.to_string()
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn client_config_requires_token() {
        assert!(ClientConfig::new("").validate().is_err());
        assert!(ClientConfig::new("   ").validate().is_err());
        assert!(ClientConfig::new("abc").validate().is_ok());
        assert!(
            ClientConfig::new("abc")
                .with_api_url("ftp://example.com")
                .validate()
                .is_err()
        );
    }

    #[test]
    fn client_config_debug_hides_token() {
        let debug = format!("{:?}", ClientConfig::new("secret_token_12345"));
        assert!(!debug.contains("secret_token_12345"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn ip_lookup_defaults() {
        let config: IpLookupConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, IpLookupConfig::default());
        assert_eq!(config.url, "https://ifconfig.co");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());

        let zero_ttl = IpLookupConfig {
            cache_ttl_secs: 0,
            ..IpLookupConfig::default()
        };
        assert!(zero_ttl.validate().is_err());
    }

    #[test]
    fn record_set_qualifies_names() {
        let mut set = RecordSet::new(
            "example.com",
            vec![
                "host1".to_string(),
                "host2.example.com".to_string(),
                " ".to_string(),
            ],
        );
        set.ip = Some("192.0.2.10".to_string());
        set.ttl = 120;

        let records = set.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "host1.example.com");
        assert_eq!(records[1].name, "host2.example.com");
        assert!(records.iter().all(|r| r.zone_name == "example.com"));
        assert!(records.iter().all(|r| r.ttl == 120 && r.record_type == "A"));
        assert_eq!(records[0].explicit_content(), Some("192.0.2.10"));
    }

    #[test]
    fn record_set_requires_zone_and_names() {
        assert!(RecordSet::new("", vec!["host1".to_string()]).validate().is_err());
        assert!(RecordSet::new("example.com", vec![]).validate().is_err());
        assert!(
            RecordSet::new("example.com", vec!["host1".to_string()])
                .validate()
                .is_ok()
        );
    }

    #[cfg(unix)]
    fn token_file(contents: &str, mode: u32) -> tempfile::NamedTempFile {
        use std::os::unix::fs::PermissionsExt;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(mode)).unwrap();
        file
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_read_and_trimmed() {
        let file = token_file("  abcdef123456\n", 0o600);
        assert_eq!(read_token_file(file.path()).unwrap(), "abcdef123456");

        let read_only = token_file("abcdef123456", 0o400);
        assert_eq!(read_token_file(read_only.path()).unwrap(), "abcdef123456");
    }

    #[cfg(unix)]
    #[test]
    fn token_file_readable_by_others_is_rejected() {
        for mode in [0o644, 0o640, 0o604, 0o666] {
            let file = token_file("abcdef123456", mode);
            let err = read_token_file(file.path()).unwrap_err();
            assert!(matches!(err, crate::Error::Config(_)), "mode {:o}", mode);
        }
    }

    #[cfg(unix)]
    #[test]
    fn empty_token_file_is_rejected() {
        let file = token_file("\n", 0o600);
        assert!(matches!(
            read_token_file(file.path()),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn missing_token_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_token_file(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
