// # Cloudflare Directory Client
//
// Implements `DnsClient` on top of the Cloudflare API v4.
//
// ## Behavior
//
// - One HTTP request per trait call, bearer-token authenticated
// - 30 second timeout on every request
// - Non-2xx responses become `Error::Status` carrying the body
// - `success: false` envelopes and missing results become `Error::Api`
// - Only the first page of a listing is used; truncation is logged
// - NO retry logic (a failed call surfaces immediately)
// - NO caching of listings
//
// ## Security Requirements
//
// - API token NEVER appears in logs or Debug output
// - An empty token is a configuration error
//
// ## API Reference
//
// - List Zones: GET `/zones`
// - List DNS Records: GET `/zones/:zone_id/dns_records`
// - Create DNS Record: POST `/zones/:zone_id/dns_records`
// - Update DNS Record: PUT `/zones/:zone_id/dns_records/:record_id`
// - Delete DNS Record: DELETE `/zones/:zone_id/dns_records/:record_id`

mod types;

use async_trait::async_trait;
use cfdns_core::model::{DnsRecord, DnsRecordRequest, Zone};
use cfdns_core::traits::{DnsClient, StringRetriever};
use cfdns_core::{ClientConfig, Error, Result};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use types::{ApiResponse, DeletedRecord};

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Cloudflare API v4 client
///
/// Stateless apart from its configuration: every call maps to exactly one
/// request. The public IP is delegated to the injected retriever so callers
/// decide how (and how long) it is cached.
///
/// # Security
///
/// The Debug implementation does NOT expose the API token.
pub struct CloudflareClient {
    /// Base URL, always ending in `/`
    api_url: String,

    /// ⚠️ NEVER log this value
    api_token: String,

    http: reqwest::Client,

    ip: Arc<dyn StringRetriever>,
}

impl std::fmt::Debug for CloudflareClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareClient")
            .field("api_url", &self.api_url)
            .field("api_token", &"<REDACTED>")
            .finish()
    }
}

impl CloudflareClient {
    /// Create a client from its configuration and a public IP source
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the token is empty or the URL is not HTTP(S),
    /// [`Error::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, ip: Arc<dyn StringRetriever>) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::transport(format!("Failed to build HTTP client: {}", e)))?;

        let mut api_url = config.api_url.trim().to_string();
        if !api_url.ends_with('/') {
            api_url.push('/');
        }

        Ok(Self {
            api_url,
            api_token: config.api_token.trim().to_string(),
            http,
            ip,
        })
    }

    /// Base URL requests are joined onto
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Join a path onto the base URL with exactly one separator
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Send one request and decode the response envelope
    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&DnsRecordRequest>,
    ) -> Result<ApiResponse<T>> {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), url.as_str())
            .bearer_auth(&self.api_token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(format!("{} {} failed: {}", method, url, e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            tracing::warn!("{} {} answered {}: {}", method, url, status, describe(status));
            return Err(Error::status(status.as_u16(), text));
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&text)
            .map_err(|e| Error::api(format!("Failed to parse response: {}", e)))?;

        if !envelope.success {
            return Err(Error::api(envelope.error_summary()));
        }

        Ok(envelope)
    }

    /// Fetch the first page of a listing
    async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let envelope = self.call::<Vec<T>>(Method::GET, path, None).await?;

        if let Some(info) = envelope.result_info.as_ref().filter(|info| info.is_truncated()) {
            tracing::warn!(
                "Listing {} is paginated ({} of {} item(s), {} page(s)); only the first page is used",
                path,
                info.count,
                info.total_count,
                info.total_pages
            );
        }

        envelope
            .result
            .ok_or_else(|| Error::api(format!("Response to {} has no result", path)))
    }

    /// Send a mutation and return the record the provider answered with
    async fn mutate(
        &self,
        method: Method,
        path: &str,
        request: &DnsRecordRequest,
    ) -> Result<DnsRecord> {
        let envelope = self.call::<DnsRecord>(method, path, Some(request)).await?;
        envelope
            .result
            .ok_or_else(|| Error::api(format!("Response to {} has no result", path)))
    }
}

/// Short description of a failure status for logs
fn describe(status: StatusCode) -> &'static str {
    match status.as_u16() {
        401 | 403 => "authentication failed (invalid token or insufficient permissions)",
        404 => "not found",
        409 => "conflict",
        429 => "rate limited",
        500..=599 => "server error",
        _ => "request rejected",
    }
}

/// Reject requests that cannot address a record
fn require_zone(request: &DnsRecordRequest) -> Result<&str> {
    let zone_id = request.zone_id.trim();
    if zone_id.is_empty() {
        return Err(Error::validation("zone id cannot be empty"));
    }
    Ok(zone_id)
}

#[async_trait]
impl DnsClient for CloudflareClient {
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        self.list("zones").await
    }

    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        self.list(&format!("zones/{}/dns_records", zone_id)).await
    }

    async fn create_record(&self, request: &DnsRecordRequest) -> Result<DnsRecord> {
        let zone_id = require_zone(request)?;
        tracing::info!(
            "Creating {} record {} -> {}",
            request.record_type,
            request.name,
            request.content
        );
        self.mutate(
            Method::POST,
            &format!("zones/{}/dns_records", zone_id),
            request,
        )
        .await
    }

    async fn update_record(&self, request: &DnsRecordRequest) -> Result<DnsRecord> {
        let zone_id = require_zone(request)?;
        let record_id = request
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::validation("record id is required for an update"))?;

        tracing::info!(
            "Updating {} record {} ({}) -> {}",
            request.record_type,
            request.name,
            record_id,
            request.content
        );
        self.mutate(
            Method::PUT,
            &format!("zones/{}/dns_records/{}", zone_id, record_id),
            request,
        )
        .await
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<String> {
        if zone_id.trim().is_empty() || record_id.trim().is_empty() {
            return Err(Error::validation("zone id and record id are required for a delete"));
        }

        tracing::info!("Deleting record {} from zone {}", record_id, zone_id);
        let envelope = self
            .call::<DeletedRecord>(
                Method::DELETE,
                &format!("zones/{}/dns_records/{}", zone_id, record_id),
                None,
            )
            .await?;

        envelope
            .result
            .map(|deleted| deleted.id)
            .ok_or_else(|| Error::api("Delete response has no result"))
    }

    async fn external_ip(&self) -> Result<String> {
        self.ip.get().await
    }
}
