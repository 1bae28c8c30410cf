//! Cloudflare API v4 wire types

use serde::Deserialize;

/// Envelope wrapping every Cloudflare API response
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    pub result: Option<T>,
    pub result_info: Option<ResultInfo>,
}

impl<T> ApiResponse<T> {
    /// First reported error, or a placeholder if there is none
    pub fn error_summary(&self) -> String {
        self.errors
            .first()
            .map(ApiMessage::to_string)
            .unwrap_or_else(|| "request was not successful".to_string())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiMessage {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl std::fmt::Display for ApiMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Pagination block of list responses
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResultInfo {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub total_count: u32,
}

impl ResultInfo {
    /// Whether the provider holds more items than this page carried
    pub fn is_truncated(&self) -> bool {
        self.total_pages > self.page.max(1) || self.total_count > self.count
    }
}

/// Result of a record deletion
#[derive(Debug, Deserialize)]
pub(crate) struct DeletedRecord {
    pub id: String,
}
