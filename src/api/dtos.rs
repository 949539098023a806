use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

/// Stable boundary messages. Internal error details are never echoed except
/// through the generic unexpected-error path.
pub const MSG_INVALID_URL: &str = "Invalid or missing URL. Must start with http:// or https://";
pub const MSG_MALFORMED_URL: &str = "Malformed URL.";
pub const MSG_FETCH_FAILED: &str =
    "Failed to fetch or parse the page. It may be unavailable or JavaScript-heavy.";
pub const MSG_NO_CONTENT: &str = "No extractable content found on the page.";
pub const MSG_BUSY: &str = "Server is busy. Please retry shortly.";

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExtractRequest {
    /// Absolute http(s) URL of the page to summarize.
    pub url: Option<String>,
}

impl ExtractRequest {
    /// Boundary validation, performed before the core is invoked: the URL
    /// must be present, absolute, and http(s).
    pub fn validate(&self) -> Result<(), String> {
        let url = match self.url.as_deref() {
            Some(u) if !u.trim().is_empty() => u.trim(),
            _ => return Err(MSG_INVALID_URL.to_string()),
        };
        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
            _ => Err(MSG_INVALID_URL.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    pub summary: String,
    #[serde(rename = "keyPoints")]
    pub key_points: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
