use crate::fetcher::{decode::decode_body, errors::FetchError, types::PageResponse};
use bytes::BytesMut;
use chrono::Utc;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::instrument;

const USER_AGENT: &str = "DistillBot/0.1";

/// Network limits for a fetch. All values are tunable; defaults follow the
/// service contract (5s connect, 15s total, 5 MB body, 5 redirect hops).
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_body_bytes: u64,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
            max_body_bytes: 5 * 1024 * 1024,
            max_redirects: 5,
        }
    }
}

pub fn build_client(config: &FetchConfig) -> Client {
    ClientBuilder::new()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .default_headers({
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                    .parse()
                    .unwrap(),
            );
            headers
        })
        .build()
        .expect("Failed to build HTTP client")
}

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| build_client(&FetchConfig::default()));

/// Fetch with the shared default client and default limits.
pub async fn fetch(url: &str) -> Result<PageResponse, FetchError> {
    fetch_with(&HTTP_CLIENT, &FetchConfig::default(), url).await
}

#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_with(
    client: &Client,
    config: &FetchConfig,
    url: &str,
) -> Result<PageResponse, FetchError> {
    let parsed_url = url::Url::parse(url)?;

    // Scheme validation happens before any network traffic.
    match parsed_url.scheme() {
        "http" | "https" => {}
        other => return Err(FetchError::UnsupportedScheme(other.to_string())),
    }

    let mut response = client
        .get(parsed_url)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    // Check the advertised length before downloading anything
    if let Some(content_length) = response.content_length()
        && content_length > config.max_body_bytes
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http {
            status,
            retriable: status.is_server_error(),
        });
    }

    let url_final = response.url().clone();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    // Only HTML is extractable
    if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    // Stream the body so a missing/lying Content-Length cannot make us read
    // past the size limit.
    let mut body = BytesMut::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(FetchError::from_reqwest_error)?
    {
        let total = (body.len() + chunk.len()) as u64;
        if total > config.max_body_bytes {
            return Err(FetchError::BodyTooLarge(total));
        }
        body.extend_from_slice(&chunk);
    }
    let body = body.freeze();

    let (body_utf8, charset) = decode_body(&content_type, &body)?;

    Ok(PageResponse {
        url_final,
        status,
        content_type,
        body_raw: body,
        body_utf8,
        charset,
        fetched_at: Utc::now(),
    })
}
