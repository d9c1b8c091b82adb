//! HTTP fetch layer
//!
//! This module handles the outbound requests the audit needs:
//! - Building the shared HTTP client with timeout and user agent
//! - GET requests returning status, normalized headers and body
//! - Error classification into [`SignalError`]

use crate::config::HttpConfig;
use crate::SignalError;
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::collections::HashMap;

/// Response headers keyed by lowercased name
///
/// Built once per response. Repeated headers are joined with `", "` so a
/// directive split across several `X-Robots-Tag` lines is still seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    entries: HashMap<String, String>,
}

impl ResponseHeaders {
    /// Looks up a header by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Inserts a header, appending to any existing value
    pub fn insert(&mut self, name: &str, value: &str) {
        self.entries
            .entry(name.to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<&HeaderMap> for ResponseHeaders {
    fn from(map: &HeaderMap) -> Self {
        let mut headers = Self::default();
        for (name, value) in map {
            headers.insert(name.as_str(), &String::from_utf8_lossy(value.as_bytes()));
        }
        headers
    }
}

/// A fetched HTTP response of any status
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code
    pub status: u16,
    /// Normalized response headers
    pub headers: ResponseHeaders,
    /// Body decoded as UTF-8, invalid sequences replaced
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type")
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use crawl_signal::config::HttpConfig;
/// use crawl_signal::fetch::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout())
        .connect_timeout(config.timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with GET
///
/// Non-2xx responses are returned, not treated as errors; callers decide what
/// a status means. Only transport failures produce `Err`.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage, SignalError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| network_error(url, source))?;

    let status = response.status().as_u16();
    let headers = ResponseHeaders::from(response.headers());
    let bytes = response
        .bytes()
        .await
        .map_err(|source| network_error(url, source))?;

    tracing::debug!("Fetched {} with status {} ({} bytes)", url, status, bytes.len());

    Ok(FetchedPage {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

/// Classifies a transport error for `url`
pub(crate) fn network_error(url: &str, source: reqwest::Error) -> SignalError {
    if source.is_timeout() {
        tracing::warn!("Request timeout for {}", url);
    } else if source.is_connect() {
        tracing::warn!("Connection failed for {}", url);
    }
    SignalError::Network {
        url: url.to_string(),
        source,
    }
}
