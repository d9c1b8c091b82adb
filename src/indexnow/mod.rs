//! IndexNow submission client
//!
//! Submits batches of URLs to an IndexNow endpoint so Bing and other
//! participating engines pick up fresh content. HTTP 429 responses are retried
//! with exponential backoff; every other failure is returned to the caller.

mod payload;
mod retry;

pub use payload::IndexNowPayload;
pub use retry::RetryPolicy;

use crate::config::IndexNowConfig;
use crate::fetch::network_error;
use crate::{snippet, SignalError};
use reqwest::{Client, StatusCode};

/// Client for one IndexNow endpoint
#[derive(Debug, Clone)]
pub struct IndexNowClient {
    client: Client,
    config: IndexNowConfig,
    retry: RetryPolicy,
}

impl IndexNowClient {
    pub fn new(client: Client, config: IndexNowConfig) -> Self {
        let retry = RetryPolicy::from(&config);
        Self {
            client,
            config,
            retry,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Resolves the payload and submits it
    ///
    /// # Arguments
    ///
    /// * `urls` - URLs to submit; unparseable entries are dropped
    /// * `host` - Payload host; derived from the first URL when absent
    /// * `api_key` - IndexNow key; falls back to configuration/`INDEXNOW_KEY`
    /// * `key_location` - Key file URL; falls back to configuration, then
    ///   `https://{host}/{key}.txt`
    ///
    /// # Returns
    ///
    /// A message stating how many URLs were submitted and the final status.
    pub async fn submit(
        &self,
        urls: &[String],
        host: Option<&str>,
        api_key: Option<&str>,
        key_location: Option<&str>,
    ) -> Result<String, SignalError> {
        let payload = IndexNowPayload::resolve(urls, host, api_key, key_location, &self.config)?;
        self.send(&payload).await
    }

    /// Posts a resolved payload, retrying on HTTP 429
    pub async fn send(&self, payload: &IndexNowPayload) -> Result<String, SignalError> {
        let endpoint = self.config.endpoint.as_str();
        let mut attempt = 0;

        loop {
            let response = self
                .client
                .post(endpoint)
                .json(payload)
                .send()
                .await
                .map_err(|source| network_error(endpoint, source))?;

            let status = response.status();
            let body = read_body(response, endpoint).await;

            if status == StatusCode::TOO_MANY_REQUESTS && attempt < self.retry.max_retries {
                let backoff = self.retry.delay_for(attempt);
                tracing::warn!(
                    "IndexNow rate limited (attempt {}). Backing off for {:?}",
                    attempt + 1,
                    backoff
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
                continue;
            }

            if status.is_success() {
                tracing::info!("IndexNow submission succeeded with status {}", status.as_u16());
                return Ok(format!(
                    "Submitted {} URLs to IndexNow (status {}).",
                    payload.url_list.len(),
                    status.as_u16()
                ));
            }

            tracing::error!(
                "IndexNow submission failed: status {} body: {}",
                status.as_u16(),
                snippet(&body, 200)
            );
            return Err(SignalError::Http {
                status: status.as_u16(),
                body: snippet(&body, 500),
            });
        }
    }
}

/// Reads a response body for error reporting; a failed read is logged and
/// yields an empty body
async fn read_body(response: reqwest::Response, endpoint: &str) -> String {
    match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Failed to read IndexNow response body from {}: {}", endpoint, e);
            String::new()
        }
    }
}
