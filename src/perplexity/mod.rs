//! Perplexity reachability probe
//!
//! Asks Perplexity to summarize a URL and to say explicitly when it could not
//! retrieve it, which surfaces robots blocks, paywalls and 404s as seen by a
//! live answer engine.

mod models;

pub use models::{PerplexityChoice, PerplexityMessage, PerplexityRequest, PerplexityResponse};

use crate::config::{PerplexityConfig, DEFAULT_PERPLEXITY_MODEL};
use crate::fetch::network_error;
use crate::{snippet, SignalError};
use reqwest::Client;
use url::Url;

/// Client for the Perplexity chat-completions API
#[derive(Debug, Clone)]
pub struct PerplexityClient {
    client: Client,
    config: PerplexityConfig,
}

impl PerplexityClient {
    pub fn new(client: Client, config: PerplexityConfig) -> Self {
        Self { client, config }
    }

    /// Requests a summary of `url` and returns the model's answer
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - `url` does not parse
    /// * `MissingCredential` - no key from argument, configuration or `PERPLEXITY_API_KEY`
    /// * `Http` - non-2xx response
    /// * `Decoding` - malformed body or no choices
    pub async fn check(
        &self,
        url: &str,
        api_key: Option<&str>,
        model: Option<&str>,
    ) -> Result<String, SignalError> {
        let target = Url::parse(url.trim())
            .map_err(|e| SignalError::InvalidInput(format!("Invalid URL {}: {}", url, e)))?;

        let key = pick(api_key, self.config.api_key.as_deref())
            .ok_or_else(|| SignalError::MissingCredential("Perplexity".to_string()))?;
        let model = pick(model, self.config.model.as_deref()).unwrap_or(DEFAULT_PERPLEXITY_MODEL);

        let request = PerplexityRequest {
            model: model.to_string(),
            messages: vec![PerplexityMessage::user(prompt_for(&target))],
        };

        let endpoint = self.config.endpoint.as_str();
        let response = self
            .client
            .post(endpoint)
            .bearer_auth(key)
            .json(&request)
            .send()
            .await
            .map_err(|source| network_error(endpoint, source))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| network_error(endpoint, source))?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes);
            tracing::error!(
                "Perplexity call failed (status {}): {}",
                status.as_u16(),
                snippet(&body, 200)
            );
            return Err(SignalError::Http {
                status: status.as_u16(),
                body: snippet(&body, 500),
            });
        }

        let decoded: PerplexityResponse = serde_json::from_slice(&bytes)
            .map_err(|e| SignalError::Decoding(e.to_string()))?;

        let answer = decoded
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| SignalError::Decoding("No choices returned".to_string()))?;

        tracing::info!("Perplexity check completed for {} using {}", target, model);
        Ok(answer)
    }
}

fn pick<'a>(argument: Option<&'a str>, fallback: Option<&'a str>) -> Option<&'a str> {
    argument
        .filter(|v| !v.trim().is_empty())
        .or_else(|| fallback.filter(|v| !v.trim().is_empty()))
}

fn prompt_for(url: &Url) -> String {
    format!(
        "Access and summarize this URL, explicitly noting if access fails (robots, paywall, 404, or blocked crawler). URL: {}. Include whether the content was retrievable.",
        url
    )
}
