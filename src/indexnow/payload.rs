//! IndexNow request body and argument resolution

use crate::config::IndexNowConfig;
use crate::SignalError;
use serde::{Deserialize, Serialize};
use url::Url;

/// JSON body of an IndexNow bulk submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexNowPayload {
    pub host: String,
    pub key: String,
    pub key_location: String,
    pub url_list: Vec<String>,
}

impl IndexNowPayload {
    /// Resolves a payload from caller arguments and configured fallbacks
    ///
    /// # Resolution order
    ///
    /// | Field | Order |
    /// |-------|-------|
    /// | urls | every string that parses as a URL; none → `InvalidInput` |
    /// | host | argument → host of the first valid URL → `InvalidInput` |
    /// | key | argument → configured/env key → `MissingCredential` |
    /// | keyLocation | argument → configured/env location → `https://{host}/{key}.txt` |
    ///
    /// Empty strings count as absent.
    pub fn resolve(
        urls: &[String],
        host: Option<&str>,
        api_key: Option<&str>,
        key_location: Option<&str>,
        config: &IndexNowConfig,
    ) -> Result<Self, SignalError> {
        let valid: Vec<(&str, Url)> = urls
            .iter()
            .map(|raw| raw.trim())
            .filter_map(|raw| Url::parse(raw).ok().map(|url| (raw, url)))
            .collect();

        if valid.is_empty() {
            return Err(SignalError::InvalidInput("No valid URLs provided".to_string()));
        }
        if valid.len() < urls.len() {
            tracing::debug!("Dropped {} unparseable URL(s)", urls.len() - valid.len());
        }

        let host = non_empty(host)
            .map(str::to_string)
            .or_else(|| valid[0].1.host_str().map(str::to_string))
            .ok_or_else(|| {
                SignalError::InvalidInput("Missing host; unable to derive from URL".to_string())
            })?;

        let key = non_empty(api_key)
            .or_else(|| non_empty(config.key.as_deref()))
            .map(str::to_string)
            .ok_or_else(|| SignalError::MissingCredential("IndexNow".to_string()))?;

        let key_location = non_empty(key_location)
            .or_else(|| non_empty(config.key_location.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("https://{}/{}.txt", host, key));

        Ok(Self {
            host,
            key,
            key_location,
            url_list: valid.into_iter().map(|(raw, _)| raw.to_string()).collect(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
