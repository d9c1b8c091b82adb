//! Typed tool arguments

use serde::{Deserialize, Deserializer};

/// Arguments of `submit_url_indexnow`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitUrlsRequest {
    #[serde(deserialize_with = "one_or_many")]
    pub urls: Vec<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub key_location: Option<String>,
}

/// Arguments of `check_perplexity_status`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerplexityStatusRequest {
    pub url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Arguments of `audit_page_for_geo`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditPageRequest {
    pub url: String,
    /// Absent or `null` means check robots.txt
    #[serde(default)]
    pub check_robots_txt: Option<bool>,
}

impl AuditPageRequest {
    pub fn check_robots(&self) -> bool {
        self.check_robots_txt.unwrap_or(true)
    }
}

/// Accepts either `"url"` or `["url", ...]`
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(url) => vec![url],
        OneOrMany::Many(urls) => urls,
    })
}
