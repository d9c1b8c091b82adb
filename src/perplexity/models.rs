use serde::{Deserialize, Serialize};

/// One chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerplexityMessage {
    pub role: String,
    pub content: String,
}

impl PerplexityMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat-completions request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerplexityRequest {
    pub model: String,
    pub messages: Vec<PerplexityMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerplexityChoice {
    #[serde(default)]
    pub index: u32,
    pub message: PerplexityMessage,
}

/// Chat-completions response body; fields other than `choices` are ignored
#[derive(Debug, Clone, Deserialize)]
pub struct PerplexityResponse {
    pub choices: Vec<PerplexityChoice>,
}
