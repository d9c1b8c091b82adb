//! Crawl Signal: AI crawler visibility checks
//!
//! This crate audits whether a page and its site-wide robots policy are
//! favorable to AI and search crawlers, submits URLs to IndexNow, and probes
//! Perplexity for live reachability. The operations are exposed through a small
//! tool registry consumed by an external dispatch shell or the bundled CLI.

pub mod audit;
pub mod config;
pub mod fetch;
pub mod indexnow;
pub mod logging;
pub mod perplexity;
pub mod robots;
pub mod signals;
pub mod tools;

use thiserror::Error;

/// Main error type for Crawl Signal operations
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing API key for {0}. Provide via argument or environment variable.")]
    MissingCredential(String),

    #[error("HTTP error (status {status}): {body}")]
    Http { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decoding(String),

    #[error("Request to {url} failed: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Crawl Signal operations
pub type Result<T> = std::result::Result<T, SignalError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Truncates `text` to at most `max_chars` characters.
pub(crate) fn snippet(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

// Re-export commonly used types
pub use audit::{AuditReport, Auditor};
pub use config::Config;
pub use indexnow::{IndexNowClient, IndexNowPayload};
pub use perplexity::PerplexityClient;
pub use robots::{evaluate, parse_robots, AccessDecision, RobotsDocument};
pub use signals::{extract_signals, ContentSignals, PageSignals};
pub use tools::{ToolCallResult, ToolRegistry};
