use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default IndexNow submission endpoint
pub const DEFAULT_INDEXNOW_ENDPOINT: &str = "https://api.indexnow.org/indexnow";

/// Default Perplexity chat-completions endpoint
pub const DEFAULT_PERPLEXITY_ENDPOINT: &str = "https://api.perplexity.ai/chat/completions";

/// Model used when neither the caller nor the environment names one
pub const DEFAULT_PERPLEXITY_MODEL: &str = "sonar-pro";

/// Main configuration structure for Crawl Signal
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub indexnow: IndexNowConfig,
    #[serde(default)]
    pub perplexity: PerplexityConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Outbound HTTP configuration shared by every client
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// IndexNow submission configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IndexNowConfig {
    #[serde(default = "default_indexnow_endpoint")]
    pub endpoint: String,

    /// Fallback key when the caller supplies none
    #[serde(default)]
    pub key: Option<String>,

    /// Fallback key file location when the caller supplies none
    #[serde(rename = "key-location", default)]
    pub key_location: Option<String>,

    /// Additional attempts after an HTTP 429
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// First backoff delay; doubles on every retry
    #[serde(rename = "base-delay-ms", default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl Default for IndexNowConfig {
    fn default() -> Self {
        Self {
            endpoint: default_indexnow_endpoint(),
            key: None,
            key_location: None,
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

/// Perplexity status-check configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PerplexityConfig {
    #[serde(default = "default_perplexity_endpoint")]
    pub endpoint: String,

    #[serde(rename = "api-key", default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub model: Option<String>,
}

impl Default for PerplexityConfig {
    fn default() -> Self {
        Self {
            endpoint: default_perplexity_endpoint(),
            api_key: None,
            model: None,
        }
    }
}

/// Log sink configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Log file path; defaults to `crawlsignal.log` in the home directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl LoggingConfig {
    /// Returns the configured log path or the default location
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            directories::BaseDirs::new()
                .map(|dirs| dirs.home_dir().join("crawlsignal.log"))
                .unwrap_or_else(|| PathBuf::from("crawlsignal.log"))
        })
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("CrawlSignal/{}", env!("CARGO_PKG_VERSION"))
}

fn default_indexnow_endpoint() -> String {
    DEFAULT_INDEXNOW_ENDPOINT.to_string()
}

fn default_max_retries() -> u32 {
    4
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_perplexity_endpoint() -> String {
    DEFAULT_PERPLEXITY_ENDPOINT.to_string()
}
