use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Environment variable holding the default IndexNow key
pub const ENV_INDEXNOW_KEY: &str = "INDEXNOW_KEY";

/// Environment variable holding the default IndexNow key file location
pub const ENV_INDEXNOW_KEY_LOCATION: &str = "INDEXNOW_KEY_LOCATION";

/// Environment variable holding the default Perplexity API key
pub const ENV_PERPLEXITY_API_KEY: &str = "PERPLEXITY_API_KEY";

/// Environment variable holding the default Perplexity model
pub const ENV_PERPLEXITY_MODEL: &str = "PERPLEXITY_MODEL";

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use crawl_signal::config::load_config;
///
/// let config = load_config(Path::new("crawl-signal.toml")).unwrap();
/// println!("Timeout: {}s", config.http.timeout_secs);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Resolves the effective configuration for a process
///
/// Reads `path` when given (defaults otherwise), overlays the process
/// environment and validates the result.
pub fn resolve_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    config.apply_env(|name| std::env::var(name).ok());
    validate(&config)?;
    Ok(config)
}

impl Config {
    /// Overlays credential fallbacks from the environment
    ///
    /// Environment values win over the file. Empty values are ignored so an
    /// exported-but-blank variable does not mask a configured key.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = non_empty(ENV_INDEXNOW_KEY) {
            self.indexnow.key = Some(key);
        }
        if let Some(location) = non_empty(ENV_INDEXNOW_KEY_LOCATION) {
            self.indexnow.key_location = Some(location);
        }
        if let Some(key) = non_empty(ENV_PERPLEXITY_API_KEY) {
            self.perplexity.api_key = Some(key);
        }
        if let Some(model) = non_empty(ENV_PERPLEXITY_MODEL) {
            self.perplexity.model = Some(model);
        }
    }
}
