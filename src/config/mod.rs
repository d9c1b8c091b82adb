//! Configuration module for Crawl Signal
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file and overlaying credential fallbacks from the environment.
//!
//! # Example
//!
//! ```no_run
//! use crawl_signal::config::resolve_config;
//! use std::path::Path;
//!
//! let config = resolve_config(Some(Path::new("crawl-signal.toml"))).unwrap();
//! println!("IndexNow endpoint: {}", config.indexnow.endpoint);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, HttpConfig, IndexNowConfig, LoggingConfig, PerplexityConfig,
    DEFAULT_INDEXNOW_ENDPOINT, DEFAULT_PERPLEXITY_ENDPOINT, DEFAULT_PERPLEXITY_MODEL,
};

// Re-export parser functions
pub use parser::{
    load_config, resolve_config, ENV_INDEXNOW_KEY, ENV_INDEXNOW_KEY_LOCATION,
    ENV_PERPLEXITY_API_KEY, ENV_PERPLEXITY_MODEL,
};
pub use validation::validate;
