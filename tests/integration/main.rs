//! Integration tests for Crawl Signal
//!
//! These tests use wiremock to stand in for the audited site, the IndexNow
//! endpoint and the Perplexity API, and exercise each operation end-to-end.

mod audit_tests;
mod indexnow_tests;
mod perplexity_tests;

use crawl_signal::config::HttpConfig;
use crawl_signal::fetch::build_http_client;
use reqwest::Client;

/// Creates an HTTP client with a short timeout for tests
pub fn test_client() -> Client {
    let config = HttpConfig {
        timeout_secs: 5,
        ..HttpConfig::default()
    };
    build_http_client(&config).expect("Failed to build HTTP client")
}
