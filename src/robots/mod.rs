//! Robots.txt handling module
//!
//! This module provides fetching, parsing and access resolution for
//! robots.txt files, and summarizes access for the AI crawler roster the
//! audit reports on.

mod parser;
mod resolver;

pub use parser::{parse_robots, Directive, RobotsDocument, RobotsGroup, RobotsRule};
pub use resolver::{evaluate, AccessDecision};

use crate::fetch::fetch_page;
use crate::{snippet, SignalError};
use reqwest::Client;

/// Crawlers whose access is reported by every audit, in report order
pub const AI_BOT_ROSTER: [&str; 4] = ["ClaudeBot", "GPTBot", "PerplexityBot", "Bingbot"];

/// Access summary for one crawler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotRobotsStatus {
    pub agent: String,
    pub decision: AccessDecision,
}

/// Builds the robots.txt URL for an origin
///
/// # Arguments
///
/// * `scheme` - URL scheme, normally `https`
/// * `authority` - Host, with `:port` when one was given explicitly
pub fn robots_url(scheme: &str, authority: &str) -> String {
    format!("{}://{}/robots.txt", scheme, authority)
}

/// Fetches robots.txt content
///
/// # Returns
///
/// * `Ok(String)` - The robots.txt body
/// * `Err(SignalError)` - Transport failure or HTTP status >= 400
pub async fn fetch_robots(client: &Client, url: &str) -> Result<String, SignalError> {
    let page = fetch_page(client, url).await?;

    if page.status >= 400 {
        return Err(SignalError::Http {
            status: page.status,
            body: snippet(&page.body, 500),
        });
    }

    tracing::debug!("Fetched robots.txt {} with status {}", url, page.status);
    Ok(page.body)
}

/// Resolves root-path access for every roster bot against a parsed document
pub fn summarize_document(document: &RobotsDocument) -> Vec<BotRobotsStatus> {
    AI_BOT_ROSTER
        .iter()
        .map(|agent| BotRobotsStatus {
            agent: agent.to_string(),
            decision: evaluate(agent, "/", document),
        })
        .collect()
}

/// Fetches robots.txt and summarizes roster access
///
/// Never fails: if the file cannot be fetched every bot is reported as
/// [`AccessDecision::Unknown`].
pub async fn summarize_access(client: &Client, url: &str) -> Vec<BotRobotsStatus> {
    match fetch_robots(client, url).await {
        Ok(content) => summarize_document(&parse_robots(&content)),
        Err(e) => {
            tracing::error!("Robots fetch failed for {}: {}", url, e);
            AI_BOT_ROSTER
                .iter()
                .map(|agent| BotRobotsStatus {
                    agent: agent.to_string(),
                    decision: AccessDecision::Unknown,
                })
                .collect()
        }
    }
}
