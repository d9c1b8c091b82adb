//! GEO audit aggregation
//!
//! This module orchestrates one audit:
//! 1. Validate the URL (invalid → single critical issue, no requests)
//! 2. Fetch the page and translate status, headers and page signals
//! 3. Optionally fetch robots.txt and report access for the AI crawler roster
//! 4. Finalize the four report buckets
//!
//! A failure in either fetch is recorded in the report; the audit itself
//! always produces a complete report.

mod report;

pub use report::{AuditReport, NONE_NOTED, NO_GOOD_SIGNALS, NO_NEXT_ACTIONS};

use crate::fetch::{fetch_page, FetchedPage};
use crate::robots::{robots_url, summarize_access, AccessDecision, BotRobotsStatus};
use crate::signals::{extract_signals, split_directives};
use reqwest::Client;
use std::collections::BTreeSet;
use url::Url;

/// Directives reported as critical when present
const CRITICAL_DIRECTIVES: [&str; 1] = ["noindex"];

/// Directives reported as warnings, with a short consequence
const WARNING_DIRECTIVES: [(&str, &str); 3] = [
    ("nofollow", "; crawlers may ignore links"),
    ("nosnippet", "; snippets may be suppressed"),
    ("noarchive", ""),
];

/// Runs page audits with a shared HTTP client
#[derive(Debug, Clone)]
pub struct Auditor {
    client: Client,
    robots_scheme: String,
}

impl Auditor {
    /// Creates an auditor that fetches robots.txt over HTTPS
    pub fn new(client: Client) -> Self {
        Self {
            client,
            robots_scheme: "https".to_string(),
        }
    }

    /// Overrides the scheme used for the robots.txt request
    pub fn with_robots_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.robots_scheme = scheme.into();
        self
    }

    /// Audits a page and returns the finalized report
    ///
    /// # Arguments
    ///
    /// * `url` - The page URL as supplied by the caller
    /// * `check_robots` - Whether to fetch and evaluate robots.txt
    pub async fn audit(&self, url: &str, check_robots: bool) -> AuditReport {
        let parsed = match Url::parse(url.trim()) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Rejected audit of invalid URL {}: {}", url, e);
                let mut report = AuditReport::new();
                report.critical(format!("Invalid URL: {}", url));
                report.action("Provide a valid URL to audit.");
                return report.finalize();
            }
        };

        tracing::info!("Auditing {} (robots check: {})", parsed, check_robots);
        let mut report = AuditReport::new();

        match fetch_page(&self.client, parsed.as_str()).await {
            Ok(page) => review_page(&page, &mut report),
            Err(e) => {
                tracing::error!("Audit fetch failed for {}: {}", parsed, e);
                report.critical(format!("Failed to fetch page: {}", e));
                report.action("Verify the URL is reachable and not blocking requests.");
            }
        }

        if check_robots {
            if let Some(authority) = authority(&parsed) {
                let robots = robots_url(&self.robots_scheme, &authority);
                let statuses = summarize_access(&self.client, &robots).await;
                review_robots(&statuses, &mut report);
            }
        }

        report.finalize()
    }
}

/// Host plus explicit port, if any
fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Translates a fetched page into report entries
pub fn review_page(page: &FetchedPage, report: &mut AuditReport) {
    if !page.is_success() {
        report.critical(format!("HTTP status {} returned for the page.", page.status));
    }

    if let Some(content_type) = page.content_type() {
        if !content_type.to_lowercase().contains("html") {
            report.warn(format!("Content-Type is {}, not HTML.", content_type));
        }
    }

    let signals = extract_signals(&page.body);

    review_directives("Meta robots", &signals.meta_directives, report);
    if let Some(header) = page.headers.get("x-robots-tag") {
        review_directives("X-Robots-Tag header", &split_directives(header), report);
    }

    match &signals.canonical_href {
        Some(href) => report.good(format!("Canonical tag present: {}", href)),
        None => {
            report.warn("No canonical link tag detected.");
            report.action("Add a rel=\"canonical\" tag to declare the preferred URL.");
        }
    }

    if signals.json_ld_block_count > 0 {
        report.good(format!(
            "Found {} JSON-LD structured data block(s).",
            signals.json_ld_block_count
        ));
    } else {
        report.warn("No JSON-LD structured data detected.");
        report.action("Add JSON-LD structured data to improve entity understanding.");
    }

    let content = signals.content;
    if content.has_main {
        report.good("<main> element detected for primary content.");
    }
    if content.has_article {
        report.good("<article> element detected.");
    }
    if content.has_h1 {
        report.good("<h1> heading found.");
    } else {
        report.warn("No <h1> heading found; crawlers may lack a clear title.");
    }

    if content.is_script_heavy() {
        report.warn(
            "Page appears script-heavy with limited text; AI crawlers may struggle to extract content.",
        );
        report.action("Reduce reliance on client-side rendering or provide server-rendered fallbacks.");
    }
}

/// Maps indexing directives from one source onto report severities
fn review_directives(source: &str, directives: &BTreeSet<String>, report: &mut AuditReport) {
    for directive in CRITICAL_DIRECTIVES {
        if directives.contains(directive) {
            report.critical(format!("{} includes {}.", source, directive));
        }
    }
    for (directive, consequence) in WARNING_DIRECTIVES {
        if directives.contains(directive) {
            report.warn(format!("{} includes {}{}.", source, directive, consequence));
        }
    }
}

/// Translates roster access into report entries
pub fn review_robots(statuses: &[BotRobotsStatus], report: &mut AuditReport) {
    for status in statuses {
        match status.decision {
            AccessDecision::Blocked => {
                report.warn(format!("robots.txt blocks {} from the site.", status.agent));
                report.action(format!(
                    "Update robots.txt to allow {} if desired.",
                    status.agent
                ));
            }
            AccessDecision::Allowed => {
                report.good(format!("robots.txt allows {}.", status.agent));
            }
            AccessDecision::Unknown => {
                report.warn(format!(
                    "robots.txt access for {} is unknown (no matching group).",
                    status.agent
                ));
            }
        }
    }
}
