//! Page signal extraction
//!
//! This module scans raw HTML for crawler-relevant markers:
//! - Robots meta directives addressed to search and AI crawlers
//! - The canonical link
//! - JSON-LD structured data blocks
//! - Content shape (landmark elements, script density, visible text)
//!
//! Extraction never fails; a missing signal is a valid outcome.

mod content;
mod tags;

pub use content::{ContentSignals, SCRIPT_HEAVY_THRESHOLD, THIN_TEXT_THRESHOLD};
pub use tags::TagAttributes;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use tags::opening_tags;

static META_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<meta\b[^>]*>").expect("valid meta regex"));
static LINK_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<link\b[^>]*>").expect("valid link regex"));
static SCRIPT_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<script\b[^>]*>").expect("valid script regex"));

/// `<meta name="...">` values whose directives are collected
pub const WATCHED_META_NAMES: [&str; 5] = ["robots", "googlebot", "bingbot", "perplexitybot", "claudebot"];

/// Everything the audit reads from a page body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSignals {
    /// Lowercased directive tokens from watched meta tags
    pub meta_directives: BTreeSet<String>,
    /// href of the first canonical link
    pub canonical_href: Option<String>,
    /// Number of `application/ld+json` script blocks
    pub json_ld_block_count: usize,
    pub content: ContentSignals,
}

/// Extracts all page signals from raw HTML
///
/// # Example
///
/// ```
/// use crawl_signal::signals::extract_signals;
///
/// let html = r#"<meta name="robots" content="noindex, nofollow"><h1>Hi</h1>"#;
/// let signals = extract_signals(html);
/// assert!(signals.meta_directives.contains("noindex"));
/// assert!(signals.content.has_h1);
/// ```
pub fn extract_signals(html: &str) -> PageSignals {
    PageSignals {
        meta_directives: extract_meta_directives(html),
        canonical_href: extract_canonical(html),
        json_ld_block_count: count_json_ld_blocks(html),
        content: ContentSignals::detect(html),
    }
}

/// Splits a directive list such as `"noindex, nofollow"` into lowercased tokens
pub fn split_directives(value: &str) -> BTreeSet<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Collects directives from every watched `<meta name=... content=...>` tag
pub fn extract_meta_directives(html: &str) -> BTreeSet<String> {
    let mut directives = BTreeSet::new();

    for attrs in opening_tags(&META_TAG, html) {
        let Some(name) = attrs.get("name") else {
            continue;
        };
        let name = name.trim().to_lowercase();
        if !WATCHED_META_NAMES.contains(&name.as_str()) {
            continue;
        }
        if let Some(content) = attrs.get("content") {
            directives.extend(split_directives(content));
        }
    }

    directives
}

/// Returns the href of the first `<link rel="canonical">` with a non-empty href
pub fn extract_canonical(html: &str) -> Option<String> {
    opening_tags(&LINK_TAG, html)
        .filter(|attrs| attrs.is("rel", "canonical"))
        .find_map(|attrs| {
            attrs
                .get("href")
                .map(str::trim)
                .filter(|href| !href.is_empty())
                .map(str::to_string)
        })
}

/// Counts `<script type="application/ld+json">` blocks
pub fn count_json_ld_blocks(html: &str) -> usize {
    opening_tags(&SCRIPT_TAG, html)
        .filter(|attrs| attrs.is("type", "application/ld+json"))
        .count()
}
