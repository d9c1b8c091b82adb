//! Content-shape heuristics

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<script\b").expect("valid script regex"));
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

/// Pages with more scripts than this are candidates for the client-rendering warning
pub const SCRIPT_HEAVY_THRESHOLD: usize = 30;

/// ...when their visible text is shorter than this many characters
pub const THIN_TEXT_THRESHOLD: usize = 800;

/// Structural snapshot of one page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentSignals {
    pub has_main: bool,
    pub has_article: bool,
    pub has_h1: bool,
    pub script_tag_count: usize,
    pub visible_text_length: usize,
}

impl ContentSignals {
    /// Derives content signals from raw HTML
    ///
    /// Element presence is a plain substring test on the opening-tag prefix, so
    /// `<mainframe>` counts as `<main`. Visible text is whatever remains after
    /// every `<...>` span is replaced by a space and the result trimmed.
    pub fn detect(html: &str) -> Self {
        let lower = html.to_lowercase();
        let text_only = ANY_TAG.replace_all(&lower, " ");

        Self {
            has_main: lower.contains("<main"),
            has_article: lower.contains("<article"),
            has_h1: lower.contains("<h1"),
            script_tag_count: SCRIPT_OPEN.find_iter(&lower).count(),
            visible_text_length: text_only.trim().chars().count(),
        }
    }

    /// Many scripts and little server-rendered text
    pub fn is_script_heavy(&self) -> bool {
        self.script_tag_count > SCRIPT_HEAVY_THRESHOLD
            && self.visible_text_length < THIN_TEXT_THRESHOLD
    }
}
