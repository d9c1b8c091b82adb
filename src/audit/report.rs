//! Audit report buckets and Markdown rendering

use std::fmt;

/// Sentinel for an empty critical or warning bucket
pub const NONE_NOTED: &str = "None noted.";

/// Sentinel for an empty good-signals bucket
pub const NO_GOOD_SIGNALS: &str = "No strong positive signals detected yet.";

/// Sentinel for an empty next-actions bucket
pub const NO_NEXT_ACTIONS: &str = "No immediate actions identified.";

/// Findings of one audit, sorted into four buckets
///
/// Entries keep insertion order. Call [`AuditReport::finalize`] before
/// rendering so that every bucket has at least one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub critical_issues: Vec<String>,
    pub warnings: Vec<String>,
    pub good_signals: Vec<String>,
    pub next_actions: Vec<String>,
}

impl AuditReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn critical(&mut self, message: impl Into<String>) {
        self.critical_issues.push(message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn good(&mut self, message: impl Into<String>) {
        self.good_signals.push(message.into());
    }

    pub fn action(&mut self, message: impl Into<String>) {
        self.next_actions.push(message.into());
    }

    /// Fills every empty bucket with its sentinel entry
    pub fn finalize(mut self) -> Self {
        fill_if_empty(&mut self.critical_issues, NONE_NOTED);
        fill_if_empty(&mut self.warnings, NONE_NOTED);
        fill_if_empty(&mut self.good_signals, NO_GOOD_SIGNALS);
        fill_if_empty(&mut self.next_actions, NO_NEXT_ACTIONS);
        self
    }

    /// Renders the report as Markdown
    ///
    /// Layout is fixed: four `##` sections in the order critical issues,
    /// warnings, good signals, next actions, each a bullet list, separated by a
    /// blank line.
    pub fn to_markdown(&self) -> String {
        let sections: [(&str, &[String]); 4] = [
            ("Critical issues", &self.critical_issues),
            ("Warnings", &self.warnings),
            ("Good signals", &self.good_signals),
            ("Next actions", &self.next_actions),
        ];

        sections
            .iter()
            .map(|(title, items)| {
                let mut section = format!("## {}", title);
                for item in items.iter() {
                    section.push_str("\n- ");
                    section.push_str(item);
                }
                section
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markdown())
    }
}

fn fill_if_empty(bucket: &mut Vec<String>, sentinel: &str) {
    if bucket.is_empty() {
        bucket.push(sentinel.to_string());
    }
}
