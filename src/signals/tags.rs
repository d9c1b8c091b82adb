//! Lightweight tag scanning
//!
//! Tags are located with regular expressions rather than a DOM parser, which
//! keeps extraction tolerant of broken markup. Attributes are only recognised
//! in the double-quoted `name="value"` form; single-quoted or unquoted values
//! are not seen.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([a-zA-Z0-9_-]+)\s*=\s*"([^"]*)""#).expect("valid attribute regex"));

/// Attributes of one opening tag, keyed by lowercased name
///
/// A repeated attribute keeps its last value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagAttributes {
    values: HashMap<String, String>,
}

impl TagAttributes {
    pub fn parse(tag: &str) -> Self {
        let values = ATTRIBUTE
            .captures_iter(tag)
            .map(|caps| (caps[1].to_ascii_lowercase(), caps[2].to_string()))
            .collect();
        Self { values }
    }

    /// Raw attribute value, original case preserved
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// True if the attribute is present and equals `expected` ignoring case
    /// and surrounding whitespace
    pub fn is(&self, name: &str, expected: &str) -> bool {
        self.get(name)
            .map(|value| value.trim().eq_ignore_ascii_case(expected))
            .unwrap_or(false)
    }
}

/// Iterates over the attribute sets of every `<name ...>` opening tag
pub fn opening_tags<'a>(pattern: &'a Regex, html: &'a str) -> impl Iterator<Item = TagAttributes> + 'a {
    pattern
        .find_iter(html)
        .map(|tag| TagAttributes::parse(tag.as_str()))
}
