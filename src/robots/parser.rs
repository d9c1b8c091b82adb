//! Robots.txt parser implementation
//!
//! This module turns raw robots.txt content into an ordered list of agent
//! groups. Only `User-agent`, `Allow` and `Disallow` are understood; wildcard
//! patterns, `Crawl-delay` and `Sitemap` lines are ignored.

/// Whether a rule grants or denies access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Allow,
    Disallow,
}

/// A single allow/disallow path rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsRule {
    pub directive: Directive,
    /// Literal path prefix as written in the file; an empty path never matches
    pub path: String,
}

impl RobotsRule {
    pub fn new(directive: Directive, path: impl Into<String>) -> Self {
        Self {
            directive,
            path: path.into(),
        }
    }
}

/// A run of `User-agent` lines and the rules that follow them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsGroup {
    /// Lowercased agent names
    pub agents: Vec<String>,
    /// Rules in declaration order
    pub rules: Vec<RobotsRule>,
}

impl RobotsGroup {
    /// Returns true if the group lists `agent` (already lowercased)
    pub fn applies_to(&self, agent: &str) -> bool {
        self.agents.iter().any(|a| a == agent)
    }
}

/// Parsed robots.txt document: groups in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsDocument {
    pub groups: Vec<RobotsGroup>,
}

impl RobotsDocument {
    /// Parses raw robots.txt content. Never fails: lines that do not fit the
    /// `field: value` shape are skipped.
    ///
    /// A `User-agent` line closes the current group only once that group has
    /// both an agent and a rule, so consecutive `User-agent` lines share one
    /// group. Rules that appear before any `User-agent` line are attached to
    /// an implicit `*` group.
    ///
    /// # Example
    ///
    /// ```
    /// use crawl_signal::robots::RobotsDocument;
    ///
    /// let doc = RobotsDocument::parse("User-agent: GPTBot\nDisallow: /");
    /// assert_eq!(doc.groups.len(), 1);
    /// assert_eq!(doc.groups[0].agents, vec!["gptbot".to_string()]);
    /// ```
    pub fn parse(content: &str) -> Self {
        let mut groups = Vec::new();
        let mut current = RobotsGroup::default();

        // CRLF, bare CR and LF all end a line
        for line in content.split(['\r', '\n']) {
            let trimmed = line.trim();

            // Skip comments and empty lines
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some((field, value)) = trimmed.split_once(':') else {
                continue;
            };
            let field = field.trim().to_lowercase();
            let value = value.trim();

            match field.as_str() {
                "user-agent" => {
                    if !current.agents.is_empty() && !current.rules.is_empty() {
                        groups.push(std::mem::take(&mut current));
                    }
                    current.agents.push(value.to_lowercase());
                }
                "allow" | "disallow" => {
                    if current.agents.is_empty() {
                        current.agents.push("*".to_string());
                    }
                    let directive = if field == "allow" {
                        Directive::Allow
                    } else {
                        Directive::Disallow
                    };
                    current.rules.push(RobotsRule::new(directive, value));
                }
                _ => {}
            }
        }

        if !current.agents.is_empty() {
            groups.push(current);
        }

        Self { groups }
    }

    /// Returns true if no group was declared
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Convenience wrapper around [`RobotsDocument::parse`]
pub fn parse_robots(content: &str) -> RobotsDocument {
    RobotsDocument::parse(content)
}
