//! Access resolution against a parsed robots.txt document

use crate::robots::parser::{Directive, RobotsDocument, RobotsGroup, RobotsRule};
use std::fmt;

/// Outcome of checking an agent/path pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessDecision {
    Allowed,
    Blocked,
    /// Neither the agent's own group nor a `*` group exists
    Unknown,
}

impl fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Allowed => "allowed",
            Self::Blocked => "blocked",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Decides whether `agent` may fetch `path`
///
/// # Group selection
///
/// The first group naming the agent (case-insensitive) wins; otherwise the
/// first `*` group; otherwise the result is [`AccessDecision::Unknown`].
///
/// # Rule selection
///
/// Among rules whose non-empty path is a prefix of `path`, the longest path
/// wins. Equal lengths resolve to the rule declared first, even when a later
/// rule of the same length would be more restrictive. No matching rule means
/// the path is allowed.
///
/// # Example
///
/// ```
/// use crawl_signal::robots::{evaluate, parse_robots, AccessDecision};
///
/// let doc = parse_robots("User-agent: *\nDisallow: /a\nAllow: /ab");
/// assert_eq!(evaluate("AnyBot", "/ab/x", &doc), AccessDecision::Allowed);
/// assert_eq!(evaluate("AnyBot", "/ac", &doc), AccessDecision::Blocked);
/// ```
pub fn evaluate(agent: &str, path: &str, document: &RobotsDocument) -> AccessDecision {
    let Some(group) = select_group(agent, document) else {
        return AccessDecision::Unknown;
    };

    match best_rule(group, path) {
        None => AccessDecision::Allowed,
        Some(rule) => match rule.directive {
            Directive::Allow => AccessDecision::Allowed,
            Directive::Disallow => AccessDecision::Blocked,
        },
    }
}

fn select_group<'a>(agent: &str, document: &'a RobotsDocument) -> Option<&'a RobotsGroup> {
    let agent = agent.to_lowercase();
    document
        .groups
        .iter()
        .find(|group| group.applies_to(&agent))
        .or_else(|| document.groups.iter().find(|group| group.applies_to("*")))
}

fn best_rule<'a>(group: &'a RobotsGroup, path: &str) -> Option<&'a RobotsRule> {
    let mut best: Option<&RobotsRule> = None;

    for rule in &group.rules {
        if rule.path.is_empty() || !path.starts_with(rule.path.as_str()) {
            continue;
        }
        // Strictly longer only: ties keep the earlier rule
        match best {
            Some(existing) if rule.path.chars().count() <= existing.path.chars().count() => {}
            _ => best = Some(rule),
        }
    }

    best
}
