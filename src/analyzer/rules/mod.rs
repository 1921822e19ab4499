//! File name match rules
//!
//! Rules are data: each pairs a label with a matcher, and lookups stop at the
//! first rule that matches. Adding a rule means adding a table entry.

pub mod naming;

pub use naming::{naming_rules, professional_keywords, NAMING_RULES_VERSION};

use regex::Regex;

/// How a rule tests a file name
#[derive(Debug)]
pub enum Matcher {
    /// Case-insensitive substring
    Contains(&'static str),
    /// Regular expression
    Pattern(Regex),
}

/// A labelled file name rule
#[derive(Debug)]
pub struct MatchRule {
    pub label: &'static str,
    pub matcher: Matcher,
}

impl MatchRule {
    pub fn contains(label: &'static str, needle: &'static str) -> Self {
        Self {
            label,
            matcher: Matcher::Contains(needle),
        }
    }

    /// Panics if `pattern` is not a valid regex; only used with literals.
    pub fn pattern(label: &'static str, pattern: &str) -> Self {
        Self {
            label,
            matcher: Matcher::Pattern(Regex::new(pattern).unwrap()),
        }
    }

    pub fn is_match(&self, file_name: &str) -> bool {
        match &self.matcher {
            Matcher::Contains(needle) => file_name.to_lowercase().contains(needle),
            Matcher::Pattern(re) => re.is_match(file_name),
        }
    }
}

/// First rule in table order that matches the file name
pub fn first_match<'a>(rules: &'a [MatchRule], file_name: &str) -> Option<&'a MatchRule> {
    rules.iter().find(|rule| rule.is_match(file_name))
}
