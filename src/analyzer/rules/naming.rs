//! Professional naming and role keyword tables

use super::MatchRule;
use std::sync::OnceLock;

/// Bumped whenever an entry is added, removed or changed
pub const NAMING_RULES_VERSION: u32 = 1;

/// Patterns that mark a file name as professionally named
pub fn naming_rules() -> &'static [MatchRule] {
    static RULES: OnceLock<Vec<MatchRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            MatchRule::contains("resume", "resume"),
            MatchRule::contains("cv", "cv"),
            MatchRule::contains("curriculum", "curriculum"),
            MatchRule::contains("vitae", "vitae"),
            // john_doe_resume, jane-smith-cv
            MatchRule::pattern("name-resume", r"(?i)[a-z]+[_-][a-z]+[_-](resume|cv)"),
            // resume_2024, cv-2023
            MatchRule::pattern("dated-resume", r"(?i)(resume|cv)[_-]\d{4}"),
        ]
    })
}

/// Role and seniority terms
pub fn professional_keywords() -> &'static [MatchRule] {
    static KEYWORDS: OnceLock<Vec<MatchRule>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        [
            "senior",
            "junior",
            "lead",
            "manager",
            "developer",
            "engineer",
            "analyst",
            "specialist",
            "coordinator",
            "director",
            "consultant",
        ]
        .into_iter()
        .map(|term| MatchRule::contains(term, term))
        .collect()
    })
}
