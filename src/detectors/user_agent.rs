//! User-Agent analysis detector.
//!
//! Runs a fixed cascade of rules over the User-Agent string; the first rule
//! that matches decides the verdict:
//! 1. Short or malformed: no space, no `/`, or too few characters
//! 2. Allow-listed browser
//! 3. Contains a link (`://`)
//! 4. Known client library
//! 5. Known bot
//! 6. "Boty" keyword, compared case-insensitively

use super::{Detector, RequestContext};
use crate::rules::RuleTable;
use crate::verdict::Reason;

/// Default minimum length, in characters, of a plausible browser User-Agent.
pub const DEFAULT_MIN_LENGTH: usize = 10;

/// One step of the User-Agent cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAgentRule {
    Malformed,
    KnownBrowser,
    Link,
    ClientLibrary,
    KnownBot,
    BotyKeyword,
}

/// The cascade, in evaluation order.
pub const CASCADE: [(UserAgentRule, Reason); 6] = [
    (UserAgentRule::Malformed, Reason::Short),
    (UserAgentRule::KnownBrowser, Reason::NotBotKnown),
    (UserAgentRule::Link, Reason::Link),
    (UserAgentRule::ClientLibrary, Reason::ClientLibrary),
    (UserAgentRule::KnownBot, Reason::KnownBot),
    (UserAgentRule::BotyKeyword, Reason::Boty),
];

/// User-Agent analyzer detector.
#[derive(Debug, Clone, Copy)]
pub struct UserAgentDetector {
    rules: &'static RuleTable,
    min_length: usize,
}

impl UserAgentDetector {
    /// Create a detector over the built-in rule table.
    pub fn new() -> Self {
        Self::with_rules(RuleTable::builtin(), DEFAULT_MIN_LENGTH)
    }

    pub fn with_rules(rules: &'static RuleTable, min_length: usize) -> Self {
        Self { rules, min_length }
    }

    /// Classify a User-Agent string.
    pub fn classify(&self, ua: &str) -> Reason {
        CASCADE
            .iter()
            .find(|(rule, _)| self.matches(*rule, ua))
            .map(|(_, reason)| *reason)
            .unwrap_or(Reason::NotBotNoMatch)
    }

    /// Test a single rule, independent of its position in the cascade.
    pub fn matches(&self, rule: UserAgentRule, ua: &str) -> bool {
        match rule {
            UserAgentRule::Malformed => {
                !ua.contains(' ') || !ua.contains('/') || ua.chars().count() < self.min_length
            }
            UserAgentRule::KnownBrowser => contains_any(ua, self.rules.known_browsers),
            UserAgentRule::Link => ua.contains("://"),
            UserAgentRule::ClientLibrary => contains_any(ua, self.rules.client_libraries),
            UserAgentRule::KnownBot => contains_any(ua, self.rules.known_bots),
            UserAgentRule::BotyKeyword => {
                let lower = ua.to_lowercase();
                contains_any(&lower, self.rules.boty_keywords)
            }
        }
    }
}

impl Default for UserAgentDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for UserAgentDetector {
    fn detect(&self, ctx: &RequestContext<'_>) -> Option<Reason> {
        Some(self.classify(ctx.user_agent)).filter(|r| *r != Reason::NotBotNoMatch)
    }

    fn name(&self) -> &'static str {
        "user_agent"
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
