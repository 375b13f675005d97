//! Types for the substitution rule system.

use std::fmt;

use crate::config::ContractDefaults;
use crate::types::ContractRecord;

/// Classification of substitution rules.
///
/// Rules are applied in the order they were registered; the kind only
/// determines how a missing anchor is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Named `{{field}}` placeholders.
    Placeholder,
    /// Exact substring anchors replaced by record fields.
    Literal,
    /// Multi-line sections matched from a start phrase to an end phrase.
    Section,
    /// Default contract parameters replaced verbatim.
    Constant,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Placeholder => "placeholder",
            Self::Literal => "literal",
            Self::Section => "section",
            Self::Constant => "constant",
        };
        f.write_str(name)
    }
}

/// Data available to a rule while it builds its replacement.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The record being substituted.
    pub record: &'a ContractRecord,

    /// Defaults for optional contract parameters.
    pub defaults: &'a ContractDefaults,
}

impl<'a> RuleContext<'a> {
    /// Create a new rule context.
    #[must_use]
    pub fn new(record: &'a ContractRecord, defaults: &'a ContractDefaults) -> Self {
        Self { record, defaults }
    }
}

/// What a rule did to the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The anchor matched and `count` occurrences were replaced.
    Replaced { count: usize },
    /// The rule had nothing to contribute for this record.
    Skipped,
    /// The section anchor was not found; the text is unchanged.
    AnchorMissing,
}

/// Result of applying one rule.
#[derive(Debug, Clone)]
pub struct RuleResult {
    /// Text after the rule ran.
    pub text: String,

    /// What happened.
    pub outcome: RuleOutcome,

    /// Non-fatal observations (e.g. unknown placeholder names).
    pub notes: Vec<String>,
}

impl RuleResult {
    /// Text replaced `count` times.
    #[must_use]
    pub fn replaced(text: String, count: usize) -> Self {
        Self {
            text,
            outcome: RuleOutcome::Replaced { count },
            notes: Vec::new(),
        }
    }

    /// Text left as it was.
    #[must_use]
    pub fn skipped(text: &str) -> Self {
        Self {
            text: text.to_string(),
            outcome: RuleOutcome::Skipped,
            notes: Vec::new(),
        }
    }

    /// Section anchor not found.
    #[must_use]
    pub fn anchor_missing(text: &str) -> Self {
        Self {
            text: text.to_string(),
            outcome: RuleOutcome::AnchorMissing,
            notes: Vec::new(),
        }
    }

    /// Attach notes to the result.
    #[must_use]
    pub fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes = notes;
        self
    }
}

/// Final contract text produced from the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Contract text with every anchor replaced.
    pub text: String,

    /// Sections that could not be replaced and other observations.
    pub warnings: Vec<String>,
}

impl Substitution {
    /// Whether every rule found what it was looking for.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_kind_display() {
        assert_eq!(RuleKind::Section.to_string(), "section");
        assert_eq!(RuleKind::Constant.to_string(), "constant");
    }

    #[test]
    fn test_rule_result_constructors() {
        let result = RuleResult::replaced("abc".to_string(), 2);
        assert_eq!(result.outcome, RuleOutcome::Replaced { count: 2 });

        let result = RuleResult::anchor_missing("abc").with_notes(vec!["note".to_string()]);
        assert_eq!(result.outcome, RuleOutcome::AnchorMissing);
        assert_eq!(result.text, "abc");
        assert_eq!(result.notes, vec!["note"]);
    }
}
