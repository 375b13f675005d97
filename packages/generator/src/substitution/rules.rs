//! Rule implementations: literal anchors, section patterns and placeholders.

use std::sync::LazyLock;

use regex::{Captures, NoExpand, Regex};

use super::rule::SubstitutionRule;
use super::types::{RuleContext, RuleKind, RuleResult};
use crate::error::Result;

/// Builds the replacement for a literal anchor; `None` skips the rule.
pub type LiteralValueFn = fn(&RuleContext<'_>) -> Option<String>;

/// Builds the replacement for a section; `None` skips the rule.
pub type SectionBuildFn = fn(&RuleContext<'_>) -> Result<Option<String>>;

/// Replaces every occurrence of an exact substring.
///
/// Used both for record fields (`RuleKind::Literal`) and for default contract
/// parameters (`RuleKind::Constant`). An absent anchor is not an error.
pub struct LiteralRule {
    name: String,
    anchor: String,
    kind: RuleKind,
    value: LiteralValueFn,
}

impl LiteralRule {
    /// Create a literal rule that replaces `anchor` with a record field.
    #[must_use]
    pub fn new(name: impl Into<String>, anchor: impl Into<String>, value: LiteralValueFn) -> Self {
        Self {
            name: name.into(),
            anchor: anchor.into(),
            kind: RuleKind::Literal,
            value,
        }
    }

    /// Create a constant rule that replaces a default parameter value.
    #[must_use]
    pub fn constant(
        name: impl Into<String>,
        anchor: impl Into<String>,
        value: LiteralValueFn,
    ) -> Self {
        Self {
            kind: RuleKind::Constant,
            ..Self::new(name, anchor, value)
        }
    }

    /// The anchor substring.
    #[must_use]
    pub fn anchor(&self) -> &str {
        &self.anchor
    }
}

impl SubstitutionRule for LiteralRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> RuleKind {
        self.kind
    }

    fn apply(&self, text: &str, context: &RuleContext<'_>) -> Result<RuleResult> {
        let Some(value) = (self.value)(context) else {
            return Ok(RuleResult::skipped(text));
        };

        let count = text.matches(self.anchor.as_str()).count();
        if count == 0 {
            return Ok(RuleResult::skipped(text));
        }
        Ok(RuleResult::replaced(
            text.replace(self.anchor.as_str(), &value),
            count,
        ))
    }
}

/// Replaces a span matched by a pattern with freshly built text.
///
/// The replacement is inserted verbatim; `$` in amounts is not treated as a
/// capture group reference.
pub struct SectionRule {
    name: String,
    pattern: &'static Regex,
    build: SectionBuildFn,
}

impl SectionRule {
    /// Create a section rule.
    #[must_use]
    pub fn new(name: impl Into<String>, pattern: &'static Regex, build: SectionBuildFn) -> Self {
        Self {
            name: name.into(),
            pattern,
            build,
        }
    }

}

impl SubstitutionRule for SectionRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Section
    }

    fn apply(&self, text: &str, context: &RuleContext<'_>) -> Result<RuleResult> {
        let Some(replacement) = (self.build)(context)? else {
            return Ok(RuleResult::skipped(text));
        };

        let count = self.pattern.find_iter(text).count();
        if count == 0 {
            return Ok(RuleResult::anchor_missing(text));
        }
        let replaced = self
            .pattern
            .replace_all(text, NoExpand(&replacement))
            .into_owned();
        Ok(RuleResult::replaced(replaced, count))
    }
}

/// Named placeholder syntax: `{{ field_name }}`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([a-z_]+)\s*\}\}").expect("valid regex"));

/// Replaces `{{field_name}}` tokens with record fields.
///
/// Optional contract parameters resolve through the defaults. Unknown names are left in place and reported as notes.
pub struct PlaceholderRule;

impl SubstitutionRule for PlaceholderRule {
    fn name(&self) -> &str {
        "placeholders"
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Placeholder
    }

    fn apply(&self, text: &str, context: &RuleContext<'_>) -> Result<RuleResult> {
        if !PLACEHOLDER_PATTERN.is_match(text) {
            return Ok(RuleResult::skipped(text));
        }

        let mut count = 0;
        let mut unknown: Vec<String> = Vec::new();
        let replaced = PLACEHOLDER_PATTERN.replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[1];
            match context.record.placeholder_value(name, context.defaults) {
                Some(value) => {
                    count += 1;
                    value
                }
                None => {
                    if !unknown.iter().any(|u| u == name) {
                        unknown.push(name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        let replaced = replaced.into_owned();

        let notes = unknown
            .into_iter()
            .map(|name| format!("Unknown placeholder '{{{{{name}}}}}' left unchanged"))
            .collect();
        Ok(RuleResult::replaced(replaced, count).with_notes(notes))
    }
}
