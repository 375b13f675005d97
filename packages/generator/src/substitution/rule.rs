//! Substitution rule trait definition.

use super::types::{RuleContext, RuleKind, RuleResult};
use crate::error::Result;

/// Trait for substitution rules.
///
/// A rule looks for one anchor (a literal string, a section pattern or a
/// placeholder syntax) and replaces it with text built from the record.
pub trait SubstitutionRule: Send + Sync {
    /// Short identifier used in logs and warnings.
    fn name(&self) -> &str;

    /// Return the kind of this rule.
    fn kind(&self) -> RuleKind;

    /// Apply the rule to `text`.
    ///
    /// # Errors
    /// Rules that format amounts propagate number formatting errors.
    fn apply(&self, text: &str, context: &RuleContext<'_>) -> Result<RuleResult>;
}
