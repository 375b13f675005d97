//! Substitution engine that applies the rule set to the template.

use super::core::RuleSet;
use super::types::{RuleContext, RuleOutcome, Substitution};
use crate::config::{AnchorPolicy, ContractDefaults};
use crate::error::{GeneratorError, Result};
use crate::template::ContractTemplate;
use crate::types::ContractRecord;

/// Engine that runs every rule, in order, over the template text.
///
/// Each rule sees the output of the previous one. Missing section anchors are
/// handled according to the [`AnchorPolicy`].
pub struct SubstitutionEngine {
    rules: RuleSet,
    policy: AnchorPolicy,
}

impl SubstitutionEngine {
    /// Create a new engine with the given rules and anchor policy.
    #[must_use]
    pub fn new(rules: RuleSet, policy: AnchorPolicy) -> Self {
        Self { rules, policy }
    }

    /// Produce the contract text for one record.
    ///
    /// # Arguments
    /// * `template` - The template to fill
    /// * `record` - Validated contract data
    /// * `defaults` - Fallbacks for optional contract parameters
    ///
    /// # Returns
    /// The substituted text plus a warning for every section left unchanged
    ///
    /// # Errors
    /// Number formatting errors from rules, and `AnchorNotFound` when a
    /// section anchor is missing under `AnchorPolicy::FailLoud`.
    pub fn apply(
        &self,
        template: &ContractTemplate,
        record: &ContractRecord,
        defaults: &ContractDefaults,
    ) -> Result<Substitution> {
        let context = RuleContext::new(record, defaults);
        let mut text = template.content().to_string();
        let mut warnings = Vec::new();

        for rule in self.rules.iter() {
            let result = rule.apply(&text, &context)?;

            match result.outcome {
                RuleOutcome::Replaced { count } => {
                    tracing::debug!(rule = rule.name(), kind = %rule.kind(), count, "Rule applied");
                }
                RuleOutcome::Skipped => {
                    tracing::debug!(rule = rule.name(), kind = %rule.kind(), "Rule skipped");
                }
                RuleOutcome::AnchorMissing => match self.policy {
                    AnchorPolicy::FailLoud => {
                        return Err(GeneratorError::AnchorNotFound {
                            rule: rule.name().to_string(),
                        });
                    }
                    AnchorPolicy::FailSoft => {
                        tracing::warn!(
                            rule = rule.name(),
                            "Section anchor not found in template, leaving text unchanged"
                        );
                        warnings.push(format!(
                            "Anchor for section '{}' not found; section left unchanged",
                            rule.name()
                        ));
                    }
                },
            }

            for note in &result.notes {
                tracing::warn!(rule = rule.name(), "{note}");
            }
            warnings.extend(result.notes);
            text = result.text;
        }

        Ok(Substitution { text, warnings })
    }
}
