//! Ordered collection of substitution rules.

use super::rule::SubstitutionRule;

/// Rules in application order.
///
/// Unlike a lookup table, order matters here: later rules see the output of
/// earlier ones.
pub struct RuleSet {
    rules: Vec<Box<dyn SubstitutionRule>>,
}

impl RuleSet {
    /// Create a new empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; it runs after every rule already registered.
    pub fn push(&mut self, rule: impl SubstitutionRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in application order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Iterate over the rules in application order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn SubstitutionRule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}
