//! Rule-based template substitution.
//!
//! The contract template carries real example values instead of placeholder
//! syntax. Substitution rules locate those anchors (exact substrings or
//! multi-line section patterns) and replace them with record data. Rules are
//! registered in a [`RuleSet`] and run in order by the [`SubstitutionEngine`].

mod config;
mod core;
mod engine;
mod rule;
pub mod rules;
mod types;

pub use config::{create_contract_rules, payment_breakdown};
pub use core::RuleSet;
pub use engine::SubstitutionEngine;
pub use rule::SubstitutionRule;
pub use types::{RuleContext, RuleKind, RuleOutcome, RuleResult, Substitution};
