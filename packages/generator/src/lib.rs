//! Contrato Generator - Fill a Colombian service contract and render it as PDF.
//!
//! This crate takes a structured contract record (parties, amounts, payment
//! schedule, dates), substitutes it into a fixed *contrato civil de prestación
//! de servicios* template and produces a paginated PDF.
//!
//! # Example
//!
//! ```
//! use contrato_generator::numbers;
//!
//! assert_eq!(numbers::to_currency_string(7_040_667).unwrap(), "$ 7'040.667");
//! assert_eq!(numbers::to_words(500_000).unwrap(), "QUINIENTOS MIL PESOS M/Cte");
//! ```
//!
//! # Architecture
//!
//! The generator is organized into several modules:
//!
//! - [`config`]: Constants, contract defaults and anchor policy
//! - [`types`]: Contract record, payment items and validation report
//! - [`error`]: Error types and Result alias
//! - [`numbers`]: Spanish number-to-words and currency formatting
//! - [`data`]: Record loading from JSON and YAML
//! - [`template`]: The contract template
//! - [`substitution`]: Rule-based anchor substitution
//! - [`layout`]: Classification of contract text into typed blocks
//! - [`render`]: Line breaking, pagination and PDF output
//! - [`generator`]: Main generation pipeline
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod generator;
pub mod layout;
pub mod numbers;
pub mod render;
pub mod substitution;
pub mod template;
pub mod types;

// Re-export main functions
pub use generator::{
    generate_contract_from_file, generate_contract_from_value, ContractGenerator,
    GeneratedContract,
};

// Re-export commonly used items
pub use config::{AnchorPolicy, ContractDefaults, GeneratorConfig};
pub use data::{load_record, record_from_value};
pub use error::{GeneratorError, Result};
pub use layout::{Block, BlockKind, RenderedDocument};
pub use template::ContractTemplate;
pub use types::{ContractRecord, PaymentItem, ValidationReport};
