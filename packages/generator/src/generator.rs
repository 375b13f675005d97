//! Contract generation pipeline.
//!
//! record → validation → substitution → layout → PDF.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::{GeneratorConfig, CONTRACT_TITLE};
use crate::data::{load_record, record_from_value};
use crate::error::{GeneratorError, Result};
use crate::layout::{layout_contract, RenderedDocument};
use crate::render::save_pdf;
use crate::substitution::{create_contract_rules, Substitution, SubstitutionEngine};
use crate::template::ContractTemplate;
use crate::types::{ContractRecord, ValidationReport};

/// Result of a successful generation.
#[derive(Debug, Clone)]
pub struct GeneratedContract {
    /// Path of the written PDF.
    pub path: PathBuf,

    /// The text that was rendered, with any anchor warnings.
    pub substitution: Substitution,
}

/// Fills the contract template and renders PDFs.
///
/// Holds the template and rule set read-only, so one generator can process
/// any number of records one after the other.
pub struct ContractGenerator {
    template: ContractTemplate,
    engine: SubstitutionEngine,
    config: GeneratorConfig,
}

impl ContractGenerator {
    /// Create a generator from a template file with default configuration.
    ///
    /// # Errors
    /// `GeneratorError::TemplateLoad` if the template cannot be read.
    pub fn new(template_path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_template(
            ContractTemplate::load(template_path)?,
            GeneratorConfig::default(),
        ))
    }

    /// Create a generator for the bundled template.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_template(ContractTemplate::builtin(), GeneratorConfig::default())
    }

    /// Create a generator from an already loaded template.
    #[must_use]
    pub fn from_template(template: ContractTemplate, config: GeneratorConfig) -> Self {
        let engine = SubstitutionEngine::new(create_contract_rules(), config.anchor_policy);
        Self {
            template,
            engine,
            config,
        }
    }

    /// Replace the configuration (defaults and anchor policy).
    #[must_use]
    pub fn with_config(self, config: GeneratorConfig) -> Self {
        Self::from_template(self.template, config)
    }

    /// The template in use.
    #[must_use]
    pub fn template(&self) -> &ContractTemplate {
        &self.template
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Validate a record and fill the template with it.
    ///
    /// # Errors
    /// Validation errors, number formatting errors and, under the fail-loud
    /// anchor policy, `AnchorNotFound`.
    pub fn substitute(&self, record: &ContractRecord) -> Result<Substitution> {
        record.validate()?;
        self.engine
            .apply(&self.template, record, &self.config.defaults)
    }

    /// Lay out substituted text into document blocks.
    #[must_use]
    pub fn layout(&self, text: &str, record: &ContractRecord) -> RenderedDocument {
        layout_contract(text, record)
    }

    /// Generate the contract PDF for a record.
    ///
    /// # Arguments
    /// * `record` - Contract data
    /// * `output_path` - Where to write the PDF; parent directories are created
    ///
    /// # Returns
    /// The path of the written PDF
    ///
    /// # Errors
    /// Every failure is returned as `GeneratorError::GenerationFailed` with the
    /// underlying error as its source. No output file is left behind.
    pub fn generate(
        &self,
        record: &ContractRecord,
        output_path: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        self.generate_with_report(record, output_path)
            .map(|generated| generated.path)
    }

    /// Generate the contract PDF and return the substitution that produced it.
    ///
    /// The warnings in the returned [`Substitution`] belong to the same run
    /// that was rendered.
    ///
    /// # Errors
    /// As [`ContractGenerator::generate`].
    pub fn generate_with_report(
        &self,
        record: &ContractRecord,
        output_path: impl AsRef<Path>,
    ) -> Result<GeneratedContract> {
        let output_path = output_path.as_ref();
        self.generate_inner(record, output_path).map_err(|err| {
            tracing::error!(error = %err, path = %output_path.display(), "Contract generation failed");
            err.into_generation_failure()
        })
    }

    fn generate_inner(
        &self,
        record: &ContractRecord,
        output_path: &Path,
    ) -> Result<GeneratedContract> {
        let substitution = self.substitute(record)?;
        let document = self.layout(&substitution.text, record);
        let path = save_pdf(&document, CONTRACT_TITLE, output_path)?;
        tracing::info!(path = %path.display(), blocks = document.len(), "Contract generated");
        Ok(GeneratedContract { path, substitution })
    }

    /// Generate a contract from an in-memory JSON record.
    ///
    /// # Errors
    /// As [`ContractGenerator::generate`]; malformed values are wrapped too.
    pub fn generate_from_value(&self, data: &Value, output_path: impl AsRef<Path>) -> Result<PathBuf> {
        let record = record_from_value(data).map_err(GeneratorError::into_generation_failure)?;
        self.generate(&record, output_path)
    }

    /// Check whether JSON data is usable for generation without writing
    /// anything.
    #[must_use]
    pub fn validate_contract_data(&self, data: &Value) -> ValidationReport {
        match record_from_value(data) {
            Ok(record) => ValidationReport::from_result(record.validate()),
            Err(err) => ValidationReport::invalid(vec![err.to_string()]),
        }
    }
}

/// Generate a contract from a JSON value.
///
/// # Arguments
/// * `data` - Contract data as JSON
/// * `template_path` - Template file, or `None` for the bundled one
/// * `output_path` - Destination PDF path
///
/// # Errors
/// `GeneratorError::GenerationFailed` wrapping the underlying error.
pub fn generate_contract_from_value(
    data: &Value,
    template_path: Option<&Path>,
    output_path: impl AsRef<Path>,
) -> Result<PathBuf> {
    generator_for(template_path)?.generate_from_value(data, output_path)
}

/// Generate a contract from a JSON or YAML record file.
///
/// # Errors
/// `GeneratorError::GenerationFailed` wrapping the underlying error.
pub fn generate_contract_from_file(
    data_path: impl AsRef<Path>,
    template_path: Option<&Path>,
    output_path: impl AsRef<Path>,
) -> Result<PathBuf> {
    let record = load_record(data_path).map_err(GeneratorError::into_generation_failure)?;
    generator_for(template_path)?.generate(&record, output_path)
}

fn generator_for(template_path: Option<&Path>) -> Result<ContractGenerator> {
    match template_path {
        Some(path) => ContractGenerator::new(path).map_err(GeneratorError::into_generation_failure),
        None => Ok(ContractGenerator::builtin()),
    }
}
