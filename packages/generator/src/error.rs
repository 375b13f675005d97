//! Error types for the contract generator.
//!
//! Uses the dual-error pattern: `GeneratorError` carries the detailed error
//! kind for library consumers, and `GenerationFailed` wraps any failure at the
//! top-level `generate` boundary while keeping the original error as its
//! source.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the generator library.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// One or more mandatory fields are missing or invalid.
    #[error("Invalid contract data: {}", .errors.join("; "))]
    Validation { errors: Vec<String> },

    /// A negative amount was passed to the number formatter.
    #[error("Negative amounts are not supported: {0}")]
    NegativeAmount(i64),

    /// The amount cannot be expressed in words.
    #[error("Cannot convert {amount} to words: {reason}")]
    Conversion { amount: i64, reason: String },

    /// The template file could not be read.
    #[error("Failed to load template {}: {source}", .path.display())]
    TemplateLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A section anchor was not found and the anchor policy is fail-loud.
    #[error("Anchor for section '{rule}' not found in template")]
    AnchorNotFound { rule: String },

    /// The PDF document could not be built.
    #[error("PDF rendering failed: {0}")]
    Render(String),

    /// Record file has an extension we cannot parse.
    #[error("Unsupported record format: {}. Expected .json, .yaml or .yml", .0.display())]
    UnsupportedFormat(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failed.
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Any failure during generation, wrapped at the public boundary.
    #[error("generation failed: {source}")]
    GenerationFailed {
        #[source]
        source: Box<GeneratorError>,
    },
}

impl GeneratorError {
    /// Wrap an error at the generation boundary.
    ///
    /// Already-wrapped errors are returned unchanged so the chain never nests
    /// the same boundary twice.
    #[must_use]
    pub fn into_generation_failure(self) -> Self {
        match self {
            Self::GenerationFailed { .. } => self,
            other => Self::GenerationFailed {
                source: Box::new(other),
            },
        }
    }

    /// Return the innermost error kind, looking through `GenerationFailed`.
    #[must_use]
    pub fn root_cause(&self) -> &GeneratorError {
        match self {
            Self::GenerationFailed { source } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_validation_display() {
        let err = GeneratorError::Validation {
            errors: vec![
                "Missing required field: contratante_nit".to_string(),
                "Missing required field: valor_total".to_string(),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Invalid contract data: Missing required field: contratante_nit; Missing required field: valor_total"
        );
    }

    #[test]
    fn test_generation_failure_keeps_source() {
        let err = GeneratorError::Render("disk full".to_string()).into_generation_failure();
        assert_eq!(
            err.to_string(),
            "generation failed: PDF rendering failed: disk full"
        );
        assert!(err.source().is_some());
        assert!(matches!(err.root_cause(), GeneratorError::Render(_)));
    }

    #[test]
    fn test_generation_failure_not_nested_twice() {
        let err = GeneratorError::NegativeAmount(-5)
            .into_generation_failure()
            .into_generation_failure();
        let GeneratorError::GenerationFailed { source } = &err else {
            panic!("expected GenerationFailed");
        };
        assert!(matches!(**source, GeneratorError::NegativeAmount(-5)));
    }

    #[test]
    fn test_anchor_not_found_display() {
        let err = GeneratorError::AnchorNotFound {
            rule: "honorarios".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Anchor for section 'honorarios' not found in template"
        );
    }
}
