//! The fixed contract template.
//!
//! The template is an example contract whose literal values (party names,
//! amounts, dates) act as anchors for substitution. It is loaded once and
//! never modified.

use std::fs;
use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

use crate::error::{GeneratorError, Result};

/// Template text bundled with the crate.
const BUILTIN_TEMPLATE: &str = include_str!("../templates/contrato_ejemplo.txt");

/// Immutable contract template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractTemplate {
    content: String,
    source: Option<PathBuf>,
}

impl ContractTemplate {
    /// Load a template from a UTF-8 text file.
    ///
    /// # Errors
    /// `GeneratorError::TemplateLoad` if the file is missing or unreadable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| GeneratorError::TemplateLoad {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = raw.len(), "Loaded template");

        Ok(Self {
            content: normalize(&raw),
            source: Some(path.to_path_buf()),
        })
    }

    /// Create a template from in-memory text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            content: normalize(text),
            source: None,
        }
    }

    /// The template bundled with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_text(BUILTIN_TEMPLATE)
    }

    /// Template text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Path the template was loaded from, if any.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Compose accents (NFC) and unify line endings.
fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").nfc().collect()
}
