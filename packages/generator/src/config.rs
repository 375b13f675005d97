//! Configuration constants and defaults for the contract generator.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Suffix appended to every amount written in words.
pub const CURRENCY_SUFFIX: &str = "PESOS M/Cte";

/// Prefix of every formatted currency amount.
pub const CURRENCY_PREFIX: &str = "$ ";

/// Largest amount the words formatter can express (just below one trillón).
pub const MAX_WORDS_AMOUNT: i64 = 999_999_999_999_999_999;

/// Default minimum withholding threshold, as written in the template.
pub const DEFAULT_RETENCION_MINIMA: &str = "1.344.573";

/// Default penalty percentage.
pub const DEFAULT_PENALIDAD_PORCENTAJE: &str = "20";

/// Default grace period in days.
pub const DEFAULT_DIAS_GRACIA: &str = "5";

/// Title emitted once at the top of the document.
pub const CONTRACT_TITLE: &str = "CONTRATO CIVIL DE PRESTACIÓN DE SERVICIOS";

/// Marker of the clause section; rendered as a subtitle.
pub const CLAUSES_MARKER: &str = "CLÁUSULAS";

/// Default output path used by the CLI.
pub const DEFAULT_OUTPUT_PATH: &str = "contratos_generados/contrato.pdf";

/// Minimum number of characters for a body paragraph to be kept.
pub const MIN_PARAGRAPH_CHARS: usize = 6;

/// Page width in millimetres (US letter).
pub const PAGE_WIDTH_MM: f32 = 215.9;

/// Page height in millimetres (US letter).
pub const PAGE_HEIGHT_MM: f32 = 279.4;

/// Page margin in points (one inch on every side).
pub const PAGE_MARGIN_PT: f32 = 72.0;

/// Spanish month names, January first.
const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// What to do when a section anchor is missing from the template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorPolicy {
    /// Leave the section unchanged and record a warning.
    #[default]
    FailSoft,
    /// Abort substitution with `GeneratorError::AnchorNotFound`.
    FailLoud,
}

/// Fallback values for the optional contract parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDefaults {
    /// Minimum withholding threshold, already formatted (e.g. "1.344.573").
    pub retencion_minima: String,

    /// Penalty percentage without the `%` sign.
    pub penalidad_porcentaje: String,

    /// Grace period in days.
    pub dias_gracia: String,

    /// Signing date used when the record has none. `None` means today.
    pub fecha_firma: Option<String>,
}

impl Default for ContractDefaults {
    fn default() -> Self {
        Self {
            retencion_minima: DEFAULT_RETENCION_MINIMA.to_string(),
            penalidad_porcentaje: DEFAULT_PENALIDAD_PORCENTAJE.to_string(),
            dias_gracia: DEFAULT_DIAS_GRACIA.to_string(),
            fecha_firma: None,
        }
    }
}

impl ContractDefaults {
    /// Resolve the default signing date.
    #[must_use]
    pub fn signing_date(&self) -> String {
        self.fecha_firma
            .clone()
            .unwrap_or_else(|| spanish_date(chrono::Local::now().date_naive()))
    }
}

/// Generator-wide configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Defaults for optional contract parameters.
    pub defaults: ContractDefaults,

    /// Behavior when a section anchor is not found.
    pub anchor_policy: AnchorPolicy,
}

impl GeneratorConfig {
    /// Set the anchor policy.
    #[must_use]
    pub fn with_anchor_policy(mut self, policy: AnchorPolicy) -> Self {
        self.anchor_policy = policy;
        self
    }

    /// Set the contract parameter defaults.
    #[must_use]
    pub fn with_defaults(mut self, defaults: ContractDefaults) -> Self {
        self.defaults = defaults;
        self
    }
}

/// Format a date the way contracts write it: `14 de enero de 2025`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use contrato_generator::config::spanish_date;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 14).unwrap();
/// assert_eq!(spanish_date(date), "14 de enero de 2025");
/// ```
#[must_use]
pub fn spanish_date(date: NaiveDate) -> String {
    let month = SPANISH_MONTHS[date.month0() as usize];
    format!("{:02} de {month} de {}", date.day(), date.year())
}
