//! Core data types for the contract generator.
//!
//! Field names follow the Spanish keys of the contract data files
//! (`contratante_razon_social`, `pagos`, ...). English snake_case aliases are
//! accepted on input.

use serde::{Deserialize, Deserializer, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::config::ContractDefaults;
use crate::error::{GeneratorError, Result};

/// Fields that must be present and non-empty before generation.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "contratante_razon_social",
    "contratante_nit",
    "contratista_nombre",
    "contratista_cc",
    "objeto_servicios",
    "valor_total",
];

/// One scheduled disbursement, split into an advance and a balance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentItem {
    /// What the payment covers (e.g. "Mobiliario de recepción").
    #[serde(alias = "label", deserialize_with = "text")]
    pub concepto: String,

    /// Advance amount in whole pesos.
    #[serde(alias = "advance", deserialize_with = "amount")]
    pub anticipo: i64,

    /// Due date of the advance, free text.
    #[serde(alias = "advance_date", deserialize_with = "text")]
    pub fecha_anticipo: String,

    /// Balance paid on delivery, in whole pesos.
    #[serde(alias = "balance", deserialize_with = "amount")]
    pub saldo: i64,
}

impl PaymentItem {
    /// Create a payment item.
    #[must_use]
    pub fn new(
        concepto: impl Into<String>,
        anticipo: i64,
        fecha_anticipo: impl Into<String>,
        saldo: i64,
    ) -> Self {
        Self {
            concepto: concepto.into(),
            anticipo,
            fecha_anticipo: fecha_anticipo.into(),
            saldo,
        }
    }
}

/// The data record used to fill the contract template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractRecord {
    // Contracting party (contratante).
    #[serde(alias = "party_a_legal_name", deserialize_with = "text")]
    pub contratante_razon_social: String,
    #[serde(alias = "party_a_tax_id", deserialize_with = "text")]
    pub contratante_nit: String,
    #[serde(alias = "party_a_representative", deserialize_with = "text")]
    pub contratante_representante: String,
    #[serde(alias = "party_a_representative_id", deserialize_with = "text")]
    pub contratante_cc_representante: String,
    #[serde(alias = "party_a_municipality", deserialize_with = "text")]
    pub contratante_domicilio: String,
    #[serde(alias = "party_a_address", deserialize_with = "text")]
    pub contratante_direccion: String,

    // Service provider (contratista).
    #[serde(alias = "party_b_name", deserialize_with = "text")]
    pub contratista_nombre: String,
    #[serde(alias = "party_b_id", deserialize_with = "text")]
    pub contratista_cc: String,
    #[serde(alias = "party_b_municipality", deserialize_with = "text")]
    pub contratista_domicilio: String,
    #[serde(alias = "party_b_address", deserialize_with = "text")]
    pub contratista_direccion: String,

    /// Free-text description of the contracted services.
    #[serde(alias = "subject", deserialize_with = "text")]
    pub objeto_servicios: String,

    /// Total fee in whole pesos.
    #[serde(alias = "total_amount", deserialize_with = "amount")]
    pub valor_total: i64,

    /// Precomputed words form of the total; computed when empty.
    #[serde(alias = "total_amount_words", deserialize_with = "text")]
    pub valor_total_letras: String,

    /// Payment schedule, in contract order.
    #[serde(alias = "payments")]
    pub pagos: Vec<PaymentItem>,

    // Banking details.
    #[serde(alias = "bank", deserialize_with = "text")]
    pub banco: String,
    #[serde(alias = "account_type", deserialize_with = "text")]
    pub tipo_cuenta: String,
    #[serde(alias = "account_number", deserialize_with = "text")]
    pub numero_cuenta: String,
    #[serde(alias = "account_holder", deserialize_with = "text")]
    pub titular_cuenta: String,
    #[serde(alias = "account_holder_id", deserialize_with = "text")]
    pub cc_titular: String,

    // Signature metadata.
    #[serde(alias = "signing_date", deserialize_with = "optional_text")]
    pub fecha_firma: Option<String>,
    #[serde(alias = "signing_place", deserialize_with = "text")]
    pub lugar_firma: String,

    // Contract parameters; `None` falls back to `ContractDefaults`.
    #[serde(alias = "withholding_threshold", deserialize_with = "optional_text")]
    pub retencion_minima: Option<String>,
    #[serde(alias = "penalty_percentage", deserialize_with = "optional_text")]
    pub penalidad_porcentaje: Option<String>,
    #[serde(alias = "grace_days", deserialize_with = "optional_text")]
    pub dias_gracia: Option<String>,
}

impl ContractRecord {
    /// Return the names of mandatory fields that are missing or empty.
    ///
    /// A zero total counts as missing.
    #[must_use]
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .into_iter()
            .filter(|field| match *field {
                "valor_total" => self.valor_total == 0,
                name => self
                    .field_value(name)
                    .map_or(true, |value| value.trim().is_empty()),
            })
            .collect()
    }

    /// Validate mandatory fields and amounts.
    ///
    /// # Errors
    /// `GeneratorError::Validation` listing every problem found.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = self
            .missing_required_fields()
            .into_iter()
            .map(|field| format!("Missing required field: {field}"))
            .collect();

        if self.valor_total < 0 {
            errors.push(format!(
                "Negative amount in valor_total: {}",
                self.valor_total
            ));
        }
        for (i, pago) in self.pagos.iter().enumerate() {
            if pago.anticipo < 0 {
                errors.push(format!(
                    "Negative amount in pagos[{i}].anticipo: {}",
                    pago.anticipo
                ));
            }
            if pago.saldo < 0 {
                errors.push(format!(
                    "Negative amount in pagos[{i}].saldo: {}",
                    pago.saldo
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(GeneratorError::Validation { errors })
        }
    }

    /// Look up a scalar field by its Spanish key.
    ///
    /// Used for named `{{placeholder}}` substitution. Returns `None` for
    /// unknown names and for the payment list.
    #[must_use]
    pub fn field_value(&self, name: &str) -> Option<String> {
        let value = match name {
            "contratante_razon_social" => &self.contratante_razon_social,
            "contratante_nit" => &self.contratante_nit,
            "contratante_representante" => &self.contratante_representante,
            "contratante_cc_representante" => &self.contratante_cc_representante,
            "contratante_domicilio" => &self.contratante_domicilio,
            "contratante_direccion" => &self.contratante_direccion,
            "contratista_nombre" => &self.contratista_nombre,
            "contratista_cc" => &self.contratista_cc,
            "contratista_domicilio" => &self.contratista_domicilio,
            "contratista_direccion" => &self.contratista_direccion,
            "objeto_servicios" => &self.objeto_servicios,
            "valor_total_letras" => &self.valor_total_letras,
            "banco" => &self.banco,
            "tipo_cuenta" => &self.tipo_cuenta,
            "numero_cuenta" => &self.numero_cuenta,
            "titular_cuenta" => &self.titular_cuenta,
            "cc_titular" => &self.cc_titular,
            "lugar_firma" => &self.lugar_firma,
            "valor_total" => return Some(self.valor_total.to_string()),
            "fecha_firma" => return self.fecha_firma.clone(),
            "retencion_minima" => return self.retencion_minima.clone(),
            "penalidad_porcentaje" => return self.penalidad_porcentaje.clone(),
            "dias_gracia" => return self.dias_gracia.clone(),
            _ => return None,
        };
        Some(value.clone())
    }

    /// Resolve a named `{{placeholder}}`.
    ///
    /// Like [`ContractRecord::field_value`], but optional contract parameters
    /// fall back to `defaults`, so they always resolve.
    #[must_use]
    pub fn placeholder_value(&self, name: &str, defaults: &ContractDefaults) -> Option<String> {
        match name {
            "fecha_firma" => Some(self.signing_date(defaults)),
            "retencion_minima" => Some(self.withholding_threshold(defaults).to_string()),
            "penalidad_porcentaje" => Some(self.penalty_percentage(defaults).to_string()),
            "dias_gracia" => Some(self.grace_days(defaults).to_string()),
            name => self.field_value(name),
        }
    }

    /// Signing date, falling back to the configured default.
    #[must_use]
    pub fn signing_date(&self, defaults: &ContractDefaults) -> String {
        self.fecha_firma
            .clone()
            .unwrap_or_else(|| defaults.signing_date())
    }

    /// Withholding threshold, falling back to the configured default.
    #[must_use]
    pub fn withholding_threshold<'a>(&'a self, defaults: &'a ContractDefaults) -> &'a str {
        self.retencion_minima
            .as_deref()
            .unwrap_or(&defaults.retencion_minima)
    }

    /// Penalty percentage, falling back to the configured default.
    #[must_use]
    pub fn penalty_percentage<'a>(&'a self, defaults: &'a ContractDefaults) -> &'a str {
        self.penalidad_porcentaje
            .as_deref()
            .unwrap_or(&defaults.penalidad_porcentaje)
    }

    /// Grace period in days, falling back to the configured default.
    #[must_use]
    pub fn grace_days<'a>(&'a self, defaults: &'a ContractDefaults) -> &'a str {
        self.dias_gracia.as_deref().unwrap_or(&defaults.dias_gracia)
    }

    /// Normalize every text field to Unicode NFC.
    ///
    /// Template anchors are stored composed (`Á`, not `A` + accent), so input
    /// text is brought into the same form before substitution.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.contratante_razon_social,
            &mut self.contratante_nit,
            &mut self.contratante_representante,
            &mut self.contratante_cc_representante,
            &mut self.contratante_domicilio,
            &mut self.contratante_direccion,
            &mut self.contratista_nombre,
            &mut self.contratista_cc,
            &mut self.contratista_domicilio,
            &mut self.contratista_direccion,
            &mut self.objeto_servicios,
            &mut self.valor_total_letras,
            &mut self.banco,
            &mut self.tipo_cuenta,
            &mut self.numero_cuenta,
            &mut self.titular_cuenta,
            &mut self.cc_titular,
            &mut self.lugar_firma,
        ] {
            *field = field.nfc().collect();
        }
        for field in [
            &mut self.fecha_firma,
            &mut self.retencion_minima,
            &mut self.penalidad_porcentaje,
            &mut self.dias_gracia,
        ]
        .into_iter()
        .flatten()
        {
            *field = field.nfc().collect();
        }
        for pago in &mut self.pagos {
            pago.concepto = pago.concepto.nfc().collect();
            pago.fecha_anticipo = pago.fecha_anticipo.nfc().collect();
        }
        self
    }
}

/// Outcome of validating contract data without generating anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether the data can be used for generation.
    pub valid: bool,

    /// Human-readable summary.
    pub message: String,

    /// Individual problems, empty when valid.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Report for valid data.
    #[must_use]
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: "Contract data is valid".to_string(),
            errors: Vec::new(),
        }
    }

    /// Report for invalid data.
    #[must_use]
    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            valid: false,
            message: errors.join("; "),
            errors,
        }
    }

    /// Build a report from a validation result.
    #[must_use]
    pub fn from_result(result: Result<()>) -> Self {
        match result {
            Ok(()) => Self::valid(),
            Err(GeneratorError::Validation { errors }) => Self::invalid(errors),
            Err(other) => Self::invalid(vec![other.to_string()]),
        }
    }
}

/// Scalar values accepted where the contract expects text or amounts.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// Deserialize text that may be written as a number or be null.
fn text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_text)
        .unwrap_or_default())
}

/// Deserialize optional text that may be written as a number.
fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}

const I64_MIN_F64: f64 = i64::MIN as f64;
/// `i64::MAX + 1`, the first float that no longer fits.
const I64_MAX_F64: f64 = -(i64::MIN as f64);

/// Deserialize an amount in whole pesos.
///
/// Floats are truncated and must fit in `i64`; numeric strings are parsed.
fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i64, D::Error> {
    use serde::de::Error;

    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Scalar::Integer(i)) => Ok(i),
        Some(Scalar::Float(f)) if (I64_MIN_F64..I64_MAX_F64).contains(&f) => {
            Ok(f.trunc() as i64)
        }
        Some(Scalar::Text(s)) if s.trim().is_empty() => Ok(0),
        Some(Scalar::Text(s)) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid amount: '{s}'"))),
        Some(Scalar::Float(f)) => Err(D::Error::custom(format!("invalid amount: {f}"))),
        Some(Scalar::Bool(b)) => Err(D::Error::custom(format!("invalid amount: {b}"))),
    }
}
