//! Loading contract records from JSON and YAML.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{GeneratorError, Result};
use crate::types::ContractRecord;

/// Input formats for record files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    Yaml,
}

impl RecordFormat {
    /// Pick the format from the file extension.
    ///
    /// # Errors
    /// `GeneratorError::UnsupportedFormat` for anything other than `.json`,
    /// `.yaml` or `.yml`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(GeneratorError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Parse a record from text in the given format.
///
/// # Errors
/// JSON or YAML syntax errors, or values of the wrong type.
pub fn parse_record(text: &str, format: RecordFormat) -> Result<ContractRecord> {
    let record: ContractRecord = match format {
        RecordFormat::Json => serde_json::from_str(text)?,
        RecordFormat::Yaml => serde_yaml_ng::from_str(text)?,
    };
    Ok(record.normalized())
}

/// Load a record from a `.json`, `.yaml` or `.yml` file.
///
/// # Errors
/// IO errors, unsupported extensions and parse errors.
pub fn load_record(path: impl AsRef<Path>) -> Result<ContractRecord> {
    let path = path.as_ref();
    let format = RecordFormat::from_path(path)?;
    let text = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), ?format, "Loading contract record");
    parse_record(&text, format)
}

/// Build a record from an in-memory JSON value.
///
/// # Errors
/// `GeneratorError::Json` if a field has the wrong type.
pub fn record_from_value(value: &Value) -> Result<ContractRecord> {
    let record = ContractRecord::deserialize(value)?;
    Ok(record.normalized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            RecordFormat::from_path(Path::new("a.JSON")).unwrap(),
            RecordFormat::Json
        );
        assert_eq!(
            RecordFormat::from_path(Path::new("a.yml")).unwrap(),
            RecordFormat::Yaml
        );
        assert!(matches!(
            RecordFormat::from_path(Path::new("a.txt")),
            Err(GeneratorError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_yaml_record() {
        let yaml = r#"
contratante_razon_social: Acme S.A.S
contratista_cc: 43555666
valor_total: 1500000
pagos:
  - concepto: Único pago
    anticipo: 500000
    fecha_anticipo: 1 de mayo de 2025
    saldo: 1000000
"#;
        let record = parse_record(yaml, RecordFormat::Yaml).unwrap();
        assert_eq!(record.contratante_razon_social, "Acme S.A.S");
        assert_eq!(record.contratista_cc, "43555666");
        assert_eq!(record.valor_total, 1_500_000);
        assert_eq!(record.pagos.len(), 1);
        assert_eq!(record.pagos[0].saldo, 1_000_000);
    }

    #[test]
    fn test_load_record_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("datos.json");
        fs::write(&path, r#"{"contratista_nombre": "Ana", "valor_total": 10}"#).unwrap();

        let record = load_record(&path).unwrap();
        assert_eq!(record.contratista_nombre, "Ana");
        assert_eq!(record.valor_total, 10);
    }

    #[test]
    fn test_load_record_bad_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("datos.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(load_record(&path), Err(GeneratorError::Json(_))));
    }

    #[test]
    fn test_record_from_value() {
        let record = record_from_value(&json!({"party_b_name": "Ana"})).unwrap();
        assert_eq!(record.contratista_nombre, "Ana");

        assert!(record_from_value(&json!({"pagos": "no es una lista"})).is_err());
    }
}
