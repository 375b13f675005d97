//! End-to-end integration tests for the contract generator.
//!
//! Runs the bundled template through substitution, layout and PDF output
//! using the example record in `tests/fixtures/example_data.json`.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::tempdir;

use contrato_generator::layout::SignatureRow;
use contrato_generator::{
    generate_contract_from_file, generate_contract_from_value, load_record, AnchorPolicy, Block,
    BlockKind, ContractGenerator, ContractRecord, ContractTemplate, GeneratorConfig,
    GeneratorError, PaymentItem,
};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load the example record.
fn example_record() -> ContractRecord {
    let path = fixture_path("example_data.json");
    load_record(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn example_value() -> Value {
    let text = fs::read_to_string(fixture_path("example_data.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn substituted(record: &ContractRecord) -> String {
    let substitution = ContractGenerator::builtin().substitute(record).unwrap();
    assert!(
        substitution.is_clean(),
        "unexpected warnings: {:?}",
        substitution.warnings
    );
    substitution.text
}

fn bullet_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|line| line.starts_with("• ")).collect()
}

#[test]
fn test_template_anchors_replaced() {
    let record = example_record();
    let text = substituted(&record);

    for anchor in [
        "Dulces El Trapiche S.A.S",
        "890932227",
        "Edison Ramírez Serna Quintero",
        "Cra 51 # 95A Sur -13",
        "GERMÁN GARCÍA PÉREZ",
        "79155480",
        "79.155.480",
        "Bancolombia",
        "cuenta de ahorros",
        "912-381559-89",
        "Daniel García Araque",
        "1000718485",
        "La Estrella",
        "Sabaneta",
        "carera 40 # 71 sur-15",
        "Mobiliario de recepción",
        "siete (14) días del mes de enero",
        "$ 1'344.573",
    ] {
        assert!(!text.contains(anchor), "anchor '{anchor}' still present");
    }

    for value in [
        "Carpintería Los Andes S.A.S",
        "901456789-2",
        "María Fernanda Restrepo Gil",
        "Calle 10 # 43-25",
        "JORGE IVÁN MEJÍA RÍOS",
        "98.765.432",
        "Banco de Bogotá",
        "cuenta de corriente",
        "123-456789-01",
        "Jorge Iván Mejía Ríos",
        "98765432",
        "domicilio principal en el municipio de Medellín, Antioquia",
        "con domicilio en el municipio de Itagüí",
        "dirección: carrera 52 # 48-10",
        "Medellín, Antioquia a los 14 de enero de 2025",
        "$ 1.344.573",
        "20%",
        "cinco (5) días hábiles",
    ] {
        assert!(text.contains(value), "value '{value}' missing");
    }
}

#[test]
fn test_subject_section_replaced() {
    let text = substituted(&example_record());
    assert!(text.contains(
        "prestará los servicios de: diseño, fabricación e instalación de cocina integral y \
         closets en el apartamento 502 de la Torre 3\nEstos servicios"
    ));
    assert!(!text.contains("mobiliario en madera"));
}

#[test]
fn test_total_fee_scenario() {
    let text = substituted(&example_record());
    assert!(text.contains(
        "la suma de: SIETE MILLONES CUARENTA MIL SEISCIENTOS SESENTA Y SIETE PESOS M/Cte, \
         $ 7'040.667, discriminados de la siguiente manera:"
    ));
}

#[test]
fn test_payment_lines_in_order() {
    let text = substituted(&example_record());
    let bullets = bullet_lines(&text);

    assert_eq!(
        bullets,
        vec![
            "• Cocina integral pagaderos: DOS MILLONES NOVECIENTOS CUATRO MIL CUATROCIENTOS \
             PESOS M/Cte $ 2'904.400 el día 20 de enero de 2025 y UN MILLÓN TRESCIENTOS \
             VEINTE MIL PESOS M/Cte $ 1'320.000 al momento de la entrega.",
            "• Closets pagaderos: DOS MILLONES TRESCIENTOS DIECISÉIS MIL DOSCIENTOS SESENTA Y \
             SIETE PESOS M/Cte $ 2'316.267 el día 3 de febrero de 2025 y QUINIENTOS MIL \
             PESOS M/Cte $ 500.000 al momento de la entrega.",
        ]
    );

    let after_bullets = text
        .lines()
        .skip_while(|line| !line.starts_with("• Closets"))
        .nth(1)
        .unwrap();
    assert!(after_bullets.starts_with("El contratista podrá emitir"));
}

#[test]
fn test_payment_count_matches_items() {
    let pagos: Vec<PaymentItem> = (1..=5)
        .map(|i| PaymentItem::new(format!("Entrega {i}"), i * 1_000, format!("{i} de marzo"), 0))
        .collect();
    let record = ContractRecord {
        pagos,
        ..example_record()
    };
    let text = substituted(&record);
    let bullets = bullet_lines(&text);

    assert_eq!(bullets.len(), 5);
    for (i, line) in bullets.iter().enumerate() {
        assert!(line.starts_with(&format!("• Entrega {} pagaderos:", i + 1)));
    }
}

#[test]
fn test_zero_payments_leave_breakdown_untouched() {
    let record = ContractRecord {
        pagos: Vec::new(),
        ..example_record()
    };
    let text = substituted(&record);

    let bullets = bullet_lines(&text);
    assert_eq!(bullets.len(), 2);
    assert!(bullets[0].starts_with("• Mobiliario de recepción pagaderos:"));
}

#[test]
fn test_constants_from_record_override_defaults() {
    let record = ContractRecord {
        retencion_minima: Some("2.000.000".to_string()),
        penalidad_porcentaje: Some("15".to_string()),
        dias_gracia: Some("10".to_string()),
        ..example_record()
    };
    let text = substituted(&record);

    assert!(text.contains("superior a $ 2.000.000,"));
    assert!(text.contains("equivalente al 15% del valor total"));
    assert!(text.contains("cinco (10) días hábiles"));
}

#[test]
fn test_layout_of_example_contract() {
    let generator = ContractGenerator::builtin();
    let record = example_record();
    let substitution = generator.substitute(&record).unwrap();
    let document = generator.layout(&substitution.text, &record);

    assert_eq!(document.count(BlockKind::Title), 1);
    assert_eq!(document.texts(BlockKind::Subtitle), vec!["CLÁUSULAS"]);
    assert_eq!(document.count(BlockKind::ClauseHeading), 10);
    assert_eq!(document.count(BlockKind::SpecialParagraph), 3);
    assert_eq!(document.blocks()[0].kind(), BlockKind::Title);

    let headings = document.texts(BlockKind::ClauseHeading);
    assert!(headings[0].starts_with("PRIMERA."));
    assert!(headings[9].starts_with("DÉCIMA."));

    // Signature remnants from the template never reach the body.
    for body in document.texts(BlockKind::Body) {
        assert_ne!(body, "EL CONTRATANTE");
        assert!(!body.starts_with("CC "));
    }

    let Some(Block::SignatureTable(table)) = document.blocks().last() else {
        panic!("signature table must be the last block");
    };
    let texts: Vec<&[String; 2]> = table
        .rows
        .iter()
        .filter_map(|row| match row {
            SignatureRow::Text { cells, .. } => Some(cells),
            _ => None,
        })
        .collect();
    assert_eq!(
        texts[0],
        &[
            "MARÍA FERNANDA RESTREPO GIL".to_string(),
            "JORGE IVÁN MEJÍA RÍOS".to_string()
        ]
    );
    assert_eq!(
        texts[2],
        &["CC: 43.211.908".to_string(), "CC: 98.765.432".to_string()]
    );
}

#[test]
fn test_duplicate_clauses_marker_single_subtitle() {
    let template = ContractTemplate::from_text(&format!(
        "{}\n\nCLÁUSULAS\n\nPRIMERA. OBJETO.\nTexto.\n\nCLÁUSULAS\n\nSEGUNDA. VALOR.",
        ContractTemplate::builtin().content()
    ));
    let generator = ContractGenerator::from_template(template, GeneratorConfig::default());
    let record = example_record();
    let substitution = generator.substitute(&record).unwrap();
    let document = generator.layout(&substitution.text, &record);

    assert_eq!(document.count(BlockKind::Subtitle), 1);
}

#[test]
fn test_generate_from_file_writes_pdf() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("contratos").join("contrato.pdf");

    let path =
        generate_contract_from_file(fixture_path("example_data.json"), None, &output).unwrap();

    assert_eq!(path, output);
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.len() > 1_000);
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn test_generate_from_value_with_template_file() {
    let dir = tempdir().unwrap();
    let template_path = dir.path().join("plantilla.txt");
    fs::write(&template_path, ContractTemplate::builtin().content()).unwrap();
    let output = dir.path().join("contrato.pdf");

    let path = generate_contract_from_value(&example_value(), Some(&template_path), &output)
        .unwrap();
    assert!(fs::metadata(path).unwrap().len() > 0);
}

#[test]
fn test_missing_template_is_generation_failure() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("contrato.pdf");

    let err = generate_contract_from_value(
        &example_value(),
        Some(Path::new("/nonexistent/plantilla.txt")),
        &output,
    )
    .unwrap_err();

    assert!(matches!(err, GeneratorError::GenerationFailed { .. }));
    assert!(matches!(err.root_cause(), GeneratorError::TemplateLoad { .. }));
    assert!(!output.exists());
}

#[test]
fn test_validation_names_missing_field() {
    let generator = ContractGenerator::builtin();

    let report = generator.validate_contract_data(&example_value());
    assert!(report.valid);

    let mut value = example_value();
    value.as_object_mut().unwrap().remove("contratista_cc");
    let report = generator.validate_contract_data(&value);
    assert!(!report.valid);
    assert_eq!(report.errors, vec!["Missing required field: contratista_cc"]);

    let dir = tempdir().unwrap();
    let output = dir.path().join("contrato.pdf");
    let err = generator
        .generate_from_value(&value, &output)
        .unwrap_err();
    assert!(err.to_string().contains("contratista_cc"));
    assert!(!output.exists());
}

#[test]
fn test_strict_anchors_with_edited_template() {
    let edited = ContractTemplate::builtin()
        .content()
        .replace("prestará los servicios de:", "realizará:");
    let record = example_record();

    let soft = ContractGenerator::from_template(
        ContractTemplate::from_text(&edited),
        GeneratorConfig::default(),
    );
    let substitution = soft.substitute(&record).unwrap();
    assert_eq!(substitution.warnings.len(), 1);
    assert!(substitution.warnings[0].contains("objeto_servicios"));

    let strict = ContractGenerator::from_template(
        ContractTemplate::from_text(&edited),
        GeneratorConfig::default().with_anchor_policy(AnchorPolicy::FailLoud),
    );
    let err = strict.substitute(&record).unwrap_err();
    assert!(matches!(
        err,
        GeneratorError::AnchorNotFound { ref rule } if rule == "objeto_servicios"
    ));
}
