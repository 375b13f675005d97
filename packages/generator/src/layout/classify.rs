//! Line classification for the layout pass.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{CLAUSES_MARKER, CONTRACT_TITLE};

/// Clause ordinals at the start of a line.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CLAUSE_ORDINAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(PRIMERA|SEGUNDA|TERCERA|CUARTA|QUINTA|SEXTA|SÉPTIMA|OCTAVA|NOVENA|DECIMA|DÉCIMA)",
    )
    .expect("valid regex")
});

/// Marker of a bold special paragraph.
const SPECIAL_PARAGRAPH_MARKER: &str = "PARÁGRAFO";

/// Whole-line signature remnants from the template.
const SIGNATURE_LINES: [&str; 3] = ["EL CONTRATANTE", "EL CONTRATISTA", "."];

/// Prefixes of signature name and id lines from the template.
const SIGNATURE_PREFIXES: [&str; 3] = ["EDISÓN", "GERMÁN", "CC "];

/// Classification of one trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// The document title; emitted separately, so dropped here.
    Title,
    /// The clause section marker.
    ClausesMarker,
    /// Start of a numbered clause.
    ClauseHeading,
    /// A `PARÁGRAFO` line.
    SpecialParagraph,
    /// Leftover signature block text.
    SignatureRemnant,
    /// Empty line; terminates paragraphs.
    Blank,
    /// Ordinary paragraph text.
    Text,
}

impl LineClass {
    /// Whether this line ends a paragraph being accumulated.
    #[must_use]
    pub fn breaks_paragraph(self) -> bool {
        !matches!(self, Self::Text)
    }
}

/// Classify a trimmed line. The first matching rule wins.
#[must_use]
pub fn classify_line(line: &str) -> LineClass {
    if line.is_empty() {
        LineClass::Blank
    } else if line.contains(CONTRACT_TITLE) {
        LineClass::Title
    } else if line.contains(CLAUSES_MARKER) {
        LineClass::ClausesMarker
    } else if CLAUSE_ORDINAL.is_match(line) {
        LineClass::ClauseHeading
    } else if line.starts_with(SPECIAL_PARAGRAPH_MARKER) {
        LineClass::SpecialParagraph
    } else if is_signature_remnant(line) {
        LineClass::SignatureRemnant
    } else {
        LineClass::Text
    }
}

fn is_signature_remnant(line: &str) -> bool {
    SIGNATURE_LINES.contains(&line)
        || SIGNATURE_PREFIXES
            .iter()
            .any(|prefix| line.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_marker() {
        assert_eq!(
            classify_line("CONTRATO CIVIL DE PRESTACIÓN DE SERVICIOS"),
            LineClass::Title
        );
        assert_eq!(classify_line("CLÁUSULAS"), LineClass::ClausesMarker);
        assert_eq!(
            classify_line("según las siguientes CLÁUSULAS:"),
            LineClass::ClausesMarker
        );
    }

    #[test]
    fn test_clause_ordinals_any_case() {
        assert_eq!(classify_line("PRIMERA. OBJETO."), LineClass::ClauseHeading);
        assert_eq!(classify_line("Segunda. Valor."), LineClass::ClauseHeading);
        assert_eq!(classify_line("SÉPTIMA. AUTONOMÍA."), LineClass::ClauseHeading);
        assert_eq!(classify_line("DECIMA. DOMICILIO."), LineClass::ClauseHeading);
        assert_eq!(classify_line("DÉCIMA. DOMICILIO."), LineClass::ClauseHeading);
        assert_eq!(classify_line("La primera entrega"), LineClass::Text);
    }

    #[test]
    fn test_special_paragraph() {
        assert_eq!(
            classify_line("PARÁGRAFO PRIMERO. Los pagos."),
            LineClass::SpecialParagraph
        );
        assert_eq!(classify_line("Parágrafo suelto"), LineClass::Text);
    }

    #[test]
    fn test_signature_remnants() {
        assert_eq!(classify_line("EL CONTRATANTE"), LineClass::SignatureRemnant);
        assert_eq!(classify_line("EL CONTRATISTA"), LineClass::SignatureRemnant);
        assert_eq!(classify_line("."), LineClass::SignatureRemnant);
        assert_eq!(classify_line("EDISÓN RAMÍREZ SERNA"), LineClass::SignatureRemnant);
        assert_eq!(classify_line("GERMÁN GARCÍA"), LineClass::SignatureRemnant);
        assert_eq!(classify_line("CC 71.634.219"), LineClass::SignatureRemnant);
        assert_eq!(
            classify_line("EL CONTRATANTE pagará a EL CONTRATISTA"),
            LineClass::Text
        );
    }

    #[test]
    fn test_blank_and_breaks() {
        assert_eq!(classify_line(""), LineClass::Blank);
        assert!(LineClass::Blank.breaks_paragraph());
        assert!(LineClass::ClauseHeading.breaks_paragraph());
        assert!(!LineClass::Text.breaks_paragraph());
    }
}
