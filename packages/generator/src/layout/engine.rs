//! Layout engine: turns substituted contract text into typed blocks.

use super::classify::{classify_line, LineClass};
use super::types::{Block, RenderedDocument, SignatureParty, SignatureTable};
use crate::config::{CLAUSES_MARKER, CONTRACT_TITLE, MIN_PARAGRAPH_CHARS};
use crate::types::ContractRecord;

/// Scanner state while walking the lines.
#[derive(Debug)]
enum ScanState {
    /// Between paragraphs.
    Idle,
    /// Collecting the lines of a body paragraph.
    Accumulating(Vec<String>),
}

/// Single-pass line scanner producing a [`RenderedDocument`].
#[derive(Debug)]
pub struct LayoutEngine {
    state: ScanState,
    blocks: Vec<Block>,
    clauses_shown: bool,
}

impl LayoutEngine {
    /// Create an engine with the title block already emitted.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ScanState::Idle,
            blocks: vec![Block::Title(CONTRACT_TITLE.to_string())],
            clauses_shown: false,
        }
    }

    /// Feed one source line.
    pub fn push_line(&mut self, raw: &str) {
        let line = raw.trim();
        let class = classify_line(line);

        if class.breaks_paragraph() {
            self.flush();
        }

        match class {
            LineClass::Title | LineClass::SignatureRemnant | LineClass::Blank => {}
            LineClass::ClausesMarker => {
                if !self.clauses_shown {
                    self.blocks.push(Block::Subtitle(CLAUSES_MARKER.to_string()));
                    self.clauses_shown = true;
                }
            }
            LineClass::ClauseHeading => self.blocks.push(Block::ClauseHeading(line.to_string())),
            LineClass::SpecialParagraph => {
                self.blocks.push(Block::SpecialParagraph(line.to_string()));
            }
            LineClass::Text => match &mut self.state {
                ScanState::Accumulating(lines) => lines.push(line.to_string()),
                ScanState::Idle => self.state = ScanState::Accumulating(vec![line.to_string()]),
            },
        }
    }

    /// Close the paragraph being accumulated, if any.
    fn flush(&mut self) {
        if let ScanState::Accumulating(lines) = std::mem::replace(&mut self.state, ScanState::Idle)
        {
            let text = lines.join(" ");
            if text.chars().count() >= MIN_PARAGRAPH_CHARS {
                self.blocks.push(Block::Body(text));
            } else {
                tracing::debug!(text = %text, "Dropping short paragraph");
            }
        }
    }

    /// Finish scanning and append the signature table.
    #[must_use]
    pub fn finish(mut self, record: &ContractRecord) -> RenderedDocument {
        self.flush();
        self.blocks
            .push(Block::SignatureTable(signature_table(record)));
        RenderedDocument::new(self.blocks)
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Lay out substituted contract text.
///
/// # Arguments
/// * `text` - Contract text after substitution
/// * `record` - Record supplying the signature table names and ids
///
/// # Returns
/// Title, subtitle, clause headings, paragraphs and the signature table, in
/// reading order
#[must_use]
pub fn layout_contract(text: &str, record: &ContractRecord) -> RenderedDocument {
    let mut engine = LayoutEngine::new();
    for line in text.lines() {
        engine.push_line(line);
    }
    let document = engine.finish(record);
    tracing::debug!(blocks = document.len(), "Layout complete");
    document
}

fn signature_table(record: &ContractRecord) -> SignatureTable {
    SignatureTable::new(
        &SignatureParty {
            name: record.contratante_representante.clone(),
            role: "EL CONTRATANTE".to_string(),
            id: record.contratante_cc_representante.clone(),
        },
        &SignatureParty {
            name: record.contratista_nombre.clone(),
            role: "EL CONTRATISTA".to_string(),
            id: record.contratista_cc.clone(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::BlockKind;
    use pretty_assertions::assert_eq;

    fn record() -> ContractRecord {
        ContractRecord {
            contratante_representante: "Luis Toro".to_string(),
            contratante_cc_representante: "71.000.111".to_string(),
            contratista_nombre: "Ana Gómez".to_string(),
            contratista_cc: "43.555.666".to_string(),
            ..ContractRecord::default()
        }
    }

    fn kinds(doc: &RenderedDocument) -> Vec<BlockKind> {
        doc.blocks().iter().map(Block::kind).collect()
    }

    #[test]
    fn test_paragraph_lines_are_joined() {
        let text = "CONTRATO CIVIL DE PRESTACIÓN DE SERVICIOS\n\nEntre los suscritos\n  a saber, las partes\n\nOtro párrafo aquí.";
        let doc = layout_contract(text, &record());

        assert_eq!(
            doc.texts(BlockKind::Body),
            vec!["Entre los suscritos a saber, las partes", "Otro párrafo aquí."]
        );
        assert_eq!(doc.count(BlockKind::Title), 1);
    }

    #[test]
    fn test_block_sequence() {
        let text = "Preámbulo del contrato.\nCLÁUSULAS\nPRIMERA. OBJETO.\nTexto de la primera.\nPARÁGRAFO. Nota.\nSEGUNDA. VALOR.\nTexto de la segunda.\n\nEL CONTRATANTE\n.\nEDISÓN RAMÍREZ\nCC 71.634.219";
        let doc = layout_contract(text, &record());

        assert_eq!(
            kinds(&doc),
            vec![
                BlockKind::Title,
                BlockKind::Body,
                BlockKind::Subtitle,
                BlockKind::ClauseHeading,
                BlockKind::Body,
                BlockKind::SpecialParagraph,
                BlockKind::ClauseHeading,
                BlockKind::Body,
                BlockKind::SignatureTable,
            ]
        );
    }

    #[test]
    fn test_clauses_marker_emitted_once() {
        let text = "CLÁUSULAS\nPrimer párrafo largo.\nCLÁUSULAS\nSegundo párrafo largo.";
        let doc = layout_contract(text, &record());

        assert_eq!(doc.count(BlockKind::Subtitle), 1);
        assert_eq!(doc.texts(BlockKind::Subtitle), vec!["CLÁUSULAS"]);
        assert_eq!(doc.count(BlockKind::Body), 2);
    }

    #[test]
    fn test_short_paragraphs_dropped() {
        let doc = layout_contract("Hola\n\nabcde\n\nabcdef", &record());
        assert_eq!(doc.texts(BlockKind::Body), vec!["abcdef"]);
    }

    #[test]
    fn test_accented_length_counts_characters() {
        // Five characters, more than five bytes.
        let doc = layout_contract("ÁÉÍÓÚ", &record());
        assert_eq!(doc.count(BlockKind::Body), 0);
    }

    #[test]
    fn test_signature_table_always_last() {
        let doc = layout_contract("", &record());
        assert_eq!(kinds(&doc), vec![BlockKind::Title, BlockKind::SignatureTable]);

        let Some(Block::SignatureTable(table)) = doc.blocks().last() else {
            panic!("expected signature table");
        };
        assert_eq!(table.rows.len(), 5);
    }
}
