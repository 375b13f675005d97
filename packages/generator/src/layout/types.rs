//! Block types produced by the layout pass.

use serde::Serialize;

use super::style::{FontFace, SIGNATURE_COLUMN_WIDTH, SIGNATURE_RULE_THICKNESS};

/// Kind of a document block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Title,
    Subtitle,
    ClauseHeading,
    SpecialParagraph,
    Body,
    SignatureTable,
}

/// One typed block of the rendered contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Block {
    /// Document title, emitted once.
    Title(String),
    /// The `CLÁUSULAS` heading.
    Subtitle(String),
    /// `PRIMERA. OBJETO DEL CONTRATO.` and friends.
    ClauseHeading(String),
    /// Bold `PARÁGRAFO` paragraph.
    SpecialParagraph(String),
    /// Ordinary paragraph, possibly joined from several source lines.
    Body(String),
    /// Closing signature table.
    SignatureTable(SignatureTable),
}

impl Block {
    /// Return the kind of this block.
    #[must_use]
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Title(_) => BlockKind::Title,
            Self::Subtitle(_) => BlockKind::Subtitle,
            Self::ClauseHeading(_) => BlockKind::ClauseHeading,
            Self::SpecialParagraph(_) => BlockKind::SpecialParagraph,
            Self::Body(_) => BlockKind::Body,
            Self::SignatureTable(_) => BlockKind::SignatureTable,
        }
    }

    /// Text of a text block; `None` for the signature table.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Title(text)
            | Self::Subtitle(text)
            | Self::ClauseHeading(text)
            | Self::SpecialParagraph(text)
            | Self::Body(text) => Some(text),
            Self::SignatureTable(_) => None,
        }
    }
}

/// One signing party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureParty {
    pub name: String,
    pub role: String,
    pub id: String,
}

/// A row of the signature table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum SignatureRow {
    /// Blank space left for the handwritten signatures.
    Spacer { height: f32 },
    /// Horizontal rule over each column.
    Rule { thickness: f32 },
    /// Centered text, one cell per column.
    Text {
        cells: [String; 2],
        font: FontFace,
        size: f32,
    },
}

/// Two-column signature block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignatureTable {
    pub rows: Vec<SignatureRow>,
    /// Width of each column in points.
    pub column_width: f32,
}

/// Vertical padding above and below every text row.
pub const SIGNATURE_ROW_PADDING: f32 = 4.0;

impl SignatureTable {
    /// Build the table for the contracting party (left) and provider (right).
    ///
    /// Names are shown upper-cased in bold, roles and ids in regular type.
    #[must_use]
    pub fn new(contratante: &SignatureParty, contratista: &SignatureParty) -> Self {
        let rows = vec![
            SignatureRow::Spacer { height: 32.0 },
            SignatureRow::Rule {
                thickness: SIGNATURE_RULE_THICKNESS,
            },
            SignatureRow::Text {
                cells: [
                    contratante.name.to_uppercase(),
                    contratista.name.to_uppercase(),
                ],
                font: FontFace::HelveticaBold,
                size: 10.0,
            },
            SignatureRow::Text {
                cells: [contratante.role.clone(), contratista.role.clone()],
                font: FontFace::Helvetica,
                size: 9.0,
            },
            SignatureRow::Text {
                cells: [
                    format!("CC: {}", contratante.id),
                    format!("CC: {}", contratista.id),
                ],
                font: FontFace::Helvetica,
                size: 9.0,
            },
        ];

        Self {
            rows,
            column_width: SIGNATURE_COLUMN_WIDTH,
        }
    }

    /// Total height of the table in points.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows
            .iter()
            .map(|row| match row {
                SignatureRow::Spacer { height } => *height,
                SignatureRow::Rule { thickness } => thickness + 8.0,
                SignatureRow::Text { size, .. } => size * 1.2 + 2.0 * SIGNATURE_ROW_PADDING,
            })
            .sum()
    }
}

/// The contract as an ordered sequence of typed blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderedDocument {
    blocks: Vec<Block>,
}

impl RenderedDocument {
    /// Create a document from blocks.
    #[must_use]
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Blocks in reading order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the document has no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Count blocks of a given kind.
    #[must_use]
    pub fn count(&self, kind: BlockKind) -> usize {
        self.blocks.iter().filter(|b| b.kind() == kind).count()
    }

    /// Texts of all blocks of a given kind, in order.
    #[must_use]
    pub fn texts(&self, kind: BlockKind) -> Vec<&str> {
        self.blocks
            .iter()
            .filter(|b| b.kind() == kind)
            .filter_map(Block::text)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party(name: &str, role: &str, id: &str) -> SignatureParty {
        SignatureParty {
            name: name.to_string(),
            role: role.to_string(),
            id: id.to_string(),
        }
    }

    #[test]
    fn test_signature_table_rows() {
        let table = SignatureTable::new(
            &party("Edison Ramírez", "EL CONTRATANTE", "71.634.219"),
            &party("Germán García", "EL CONTRATISTA", "79.155.480"),
        );

        assert_eq!(table.rows.len(), 5);
        assert!(matches!(table.rows[0], SignatureRow::Spacer { .. }));
        assert_eq!(table.rows[1], SignatureRow::Rule { thickness: 1.5 });
        let SignatureRow::Text { cells, font, size } = &table.rows[2] else {
            panic!("expected names row");
        };
        assert_eq!(cells, &["EDISON RAMÍREZ".to_string(), "GERMÁN GARCÍA".to_string()]);
        assert_eq!(*font, FontFace::HelveticaBold);
        assert_eq!(*size, 10.0);
        let SignatureRow::Text { cells, .. } = &table.rows[4] else {
            panic!("expected id row");
        };
        assert_eq!(cells[1], "CC: 79.155.480");
        assert!(table.height() > 32.0);
    }

    #[test]
    fn test_document_queries() {
        let doc = RenderedDocument::new(vec![
            Block::Title("T".to_string()),
            Block::Body("uno".to_string()),
            Block::Body("dos".to_string()),
        ]);
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.count(BlockKind::Body), 2);
        assert_eq!(doc.texts(BlockKind::Body), vec!["uno", "dos"]);
        assert_eq!(doc.blocks()[0].kind(), BlockKind::Title);
    }
}
