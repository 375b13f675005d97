//! Static style table for document blocks.
//!
//! All measurements are in PDF points (1/72 inch).

use serde::Serialize;

use super::types::BlockKind;

/// The PDF base-14 faces the contract uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
    TimesRoman,
    TimesBold,
}

/// Horizontal alignment of a block within the text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Center,
    Justify,
}

/// Typography and spacing for one block kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockStyle {
    pub font: FontFace,
    pub size: f32,
    /// Baseline-to-baseline distance.
    pub leading: f32,
    pub space_before: f32,
    pub space_after: f32,
    pub alignment: Alignment,
}

pub const TITLE: BlockStyle = BlockStyle {
    font: FontFace::HelveticaBold,
    size: 14.0,
    leading: 18.0,
    space_before: 0.0,
    space_after: 24.0,
    alignment: Alignment::Center,
};

pub const SUBTITLE: BlockStyle = BlockStyle {
    font: FontFace::HelveticaBold,
    size: 12.0,
    leading: 14.0,
    space_before: 18.0,
    space_after: 12.0,
    alignment: Alignment::Center,
};

pub const CLAUSE_HEADING: BlockStyle = BlockStyle {
    font: FontFace::HelveticaBold,
    size: 11.0,
    leading: 14.0,
    space_before: 16.0,
    space_after: 8.0,
    alignment: Alignment::Justify,
};

pub const SPECIAL_PARAGRAPH: BlockStyle = BlockStyle {
    font: FontFace::TimesBold,
    size: 11.0,
    leading: 16.0,
    space_before: 8.0,
    space_after: 12.0,
    alignment: Alignment::Justify,
};

pub const BODY: BlockStyle = BlockStyle {
    font: FontFace::TimesRoman,
    size: 11.0,
    leading: 16.0,
    space_before: 0.0,
    space_after: 12.0,
    alignment: Alignment::Justify,
};

/// Extra gap after the title (0.3in).
pub const TITLE_GAP: f32 = 21.6;

/// Extra gap before the subtitle (0.2in).
pub const SUBTITLE_GAP_BEFORE: f32 = 14.4;

/// Extra gap after the subtitle (0.15in).
pub const SUBTITLE_GAP_AFTER: f32 = 10.8;

/// Gap between the last paragraph and the signature table (0.5in).
pub const SIGNATURE_GAP: f32 = 36.0;

/// Width of each signature column (3.25in).
pub const SIGNATURE_COLUMN_WIDTH: f32 = 234.0;

/// Thickness of the signature rule.
pub const SIGNATURE_RULE_THICKNESS: f32 = 1.5;

/// Look up the style of a text block.
///
/// The signature table has per-row styles and returns `None`.
#[must_use]
pub fn style_for(kind: BlockKind) -> Option<&'static BlockStyle> {
    match kind {
        BlockKind::Title => Some(&TITLE),
        BlockKind::Subtitle => Some(&SUBTITLE),
        BlockKind::ClauseHeading => Some(&CLAUSE_HEADING),
        BlockKind::SpecialParagraph => Some(&SPECIAL_PARAGRAPH),
        BlockKind::Body => Some(&BODY),
        BlockKind::SignatureTable => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_table() {
        let body = style_for(BlockKind::Body).unwrap();
        assert_eq!(body.font, FontFace::TimesRoman);
        assert_eq!(body.alignment, Alignment::Justify);

        let special = style_for(BlockKind::SpecialParagraph).unwrap();
        assert_eq!(special.font, FontFace::TimesBold);
        assert_eq!(special.space_before, 8.0);

        assert_eq!(style_for(BlockKind::Title).unwrap().alignment, Alignment::Center);
        assert!(style_for(BlockKind::SignatureTable).is_none());
    }
}
