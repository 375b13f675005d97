//! Line breaking and pagination.
//!
//! Produces positioned lines and rules in PDF user space (points, origin at
//! the bottom-left corner). Nothing here depends on the PDF writer, so page
//! breaking can be tested on its own.

use textwrap::core::Fragment;
use textwrap::wrap_algorithms::wrap_first_fit;

use super::metrics::text_width;
use crate::config::{PAGE_HEIGHT_MM, PAGE_MARGIN_PT, PAGE_WIDTH_MM};
use crate::layout::style::{SIGNATURE_GAP, SUBTITLE_GAP_AFTER, SUBTITLE_GAP_BEFORE, TITLE_GAP};
use crate::layout::{
    style_for, Alignment, Block, BlockKind, BlockStyle, FontFace, RenderedDocument,
    SignatureRow, SignatureTable, SIGNATURE_ROW_PADDING,
};

/// Points per millimetre.
const PT_PER_MM: f32 = 72.0 / 25.4;

/// Horizontal padding inside each signature cell.
const CELL_PADDING: f32 = 6.0;

/// Page size and margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: PAGE_WIDTH_MM * PT_PER_MM,
            height: PAGE_HEIGHT_MM * PT_PER_MM,
            margin: PAGE_MARGIN_PT,
        }
    }
}

impl PageGeometry {
    /// Width of the text column.
    #[must_use]
    pub fn column_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    fn top(&self) -> f32 {
        self.height - self.margin
    }

    fn bottom(&self) -> f32 {
        self.margin
    }
}

/// A line of text at a fixed position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub font: FontFace,
    pub size: f32,
    pub x: f32,
    /// Baseline height above the bottom edge.
    pub y: f32,
    /// Extra space added to every space character (PDF `Tw`).
    pub word_spacing: f32,
}

/// A horizontal rule.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRule {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
    pub thickness: f32,
}

/// Everything drawn on one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
    pub rules: Vec<PlacedRule>,
}

impl Page {
    fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rules.is_empty()
    }
}

/// A word measured in points, as seen by the line breaker.
#[derive(Debug)]
struct Word<'a> {
    text: &'a str,
    width: f64,
    whitespace: f64,
}

impl Fragment for Word<'_> {
    fn width(&self) -> f64 {
        self.width
    }

    fn whitespace_width(&self) -> f64 {
        self.whitespace
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

/// One broken line before it is positioned.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokenLine {
    pub text: String,
    /// Natural width of the text.
    pub width: f32,
    /// Number of inter-word spaces.
    pub gaps: usize,
}

/// Break `text` into lines no wider than `max_width` using first-fit.
///
/// A single word wider than the column gets a line of its own.
#[must_use]
pub fn break_lines(text: &str, font: FontFace, size: f32, max_width: f32) -> Vec<BrokenLine> {
    let space = f64::from(text_width(font, size, " "));
    let words: Vec<Word<'_>> = text
        .split_whitespace()
        .map(|w| Word {
            text: w,
            width: f64::from(text_width(font, size, w)),
            whitespace: space,
        })
        .collect();

    wrap_first_fit(&words, &[f64::from(max_width)])
        .into_iter()
        .map(|line| {
            let text = line.iter().map(|w| w.text).collect::<Vec<_>>().join(" ");
            let gaps = line.len().saturating_sub(1);
            BrokenLine {
                width: text_width(font, size, &text),
                text,
                gaps,
            }
        })
        .collect()
}

/// Vertical cursor over a growing list of pages.
struct Cursor {
    geometry: PageGeometry,
    pages: Vec<Page>,
    y: f32,
}

impl Cursor {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Page::default()],
            y: geometry.top(),
        }
    }

    fn at_page_top(&self) -> bool {
        self.current().is_empty()
    }

    fn current(&self) -> &Page {
        &self.pages[self.pages.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Move down by `gap`, unless at the top of a page.
    fn skip(&mut self, gap: f32) {
        if !self.at_page_top() {
            self.y -= gap;
        }
    }

    /// Start a new page if `height` does not fit above the bottom margin.
    fn reserve(&mut self, height: f32) {
        if self.y - height < self.geometry.bottom() && !self.at_page_top() {
            tracing::debug!(page = self.pages.len() + 1, "Starting new page");
            self.pages.push(Page::default());
            self.y = self.geometry.top();
        }
    }

    fn finish(self) -> Vec<Page> {
        self.pages
    }
}

/// Place every block of the document on pages.
///
/// # Arguments
/// * `document` - Blocks produced by the layout pass
/// * `geometry` - Page size and margins
///
/// # Returns
/// At least one page; the signature table is never split across pages
#[must_use]
pub fn paginate(document: &RenderedDocument, geometry: &PageGeometry) -> Vec<Page> {
    let mut cursor = Cursor::new(*geometry);

    for block in document.blocks() {
        match block {
            Block::SignatureTable(table) => place_signature_table(&mut cursor, table),
            other => {
                let Some(style) = style_for(other.kind()) else {
                    continue;
                };
                let text = other.text().unwrap_or_default();
                let (gap_before, gap_after) = match other.kind() {
                    BlockKind::Title => (0.0, TITLE_GAP),
                    BlockKind::Subtitle => (SUBTITLE_GAP_BEFORE, SUBTITLE_GAP_AFTER),
                    _ => (0.0, 0.0),
                };
                cursor.skip(gap_before + style.space_before);
                place_text(&mut cursor, text, style);
                cursor.y -= style.space_after + gap_after;
            }
        }
    }

    let pages = cursor.finish();
    tracing::debug!(pages = pages.len(), "Pagination complete");
    pages
}

fn place_text(cursor: &mut Cursor, text: &str, style: &BlockStyle) {
    let column = cursor.geometry.column_width();
    let margin = cursor.geometry.margin;
    let lines = break_lines(text, style.font, style.size, column);
    let last = lines.len().saturating_sub(1);

    for (i, line) in lines.into_iter().enumerate() {
        cursor.reserve(style.leading);

        let (x, word_spacing) = match style.alignment {
            Alignment::Center => (margin + (column - line.width).max(0.0) / 2.0, 0.0),
            Alignment::Justify if i < last && line.gaps > 0 => {
                let slack = (column - line.width).max(0.0);
                (margin, slack / line.gaps as f32)
            }
            Alignment::Justify => (margin, 0.0),
        };

        let y = cursor.y - style.size;
        cursor.current_mut().lines.push(PlacedLine {
            text: line.text,
            font: style.font,
            size: style.size,
            x,
            y,
            word_spacing,
        });
        cursor.y -= style.leading;
    }
}

fn place_signature_table(cursor: &mut Cursor, table: &SignatureTable) {
    cursor.skip(SIGNATURE_GAP);
    cursor.reserve(table.height());

    let total = 2.0 * table.column_width;
    let left = cursor.geometry.margin + (cursor.geometry.column_width() - total).max(0.0) / 2.0;
    let columns = [left, left + table.column_width];

    for row in &table.rows {
        match row {
            SignatureRow::Spacer { height } => cursor.y -= height,
            SignatureRow::Rule { thickness } => {
                let y = cursor.y;
                for x in columns {
                    cursor.current_mut().rules.push(PlacedRule {
                        x1: x + CELL_PADDING,
                        x2: x + table.column_width - CELL_PADDING,
                        y,
                        thickness: *thickness,
                    });
                }
                cursor.y -= thickness + 8.0;
            }
            SignatureRow::Text { cells, font, size } => {
                cursor.y -= SIGNATURE_ROW_PADDING;
                let y = cursor.y - size;
                for (x, cell) in columns.into_iter().zip(cells.iter()) {
                    let width = text_width(*font, *size, cell);
                    cursor.current_mut().lines.push(PlacedLine {
                        text: cell.clone(),
                        font: *font,
                        size: *size,
                        x: x + (table.column_width - width).max(0.0) / 2.0,
                        y,
                        word_spacing: 0.0,
                    });
                }
                cursor.y -= size * 1.2 + SIGNATURE_ROW_PADDING;
            }
        }
    }
}
