//! Document layout: classify substituted text into typed blocks.
//!
//! Each line is trimmed and classified (title, clause marker, clause heading,
//! special paragraph, signature remnant, blank, text). A two-state scanner
//! joins consecutive text lines into paragraphs and always appends the
//! signature table at the end.

mod classify;
mod engine;
pub mod style;
mod types;

pub use classify::{classify_line, LineClass};
pub use engine::{layout_contract, LayoutEngine};
pub use style::{style_for, Alignment, BlockStyle, FontFace};
pub use types::{
    Block, BlockKind, RenderedDocument, SignatureParty, SignatureRow, SignatureTable,
    SIGNATURE_ROW_PADDING,
};
