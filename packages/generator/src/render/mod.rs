//! PDF rendering of laid-out contracts.
//!
//! Blocks are broken into lines with base-14 font metrics, justified through
//! PDF word spacing, paginated on US letter paper with one-inch margins and
//! written atomically.

pub mod metrics;
mod paginate;
mod pdf;

pub use paginate::{break_lines, paginate, BrokenLine, Page, PageGeometry, PlacedLine, PlacedRule};
pub use pdf::{render_pdf, save_pdf, write_atomic};
