//! PDF output using the base-14 fonts.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Pt,
};

use super::paginate::{paginate, Page, PageGeometry};
use crate::config::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::error::{GeneratorError, Result};
use crate::layout::{FontFace, RenderedDocument};

/// The four faces registered in every document.
struct Fonts {
    helvetica: IndirectFontRef,
    helvetica_bold: IndirectFontRef,
    times_roman: IndirectFontRef,
    times_bold: IndirectFontRef,
}

impl Fonts {
    fn register(doc: &PdfDocumentReference) -> Result<Self> {
        let add = |font| {
            doc.add_builtin_font(font)
                .map_err(|e| GeneratorError::Render(e.to_string()))
        };
        Ok(Self {
            helvetica: add(BuiltinFont::Helvetica)?,
            helvetica_bold: add(BuiltinFont::HelveticaBold)?,
            times_roman: add(BuiltinFont::TimesRoman)?,
            times_bold: add(BuiltinFont::TimesBold)?,
        })
    }

    fn get(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Helvetica => &self.helvetica,
            FontFace::HelveticaBold => &self.helvetica_bold,
            FontFace::TimesRoman => &self.times_roman,
            FontFace::TimesBold => &self.times_bold,
        }
    }
}

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

/// Build the PDF bytes for a laid-out contract.
///
/// # Errors
/// `GeneratorError::Render` if the PDF library rejects a font or fails to
/// serialize the document.
pub fn render_pdf(document: &RenderedDocument, title: &str) -> Result<Vec<u8>> {
    let pages = paginate(document, &PageGeometry::default());

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let fonts = Fonts::register(&doc)?;

    for (i, page) in pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            doc.get_page(page_index).get_layer(layer_index)
        };
        draw_page(&layer, page, &fonts);
    }

    tracing::debug!(pages = pages.len(), "Rendered PDF");
    doc.save_to_bytes()
        .map_err(|e| GeneratorError::Render(e.to_string()))
}

fn draw_page(layer: &PdfLayerReference, page: &Page, fonts: &Fonts) {
    for line in &page.lines {
        let font = fonts.get(line.font);
        layer.begin_text_section();
        layer.set_font(font, line.size);
        layer.set_word_spacing(line.word_spacing);
        layer.set_text_cursor(mm(line.x), mm(line.y));
        layer.write_text(line.text.as_str(), font);
        layer.end_text_section();
    }

    for rule in &page.rules {
        layer.set_outline_thickness(rule.thickness);
        layer.add_line(Line {
            points: vec![
                (Point::new(mm(rule.x1), mm(rule.y)), false),
                (Point::new(mm(rule.x2), mm(rule.y)), false),
            ],
            is_closed: false,
        });
    }
}

/// Write bytes to `path` atomically.
///
/// The content goes to a hidden sibling file, is synced, then renamed into
/// place. The temporary file is removed if any step fails, so a failed write
/// never leaves a partial output behind.
///
/// # Errors
/// Any IO error while creating directories, writing or renaming.
pub fn write_atomic(bytes: &[u8], path: &Path) -> Result<PathBuf> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "contrato.pdf".to_string());
    let temp_file = dir.join(format!(".{file_name}.tmp"));

    let result = write_and_rename(bytes, &temp_file, path);
    if result.is_err() && temp_file.exists() {
        let _ = fs::remove_file(&temp_file);
    }
    result?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote PDF");
    Ok(path.to_path_buf())
}

fn write_and_rename(bytes: &[u8], temp_file: &Path, output_file: &Path) -> Result<()> {
    {
        let mut file = File::create(temp_file)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if output_file.exists() {
        fs::remove_file(output_file)?;
    }

    fs::rename(temp_file, output_file)?;
    Ok(())
}

/// Render a document and write it to `path`.
///
/// # Errors
/// Rendering or IO errors; the output path is untouched on failure.
pub fn save_pdf(document: &RenderedDocument, title: &str, path: &Path) -> Result<PathBuf> {
    let bytes = render_pdf(document, title)?;
    write_atomic(&bytes, path)
}
