//! Glyph widths for the PDF base-14 fonts used by the contract.
//!
//! Widths are in thousandths of an em, taken from the Adobe AFM files for the
//! printable ASCII range (space through tilde). Accented letters are measured
//! by their base letter.

use unicode_normalization::UnicodeNormalization;

use crate::layout::FontFace;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

/// Width of the bullet glyph in all four faces.
const BULLET_WIDTH: u16 = 350;

fn table(font: FontFace) -> &'static [u16; 95] {
    match font {
        FontFace::Helvetica => &HELVETICA,
        FontFace::HelveticaBold => &HELVETICA_BOLD,
        FontFace::TimesRoman => &TIMES_ROMAN,
        FontFace::TimesBold => &TIMES_BOLD,
    }
}

fn ascii_width(font: FontFace, ch: char) -> Option<u16> {
    let index = (ch as u32).checked_sub(32)? as usize;
    table(font).get(index).copied()
}

/// Advance width of one character in thousandths of an em.
///
/// Characters outside the table fall back to the width of `n`.
#[must_use]
pub fn char_width(font: FontFace, ch: char) -> u16 {
    if ch == '•' {
        return BULLET_WIDTH;
    }
    if let Some(width) = ascii_width(font, ch) {
        return width;
    }
    std::iter::once(ch)
        .nfd()
        .next()
        .and_then(|base| ascii_width(font, base))
        .or_else(|| ascii_width(font, 'n'))
        .unwrap_or(500)
}

/// Width of `text` set in `font` at `size` points, in points.
#[must_use]
pub fn text_width(font: FontFace, size: f32, text: &str) -> f32 {
    let units: u32 = text.chars().map(|ch| u32::from(char_width(font, ch))).sum();
    units as f32 * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        assert_eq!(char_width(FontFace::Helvetica, ' '), 278);
        assert_eq!(char_width(FontFace::Helvetica, 'A'), 667);
        assert_eq!(char_width(FontFace::Helvetica, '~'), 584);
        assert_eq!(char_width(FontFace::HelveticaBold, 'm'), 889);
        assert_eq!(char_width(FontFace::TimesRoman, 'W'), 944);
        assert_eq!(char_width(FontFace::TimesBold, '%'), 1000);
    }

    #[test]
    fn test_accented_letters_use_base_width() {
        assert_eq!(
            char_width(FontFace::TimesRoman, 'É'),
            char_width(FontFace::TimesRoman, 'E')
        );
        assert_eq!(
            char_width(FontFace::Helvetica, 'ñ'),
            char_width(FontFace::Helvetica, 'n')
        );
        assert_eq!(char_width(FontFace::TimesBold, '•'), 350);
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let at_10 = text_width(FontFace::Helvetica, 10.0, "abc");
        let at_20 = text_width(FontFace::Helvetica, 20.0, "abc");
        assert!((at_10 - 16.12).abs() < 0.001);
        assert!((at_20 - 2.0 * at_10).abs() < 0.001);
        assert_eq!(text_width(FontFace::TimesRoman, 11.0, ""), 0.0);
    }
}
