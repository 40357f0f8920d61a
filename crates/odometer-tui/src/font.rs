//! Digit fonts for the terminal
//!
//! The plain font is one cell per digit, so a roll moves whole glyphs at a
//! time. The block font draws each digit five rows tall, which lets a roll
//! pass through visible intermediate positions.

use odometer_core::{DigitFontKind, GlyphSize, TextMeasurer};
use odometer_core::glyph::Digit;
use ratatui::style::Style;
use unicode_width::UnicodeWidthStr;

/// Blank columns to the right of every block glyph
const BLOCK_BEARING: u16 = 1;

static BLOCK_GLYPHS: [[&str; 5]; 10] = [
    ["███", "█ █", "█ █", "█ █", "███"],
    ["██ ", " █ ", " █ ", " █ ", "███"],
    ["███", "  █", "███", "█  ", "███"],
    ["███", "  █", "███", "  █", "███"],
    ["█ █", "█ █", "███", "  █", "  █"],
    ["███", "█  ", "███", "  █", "███"],
    ["███", "█  ", "███", "█ █", "███"],
    ["███", "  █", "  █", "  █", "  █"],
    ["███", "█ █", "███", "█ █", "███"],
    ["███", "█ █", "███", "  █", "███"],
];

static PLAIN_GLYPHS: [[&str; 1]; 10] = [
    ["0"], ["1"], ["2"], ["3"], ["4"], ["5"], ["6"], ["7"], ["8"], ["9"],
];

/// Text style handed to the counter: a font plus terminal colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitStyle {
    pub font: DigitFontKind,
    pub style: Style,
}

impl DigitStyle {
    pub fn new(font: DigitFontKind, style: Style) -> Self {
        Self { font, style }
    }
}

impl Default for DigitStyle {
    fn default() -> Self {
        Self::new(DigitFontKind::Block, Style::default())
    }
}

/// Rows of `digit` in `font`, top to bottom
pub fn glyph_rows(font: DigitFontKind, digit: Digit) -> &'static [&'static str] {
    let i = digit.value() as usize;
    match font {
        DigitFontKind::Plain => &PLAIN_GLYPHS[i][..],
        DigitFontKind::Block => &BLOCK_GLYPHS[i][..],
    }
}

/// Measures glyphs by their cell footprint
#[derive(Debug, Clone, Copy, Default)]
pub struct FontMeasurer;

impl TextMeasurer for FontMeasurer {
    type Style = DigitStyle;

    fn measure(&self, glyph: Digit, style: &DigitStyle) -> GlyphSize {
        let rows = glyph_rows(style.font, glyph);
        let width = rows.iter().map(|r| r.width()).max().unwrap_or(0) as u16;
        let bearing = match style.font {
            DigitFontKind::Plain => 0,
            DigitFontKind::Block => BLOCK_BEARING,
        };
        GlyphSize::new(width + bearing, rows.len() as u16)
    }
}
