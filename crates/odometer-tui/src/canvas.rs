use odometer_core::glyph::Digit;
use odometer_core::{GlyphCanvas, SlotRect};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::font::{glyph_rows, DigitStyle};

/// Draws digit glyphs into a ratatui buffer.
///
/// Cells are written only where they fall inside both the slot's clip box
/// and `bounds`, so a rolling stack never bleeds into neighbouring slots or
/// outside the widget.
pub struct BufferCanvas<'a> {
    buf: &'a mut Buffer,
    bounds: Rect,
}

impl<'a> BufferCanvas<'a> {
    pub fn new(buf: &'a mut Buffer, bounds: Rect) -> Self {
        let bounds = bounds.intersection(buf.area);
        Self { buf, bounds }
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= self.bounds.left() as i32
            && x < self.bounds.right() as i32
            && y >= self.bounds.top() as i32
            && y < self.bounds.bottom() as i32
    }
}

impl GlyphCanvas for BufferCanvas<'_> {
    type Style = DigitStyle;

    fn draw_glyph(&mut self, glyph: Digit, style: &DigitStyle, x: i32, y: i32, clip: SlotRect) {
        for (row, line) in glyph_rows(style.font, glyph).iter().enumerate() {
            let cy = y + row as i32;
            if !clip.contains_row(cy) {
                continue;
            }
            for (col, ch) in line.chars().enumerate() {
                let cx = x + col as i32;
                if ch == ' ' || !clip.contains_column(cx) || !self.in_bounds(cx, cy) {
                    continue;
                }
                if let Some(cell) = self.buf.cell_mut((cx as u16, cy as u16)) {
                    cell.set_char(ch).set_style(style.style);
                }
            }
        }
    }
}
