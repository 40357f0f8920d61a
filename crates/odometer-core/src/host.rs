//! Collaborators the counter draws through
//!
//! The engine never touches a terminal or a font directly. A host supplies
//! text measurement and glyph drawing; positions and sizes are in the host's
//! cell units.

use crate::glyph::Digit;

/// Bounding box of one rendered glyph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphSize {
    pub width: u16,
    pub height: u16,
}

impl GlyphSize {
    pub const ZERO: GlyphSize = GlyphSize { width: 0, height: 0 };

    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Screen rectangle of one digit slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl SlotRect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn contains_row(&self, row: i32) -> bool {
        row >= self.y as i32 && row < self.y as i32 + self.height as i32
    }

    #[inline]
    pub fn contains_column(&self, column: i32) -> bool {
        column >= self.x as i32 && column < self.x as i32 + self.width as i32
    }
}

/// Measures digit glyphs in a given style
pub trait TextMeasurer {
    type Style;

    fn measure(&self, glyph: Digit, style: &Self::Style) -> GlyphSize;
}

/// Draws digit glyphs
pub trait GlyphCanvas {
    type Style;

    /// Draw `glyph` with its top-left corner at (`x`, `y`).
    ///
    /// The origin may lie outside `clip`; only cells inside `clip` are
    /// written.
    fn draw_glyph(&mut self, glyph: Digit, style: &Self::Style, x: i32, y: i32, clip: SlotRect);
}

/// Uniform slot size for a style: the widest of the ten digit glyphs.
///
/// Fonts need not be monospace; sizing every slot alike keeps the counter
/// from jittering as digits change. Ties keep the earlier glyph's box.
pub fn uniform_slot_size<M: TextMeasurer>(measurer: &M, style: &M::Style) -> GlyphSize {
    Digit::ALL
        .iter()
        .map(|&d| measurer.measure(d, style))
        .fold(GlyphSize::ZERO, |max, size| {
            if size.width > max.width {
                size
            } else {
                max
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Proportional;

    impl TextMeasurer for Proportional {
        type Style = u16;

        fn measure(&self, glyph: Digit, height: &u16) -> GlyphSize {
            // '1' is narrow, '8' is widest
            let width = match glyph.value() {
                1 => 1,
                8 => 4,
                _ => 3,
            };
            GlyphSize::new(width, *height)
        }
    }

    #[test]
    fn test_uniform_slot_size_uses_widest_glyph() {
        assert_eq!(uniform_slot_size(&Proportional, &2), GlyphSize::new(4, 2));
    }

    #[test]
    fn test_slot_rect_bounds() {
        let rect = SlotRect::new(2, 3, 4, 5);
        assert!(rect.contains_row(3));
        assert!(rect.contains_row(7));
        assert!(!rect.contains_row(8));
        assert!(!rect.contains_column(1));
        assert!(rect.contains_column(5));
        assert!(!rect.contains_column(6));
    }
}
