//! Roll renderer
//!
//! A rolling slot is a vertical stack of glyphs: the final glyph first, then
//! the glyphs it rolled through, each one slot height further away. For a
//! positive delta the stack grows downward, for a negative delta upward. The
//! whole stack is translated by the animated offset and clipped to the slot,
//! so as the offset eases to 0 the previous glyph scrolls out and the final
//! glyph scrolls in.
//!
//! Row arithmetic is done in `i128`: a `u64` jump stacks up to 2^64 glyphs,
//! each up to `u16::MAX` rows tall.

use crate::diff::DigitSlot;
use crate::glyph::{nth_glyph, Digit, RollDirection};
use crate::host::{GlyphCanvas, SlotRect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollStack {
    pub final_digit: Digit,
    pub delta: i128,
    /// No predecessor glyph exists, so the stack stops one glyph short
    pub is_newly_appeared: bool,
}

impl RollStack {
    pub fn new(final_digit: Digit, delta: i128, is_newly_appeared: bool) -> Self {
        Self {
            final_digit,
            delta,
            is_newly_appeared,
        }
    }

    pub fn from_slot(slot: &DigitSlot) -> Self {
        Self::new(slot.final_digit, slot.delta, slot.is_newly_appeared)
    }

    #[inline]
    pub fn direction(&self) -> RollDirection {
        RollDirection::for_delta(self.delta)
    }

    /// `|delta| + 1`, or `|delta|` for a newly appeared slot
    pub fn draw_count(&self) -> u128 {
        let extra = if self.is_newly_appeared { 0 } else { 1 };
        self.delta.unsigned_abs().saturating_add(extra)
    }

    /// Glyph `index` places away from the final glyph
    #[inline]
    pub fn glyph_at(&self, index: u128) -> Digit {
        nth_glyph(self.final_digit, self.direction(), index)
    }

    /// Every glyph of the stack, final glyph first
    pub fn glyphs(&self) -> impl Iterator<Item = Digit> + '_ {
        (0..self.draw_count()).map(|k| self.glyph_at(k))
    }

    /// Glyphs that intersect a slot of height `slot_height` when the stack is
    /// translated by `offset`, with their top row relative to the slot.
    ///
    /// Only ever two glyphs can be visible at once, so this never walks the
    /// full stack; a jump of millions draws the same cells as drawing every
    /// glyph and clipping.
    pub fn visible_glyphs(&self, offset: i128, slot_height: u16) -> Vec<(Digit, i32)> {
        let count = self.draw_count();
        if slot_height == 0 || count == 0 {
            return Vec::new();
        }
        let h = slot_height as i128;
        // Anything further out than the whole stack shows nothing either way
        let limit = (count as i128).saturating_add(1).saturating_mul(h);
        let o = offset.clamp(-limit, limit);
        // A zero delta stacks nothing past the final glyph, so either sign works
        let sign = if self.delta < 0 { -1 } else { 1 };

        // Rows are j*h + o with index k = j * sign; j0*h + o lies in (-h, 0]
        let j0 = (-o).div_euclid(h);
        let mut visible = Vec::with_capacity(2);
        for j in [j0, j0 + 1] {
            let k = j * sign;
            if k < 0 || k as u128 >= count {
                continue;
            }
            let y = j * h + o;
            if y > -h && y < h {
                visible.push((self.glyph_at(k as u128), y as i32));
            }
        }
        visible.sort_by_key(|&(_, y)| y);
        visible
    }
}

/// Draw a rolling slot through `canvas`, clipped to `rect`
pub fn render_roll<C: GlyphCanvas>(
    canvas: &mut C,
    style: &C::Style,
    rect: SlotRect,
    stack: &RollStack,
    offset: i128,
) {
    for (glyph, y) in stack.visible_glyphs(offset, rect.height) {
        canvas.draw_glyph(glyph, style, rect.x as i32, rect.y as i32 + y, rect);
    }
}

/// Draw a static slot: the glyph alone, size-matched to rolling slots
pub fn render_static<C: GlyphCanvas>(canvas: &mut C, style: &C::Style, rect: SlotRect, glyph: Digit) {
    canvas.draw_glyph(glyph, style, rect.x as i32, rect.y as i32, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: u8) -> Digit {
        Digit::from_u8(v)
    }

    fn glyphs(stack: &RollStack) -> Vec<u8> {
        stack.glyphs().map(Digit::value).collect()
    }

    /// Records draw calls
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(u8, i32, i32)>,
    }

    impl GlyphCanvas for Recorder {
        type Style = ();

        fn draw_glyph(&mut self, glyph: Digit, _: &(), x: i32, y: i32, _clip: SlotRect) {
            self.calls.push((glyph.value(), x, y));
        }
    }

    #[test]
    fn test_zero_delta_draws_only_final_glyph() {
        let stack = RollStack::new(d(4), 0, false);
        assert_eq!(stack.draw_count(), 1);
        assert_eq!(glyphs(&stack), vec![4]);
    }

    #[test]
    fn test_positive_delta_stacks_preceding_digits() {
        let stack = RollStack::new(d(1), 3, false);
        assert_eq!(stack.draw_count(), 4);
        assert_eq!(glyphs(&stack), vec![1, 0, 9, 8]);
    }

    #[test]
    fn test_negative_delta_stacks_following_digits() {
        let stack = RollStack::new(d(8), -2, false);
        assert_eq!(glyphs(&stack), vec![8, 9, 0]);
    }

    #[test]
    fn test_newly_appeared_omits_phantom_predecessor() {
        let stack = RollStack::new(d(1), 1, true);
        assert_eq!(stack.draw_count(), 1);
        assert_eq!(glyphs(&stack), vec![1]);
    }

    #[test]
    fn test_carry_into_ones_rolls_nine_to_zero() {
        let stack = RollStack::new(d(0), 1, false);
        assert_eq!(glyphs(&stack), vec![0, 9]);
    }

    #[test]
    fn test_positive_roll_starts_on_previous_glyph() {
        let stack = RollStack::new(d(1), 1, false);
        // initial offset -h: glyph 1 of the stack (the old 0) fills the slot
        assert_eq!(stack.visible_glyphs(-5, 5), vec![(d(0), 0)]);
        // midway: final glyph enters from above, old glyph leaves below
        assert_eq!(stack.visible_glyphs(-2, 5), vec![(d(1), -2), (d(0), 3)]);
        assert_eq!(stack.visible_glyphs(0, 5), vec![(d(1), 0)]);
    }

    #[test]
    fn test_negative_roll_enters_from_below() {
        let stack = RollStack::new(d(8), -1, false);
        assert_eq!(stack.visible_glyphs(3, 3), vec![(d(9), 0)]);
        assert_eq!(stack.visible_glyphs(1, 3), vec![(d(9), -2), (d(8), 1)]);
        assert_eq!(stack.visible_glyphs(0, 3), vec![(d(8), 0)]);
    }

    #[test]
    fn test_newly_appeared_slot_starts_empty() {
        let stack = RollStack::new(d(1), 1, true);
        assert!(stack.visible_glyphs(-4, 4).is_empty());
        assert_eq!(stack.visible_glyphs(-1, 4), vec![(d(1), -1)]);
    }

    #[test]
    fn test_visible_glyphs_match_full_stack_clip() {
        let stack = RollStack::new(d(3), 7, false);
        let h = 4i128;
        for o in -(7 * h)..=0 {
            let expected: Vec<(Digit, i32)> = stack
                .glyphs()
                .enumerate()
                .map(|(k, g)| (g, (k as i128 * h + o) as i32))
                .filter(|&(_, y)| y > -(h as i32) && y < h as i32)
                .collect();
            assert_eq!(stack.visible_glyphs(o, h as u16), expected, "offset {o}");
        }
    }

    #[test]
    fn test_huge_delta_is_cheap() {
        let stack = RollStack::new(d(0), 1_000_000_000_000, false);
        let visible = stack.visible_glyphs(-1_000_000_000_000 * 2, 2);
        assert_eq!(visible, vec![(d(0), 0)]);
    }

    #[test]
    fn test_full_u64_roll_starts_on_previous_glyph() {
        // ones slot of 0 -> u64::MAX: final 5, previous 0
        let delta = u64::MAX as i128;
        let stack = RollStack::new(d(5), delta, false);
        assert_eq!(stack.draw_count(), u64::MAX as u128 + 1);
        assert_eq!(stack.glyph_at(u64::MAX as u128), d(0));
        for h in [1u16, 5, u16::MAX] {
            let start = -delta * h as i128;
            assert_eq!(stack.visible_glyphs(start, h), vec![(d(0), 0)], "height {h}");
            assert_eq!(stack.visible_glyphs(0, h), vec![(d(5), 0)], "height {h}");
        }
    }

    #[test]
    fn test_full_u64_drop_starts_on_previous_glyph() {
        // u64::MAX -> 0: final 0, previous ones digit 5, stack grows upward
        let delta = -(u64::MAX as i128);
        let stack = RollStack::new(d(0), delta, false);
        assert_eq!(stack.visible_glyphs(u64::MAX as i128 * 5, 5), vec![(d(5), 0)]);
        assert_eq!(stack.visible_glyphs(3, 5), vec![(d(1), -2), (d(0), 3)]);
    }

    #[test]
    fn test_offset_beyond_stack_draws_nothing() {
        let stack = RollStack::new(d(1), 1, false);
        assert!(stack.visible_glyphs(i128::MIN, 5).is_empty());
        assert!(stack.visible_glyphs(i128::MAX, 5).is_empty());
    }

    #[test]
    fn test_render_roll_offsets_by_slot_origin() {
        let mut canvas = Recorder::default();
        let stack = RollStack::new(d(1), 1, false);
        render_roll(&mut canvas, &(), SlotRect::new(10, 2, 3, 5), &stack, -2);
        assert_eq!(canvas.calls, vec![(1, 10, 0), (0, 10, 5)]);
    }

    #[test]
    fn test_render_static_draws_once() {
        let mut canvas = Recorder::default();
        render_static(&mut canvas, &(), SlotRect::new(1, 1, 1, 1), d(7));
        assert_eq!(canvas.calls, vec![(7, 1, 1)]);
    }
}
