//! Counter orchestrator
//!
//! Owns the committed value, the current slot sequence and one animator per
//! animated slot. Animators are keyed by position from the right, so the
//! ones slot stays the ones slot when the value grows a digit.
//!
//! # Usage
//!
//! ```
//! use std::time::Instant;
//! use odometer_core::{Counter, CounterOptions, GlyphSize};
//!
//! let mut counter = Counter::new(100, CounterOptions::default(), GlyphSize::new(3, 5));
//! counter.set_value(101, Instant::now());
//! assert!(counter.is_animating(Instant::now()));
//! ```

use std::collections::HashMap;
use std::time::Instant;

use tracing::debug;

use crate::animation::{AnimationTiming, DigitAnimator, EasingType, SlotKey};
use crate::diff::{diff_values, CounterValue, DigitSlot};
use crate::glyph::Digit;
use crate::host::{GlyphCanvas, GlyphSize, SlotRect};
use crate::roll::{render_roll, render_static, RollStack};

/// Standard roll duration when none is configured
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 300;

/// Per-counter animation and layout options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterOptions {
    /// Time the previous glyph stays put before rolling
    pub animation_delay_ms: u64,
    pub animation_duration_ms: u64,
    pub easing: EasingType,
    /// Gap between slots, in cells
    pub digit_spacing: u16,
    /// Trailing positions that always render statically
    pub number_of_end_digits_that_never_animate: usize,
}

impl Default for CounterOptions {
    fn default() -> Self {
        Self {
            animation_delay_ms: 0,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            easing: EasingType::default(),
            digit_spacing: 0,
            number_of_end_digits_that_never_animate: 0,
        }
    }
}

impl CounterOptions {
    pub fn timing(&self) -> AnimationTiming {
        AnimationTiming::from_millis(
            self.animation_delay_ms,
            self.animation_duration_ms,
            self.easing,
        )
    }

    #[inline]
    fn is_exempt(&self, position_from_right: usize) -> bool {
        position_from_right < self.number_of_end_digits_that_never_animate
    }
}

/// What a slot shows in one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotContent {
    /// Plain glyph, no animation state
    Static(Digit),
    /// Stack translated by `offset` rows
    Rolling { stack: RollStack, offset: i128 },
}

/// One slot of a rendered frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotFrame {
    /// Column of the slot relative to the counter's left edge
    pub x: u16,
    pub slot: DigitSlot,
    pub content: SlotContent,
}

/// Animated odometer counter
#[derive(Debug, Clone)]
pub struct Counter {
    options: CounterOptions,
    slot_size: GlyphSize,
    /// Value the next change is diffed against
    baseline: CounterValue,
    slots: Vec<DigitSlot>,
    animators: HashMap<usize, DigitAnimator>,
}

impl Counter {
    /// Mount a counter showing `value`. The initial value does not roll.
    pub fn new(value: CounterValue, options: CounterOptions, slot_size: GlyphSize) -> Self {
        let mut counter = Self {
            options,
            slot_size,
            baseline: value,
            slots: diff_values(None, value),
            animators: HashMap::new(),
        };
        counter.apply_exemptions();
        for slot in counter.slots.iter().filter(|s| !s.is_exempt_from_animation) {
            counter.animators.insert(
                slot.position_from_right,
                DigitAnimator::settled(Self::key_for(slot, value)),
            );
        }
        counter
    }

    /// Remount at `value`: every slot jumps to rest without rolling
    pub fn reset(&mut self, value: CounterValue) {
        *self = Self::new(value, self.options, self.slot_size);
    }

    fn key_for(slot: &DigitSlot, value: CounterValue) -> SlotKey {
        SlotKey {
            final_digit: slot.final_digit,
            delta: slot.delta,
            reset_token: value,
        }
    }

    fn apply_exemptions(&mut self) {
        let options = self.options;
        for slot in &mut self.slots {
            slot.is_exempt_from_animation = options.is_exempt(slot.position_from_right);
        }
    }

    #[inline]
    pub fn value(&self) -> CounterValue {
        self.baseline
    }

    pub fn slots(&self) -> &[DigitSlot] {
        &self.slots
    }

    pub fn options(&self) -> &CounterOptions {
        &self.options
    }

    #[inline]
    pub fn slot_size(&self) -> GlyphSize {
        self.slot_size
    }

    /// Number of slots currently owning animation state
    pub fn animator_count(&self) -> usize {
        self.animators.len()
    }

    /// Whether the slot at `position_from_right` owns animation state
    pub fn has_animator(&self, position_from_right: usize) -> bool {
        self.animators.contains_key(&position_from_right)
    }

    /// Show `value`, rolling each animated slot from the committed value.
    ///
    /// The whole slot sequence is computed before any animator restarts, and
    /// the new value becomes the baseline only afterwards. Returns `false`
    /// when the value is unchanged.
    pub fn set_value(&mut self, value: CounterValue, now: Instant) -> bool {
        if value == self.baseline {
            return false;
        }

        let mut slots = diff_values(Some(self.baseline), value);
        for slot in &mut slots {
            slot.is_exempt_from_animation = self.options.is_exempt(slot.position_from_right);
        }

        let len = slots.len();
        let options = self.options;
        self.animators
            .retain(|&position, _| position < len && !options.is_exempt(position));

        let timing = options.timing();
        let mut restarted = 0usize;
        for slot in slots.iter().filter(|s| !s.is_exempt_from_animation) {
            let key = Self::key_for(slot, value);
            match self.animators.get_mut(&slot.position_from_right) {
                Some(animator) => {
                    if animator.retarget(key, timing, now) {
                        restarted += 1;
                    }
                }
                None => {
                    self.animators
                        .insert(slot.position_from_right, DigitAnimator::start(key, timing, now));
                    restarted += 1;
                }
            }
        }

        debug!(
            from = self.baseline,
            to = value,
            slots = len,
            restarted,
            "counter value changed"
        );

        self.slots = slots;
        self.baseline = value;
        true
    }

    /// Change how many trailing positions never animate.
    ///
    /// Newly exempt slots drop their animation state at once; slots that
    /// become animated again start at rest and roll from the next change.
    pub fn set_never_animate(&mut self, count: usize) {
        if count == self.options.number_of_end_digits_that_never_animate {
            return;
        }
        self.options.number_of_end_digits_that_never_animate = count;
        self.apply_exemptions();

        let options = self.options;
        self.animators.retain(|&position, _| !options.is_exempt(position));
        let value = self.baseline;
        for slot in self.slots.iter().filter(|s| !s.is_exempt_from_animation) {
            self.animators
                .entry(slot.position_from_right)
                .or_insert_with(|| DigitAnimator::settled(Self::key_for(slot, value)));
        }
        debug!(count, "never-animate digit count changed");
    }

    /// Resize slots, e.g. after a font change
    pub fn set_slot_size(&mut self, size: GlyphSize) {
        self.slot_size = size;
    }

    /// Total width: slot widths plus the gaps between them
    pub fn width(&self) -> u16 {
        let n = self.slots.len() as u16;
        let gaps = n.saturating_sub(1);
        n.saturating_mul(self.slot_size.width)
            .saturating_add(gaps.saturating_mul(self.options.digit_spacing))
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.slot_size.height
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.animators.values().any(|a| a.is_running(now))
    }

    /// Drop finished runs; returns whether anything is still animating
    pub fn tick(&mut self, now: Instant) -> bool {
        for animator in self.animators.values_mut() {
            animator.settle(now);
        }
        self.is_animating(now)
    }

    /// Layout and content of every slot at `now`, most-significant first
    pub fn frame(&self, now: Instant) -> Vec<SlotFrame> {
        let stride = self.slot_size.width.saturating_add(self.options.digit_spacing);
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let content = if slot.is_exempt_from_animation {
                    SlotContent::Static(slot.final_digit)
                } else {
                    let offset = self
                        .animators
                        .get(&slot.position_from_right)
                        .map(|a| a.offset_at(now, self.slot_size.height))
                        .unwrap_or(0);
                    SlotContent::Rolling {
                        stack: RollStack::from_slot(slot),
                        offset,
                    }
                };
                SlotFrame {
                    x: (i as u16).saturating_mul(stride),
                    slot: *slot,
                    content,
                }
            })
            .collect()
    }

    /// Draw the counter with its top-left corner at (`x`, `y`)
    pub fn render<C: GlyphCanvas>(&self, canvas: &mut C, style: &C::Style, x: u16, y: u16, now: Instant) {
        let size = self.slot_size;
        for frame in self.frame(now) {
            let rect = SlotRect::new(x.saturating_add(frame.x), y, size.width, size.height);
            match frame.content {
                SlotContent::Static(digit) => render_static(canvas, style, rect, digit),
                SlotContent::Rolling { stack, offset } => {
                    render_roll(canvas, style, rect, &stack, offset)
                }
            }
        }
    }
}
