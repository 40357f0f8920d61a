//! Animated offsets for digit slots
//!
//! `OffsetAnimation` is the animatable scalar behind every roll.
//! `DigitAnimator` binds one of them to the identity of a transition
//! (`SlotKey`): a different key means a fresh run, the same key means the
//! current run carries on.
//!
//! The scalar is the fraction of the roll still to go (1 → 0), not a row
//! count. A `u64` jump can displace a stack by more rows than an `f64`
//! holds exactly, so row offsets are derived in `i128` and the endpoints of a
//! run are always exact.

use std::time::{Duration, Instant};

use tracing::trace;

use super::easing::EasingType;
use super::timing::{is_complete, lerp, progress};
use crate::glyph::Digit;

/// Delay, duration and curve of a roll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTiming {
    pub delay: Duration,
    pub duration: Duration,
    pub easing: EasingType,
}

impl AnimationTiming {
    pub fn from_millis(delay_ms: u64, duration_ms: u64, easing: EasingType) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            duration: Duration::from_millis(duration_ms),
            easing,
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveRun {
    start: Instant,
    from: f64,
    to: f64,
    timing: AnimationTiming,
}

impl ActiveRun {
    fn value_at(&self, now: Instant) -> f64 {
        let t = progress(self.start, self.timing.delay, self.timing.duration, now);
        lerp(self.from, self.to, self.timing.easing.apply(t))
    }

    fn is_complete(&self, now: Instant) -> bool {
        is_complete(self.start, self.timing.delay, self.timing.duration, now)
    }
}

/// A scalar that interpolates toward a target over time
#[derive(Debug, Clone)]
pub struct OffsetAnimation {
    /// Settled value, or the value when the active run started
    value: f64,
    run: Option<ActiveRun>,
}

impl OffsetAnimation {
    /// A settled animation holding `initial`
    pub fn new(initial: f64) -> Self {
        Self {
            value: initial,
            run: None,
        }
    }

    /// Start animating from the current value to `target`.
    ///
    /// Replaces any run in progress, continuing from wherever it was at
    /// `now`.
    pub fn animate_to(&mut self, target: f64, timing: AnimationTiming, now: Instant) {
        let from = self.value_at(now);
        if from == target {
            self.value = target;
            self.run = None;
            return;
        }
        self.value = from;
        self.run = Some(ActiveRun {
            start: now,
            from,
            to: target,
            timing,
        });
    }

    /// Value at `now`
    pub fn value_at(&self, now: Instant) -> f64 {
        match &self.run {
            Some(run) if run.is_complete(now) => run.to,
            Some(run) => run.value_at(now),
            None => self.value,
        }
    }

    /// Final value once any active run completes
    pub fn target(&self) -> f64 {
        self.run.as_ref().map(|r| r.to).unwrap_or(self.value)
    }

    #[inline]
    pub fn is_running(&self, now: Instant) -> bool {
        self.run.as_ref().is_some_and(|r| !r.is_complete(now))
    }

    /// Drop a completed run, keeping its end value
    pub fn settle(&mut self, now: Instant) {
        if let Some(run) = &self.run {
            if run.is_complete(now) {
                self.value = run.to;
                self.run = None;
            }
        }
    }
}

/// Identity of one slot transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub final_digit: Digit,
    pub delta: i128,
    /// Changes whenever the counter's value changes, so a repeated
    /// (digit, delta) pair still gets a fresh run
    pub reset_token: u64,
}

/// Animated offset for one digit slot, keyed by its transition
#[derive(Debug, Clone)]
pub struct DigitAnimator {
    key: SlotKey,
    /// Fraction of the displacement still to cover
    remaining: OffsetAnimation,
}

impl DigitAnimator {
    /// Offset a run starts from: the stack is shifted so the previous glyph
    /// sits in the slot
    #[inline]
    pub fn initial_offset(delta: i128, slot_height: u16) -> i128 {
        -delta * slot_height as i128
    }

    /// Start a run from `-delta × slot_height` to 0
    pub fn start(key: SlotKey, timing: AnimationTiming, now: Instant) -> Self {
        let mut remaining = OffsetAnimation::new(1.0);
        remaining.animate_to(0.0, timing, now);
        Self { key, remaining }
    }

    /// An animator at rest (offset 0), used on first mount
    pub fn settled(key: SlotKey) -> Self {
        Self {
            key,
            remaining: OffsetAnimation::new(0.0),
        }
    }

    pub fn key(&self) -> SlotKey {
        self.key
    }

    /// Bind to `key`; restarts only if the key changed.
    ///
    /// Returns `true` when a fresh run was started.
    pub fn retarget(&mut self, key: SlotKey, timing: AnimationTiming, now: Instant) -> bool {
        if self.key == key {
            return false;
        }
        trace!(?key, previous = ?self.key, "restarting digit animation");
        *self = Self::start(key, timing, now);
        true
    }

    /// Row offset of the stack at `now` for slots `slot_height` rows tall
    pub fn offset_at(&self, now: Instant, slot_height: u16) -> i128 {
        let remaining = self.remaining.value_at(now);
        let full = Self::initial_offset(self.key.delta, slot_height);
        if remaining == 1.0 {
            full
        } else if remaining == 0.0 {
            0
        } else {
            (full as f64 * remaining).round() as i128
        }
    }

    #[inline]
    pub fn is_running(&self, now: Instant) -> bool {
        self.remaining.is_running(now)
    }

    pub fn settle(&mut self, now: Instant) {
        self.remaining.settle(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing(delay_ms: u64, duration_ms: u64) -> AnimationTiming {
        AnimationTiming::from_millis(delay_ms, duration_ms, EasingType::Linear)
    }

    fn key(digit: u8, delta: i128, token: u64) -> SlotKey {
        SlotKey {
            final_digit: Digit::from_u8(digit),
            delta,
            reset_token: token,
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_offset_holds_during_delay_then_reaches_target() {
        let now = Instant::now();
        let mut anim = OffsetAnimation::new(-10.0);
        anim.animate_to(0.0, timing(50, 100), now);

        assert_eq!(anim.value_at(now), -10.0);
        assert_eq!(anim.value_at(now + ms(49)), -10.0);
        assert!((anim.value_at(now + ms(100)) + 5.0).abs() < 1e-9);
        assert_eq!(anim.value_at(now + ms(150)), 0.0);
        assert!(anim.is_running(now + ms(149)));
        assert!(!anim.is_running(now + ms(150)));
    }

    #[test]
    fn test_animate_to_same_value_does_not_run() {
        let now = Instant::now();
        let mut anim = OffsetAnimation::new(0.0);
        anim.animate_to(0.0, timing(0, 100), now);
        assert!(!anim.is_running(now));
        assert_eq!(anim.target(), 0.0);
    }

    #[test]
    fn test_superseding_run_continues_from_current_value() {
        let now = Instant::now();
        let mut anim = OffsetAnimation::new(-10.0);
        anim.animate_to(0.0, timing(0, 100), now);
        anim.animate_to(-20.0, timing(0, 100), now + ms(50));
        assert!((anim.value_at(now + ms(50)) + 5.0).abs() < 1e-9);
        assert_eq!(anim.target(), -20.0);
    }

    #[test]
    fn test_settle_keeps_end_value() {
        let now = Instant::now();
        let mut anim = OffsetAnimation::new(4.0);
        anim.animate_to(1.0, timing(0, 10), now);
        anim.settle(now + ms(5));
        assert!(anim.is_running(now + ms(5)));
        anim.settle(now + ms(10));
        assert!(!anim.is_running(now + ms(10)));
        assert_eq!(anim.value_at(now), 1.0);
    }

    #[test]
    fn test_digit_animator_starts_from_negative_delta_rows() {
        let now = Instant::now();
        let animator = DigitAnimator::start(key(1, 1, 101), timing(0, 100), now);
        assert_eq!(animator.offset_at(now, 5), -5);
        assert_eq!(animator.offset_at(now + ms(40), 5), -3);
        assert_eq!(animator.offset_at(now + ms(100), 5), 0);

        let animator = DigitAnimator::start(key(8, -2, 98), timing(0, 100), now);
        assert_eq!(animator.offset_at(now, 3), 6);
    }

    #[test]
    fn test_full_u64_displacement_is_exact() {
        let now = Instant::now();
        let delta = u64::MAX as i128;
        let animator = DigitAnimator::start(key(5, delta, u64::MAX), timing(20, 100), now);
        assert_eq!(animator.offset_at(now, 5), -delta * 5);
        assert_eq!(animator.offset_at(now + ms(19), 5), -delta * 5);
        assert!(animator.offset_at(now + ms(70), 5) < 0);
        assert_eq!(animator.offset_at(now + ms(120), 5), 0);
    }

    #[test]
    fn test_offset_follows_current_slot_height() {
        let now = Instant::now();
        let animator = DigitAnimator::start(key(1, 1, 101), timing(0, 100), now);
        assert_eq!(animator.offset_at(now, 1), -1);
        assert_eq!(animator.offset_at(now, 5), -5);
    }

    #[test]
    fn test_same_key_continues_existing_run() {
        let now = Instant::now();
        let mut animator = DigitAnimator::start(key(1, 1, 101), timing(0, 100), now);
        let restarted = animator.retarget(key(1, 1, 101), timing(0, 100), now + ms(50));
        assert!(!restarted);
        assert_eq!(animator.offset_at(now + ms(60), 10), -4);
    }

    #[test]
    fn test_changed_key_restarts() {
        let now = Instant::now();
        let mut animator = DigitAnimator::start(key(1, 1, 101), timing(0, 100), now);
        let later = now + ms(50);
        assert!(animator.retarget(key(2, 1, 102), timing(0, 100), later));
        assert_eq!(animator.offset_at(later, 5), -5);
        assert_eq!(animator.key().reset_token, 102);
    }

    #[test]
    fn test_settled_animator_is_at_rest() {
        let now = Instant::now();
        let animator = DigitAnimator::settled(key(3, 0, 3));
        assert_eq!(animator.offset_at(now, 5), 0);
        assert!(!animator.is_running(now));
    }
}
