//! Time calculation utilities for digit animations
//!
//! All functions take the current instant explicitly so frames can be
//! driven (and tested) without reading the clock.

use std::time::{Duration, Instant};

/// Animation progress (0.0 to 1.0) at `now`.
///
/// Holds at 0.0 until `delay` has elapsed. A zero `duration` jumps straight
/// to 1.0 once the delay is over.
#[inline]
pub fn progress(start: Instant, delay: Duration, duration: Duration, now: Instant) -> f64 {
    let elapsed = now.saturating_duration_since(start);
    if elapsed < delay {
        return 0.0;
    }
    if duration.is_zero() {
        return 1.0;
    }
    let running = elapsed - delay;
    (running.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Check if a delayed animation has finished at `now`
#[inline]
pub fn is_complete(start: Instant, delay: Duration, duration: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= delay + duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(-10.0, 0.0, 0.0) + 10.0).abs() < 1e-9);
        assert!((lerp(-10.0, 0.0, 0.5) + 5.0).abs() < 1e-9);
        assert!(lerp(-10.0, 0.0, 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_holds_during_delay() {
        let start = Instant::now();
        let delay = Duration::from_millis(100);
        let duration = Duration::from_millis(200);
        assert_eq!(progress(start, delay, duration, start), 0.0);
        assert_eq!(progress(start, delay, duration, start + Duration::from_millis(99)), 0.0);
        let half = progress(start, delay, duration, start + Duration::from_millis(200));
        assert!((half - 0.5).abs() < 1e-9);
        assert_eq!(progress(start, delay, duration, start + Duration::from_secs(5)), 1.0);
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert_eq!(progress(start, Duration::ZERO, Duration::ZERO, start), 1.0);
        let delay = Duration::from_millis(50);
        assert_eq!(progress(start, delay, Duration::ZERO, start), 0.0);
        assert!(is_complete(start, delay, Duration::ZERO, start + delay));
    }

    #[test]
    fn test_is_complete() {
        let start = Instant::now();
        let d = Duration::from_millis(10);
        assert!(!is_complete(start, d, d, start + Duration::from_millis(19)));
        assert!(is_complete(start, d, d, start + Duration::from_millis(20)));
    }
}
