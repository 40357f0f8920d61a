//! Per-digit animation driver
//!
//! ## Atomic layer
//! - `easing` - Easing curves mapping progress [0, 1] to [0, 1]
//! - `timing` - Delay/duration progress and interpolation helpers
//!
//! ## Molecular layer
//! - `driver` - Animated scalar offsets and the per-slot animator keyed by
//!   transition identity

pub mod easing;
pub mod timing;

pub mod driver;

pub use driver::{AnimationTiming, DigitAnimator, OffsetAnimation, SlotKey};
pub use easing::{CubicBezier, EasingType};
