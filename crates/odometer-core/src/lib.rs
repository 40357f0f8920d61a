pub mod animation;
pub mod config;
pub mod counter;
pub mod diff;
pub mod error;
pub mod glyph;
pub mod host;
pub mod roll;

pub use animation::{AnimationTiming, CubicBezier, DigitAnimator, EasingType, OffsetAnimation, SlotKey};
pub use config::{AppConfig, CounterConfig, DigitFontKind};
pub use counter::{Counter, CounterOptions, SlotContent, SlotFrame, DEFAULT_ANIMATION_DURATION_MS};
pub use diff::{diff_values, parse_counter_value, CounterValue, DigitSlot};
pub use error::{Error, Result};
pub use glyph::{next_glyph, Digit, RollDirection};
pub use host::{uniform_slot_size, GlyphCanvas, GlyphSize, SlotRect, TextMeasurer};
pub use roll::RollStack;
