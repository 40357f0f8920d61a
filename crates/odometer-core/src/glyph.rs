//! Digit glyph cycle
//!
//! Enumerates the glyphs a digit slot rolls through. Directions are named
//! after the counter's movement, not the glyph's: while a counter is
//! increasing, the glyphs stacked behind the final one count *down*.

use std::fmt;

/// A single decimal digit, always in `0..=9`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digit(u8);

impl Digit {
    pub const ZERO: Digit = Digit(0);
    pub const NINE: Digit = Digit(9);

    /// All ten digits in ascending order
    pub const ALL: [Digit; 10] = [
        Digit(0),
        Digit(1),
        Digit(2),
        Digit(3),
        Digit(4),
        Digit(5),
        Digit(6),
        Digit(7),
        Digit(8),
        Digit(9),
    ];

    /// Checked construction
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    /// Construction from a digit already known to be in range.
    ///
    /// # Panics
    /// Panics if `value > 9`. Well-formed decimal decomposition never
    /// produces such a value.
    pub fn from_u8(value: u8) -> Self {
        assert!(value <= 9, "digit out of range: {value}");
        Self(value)
    }

    /// Parse an ASCII decimal character
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn to_char(self) -> char {
        (b'0' + self.0) as char
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of a roll, from the counter's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollDirection {
    /// Counter went up: stacked glyphs run 9→8→…→0→9
    Increasing,
    /// Counter went down (or stayed): stacked glyphs run 0→1→…→9→0
    Decreasing,
}

impl RollDirection {
    /// Direction used for a signed positional delta
    pub fn for_delta(delta: i128) -> Self {
        if delta > 0 {
            RollDirection::Increasing
        } else {
            RollDirection::Decreasing
        }
    }
}

/// Next glyph in the stack behind `digit`
#[inline]
pub fn next_glyph(digit: Digit, direction: RollDirection) -> Digit {
    match direction {
        RollDirection::Increasing => Digit((digit.0 + 9) % 10),
        RollDirection::Decreasing => Digit((digit.0 + 1) % 10),
    }
}

/// Glyph reached after `steps` applications of [`next_glyph`]
pub fn nth_glyph(digit: Digit, direction: RollDirection, steps: u128) -> Digit {
    let steps = (steps % 10) as u8;
    match direction {
        RollDirection::Increasing => Digit((digit.0 + 10 - steps) % 10),
        RollDirection::Decreasing => Digit((digit.0 + steps) % 10),
    }
}
