//! Value diff engine
//!
//! Splits a value transition into per-position slots. Deltas are taken
//! between whole shifted quotients, not between individual digit
//! characters, so a carry shows up as a one-step roll at every position it
//! touches (9 → 10 rolls the ones by +1, not by -9).

use serde::Serialize;

use crate::glyph::Digit;

/// Value shown by a counter
pub type CounterValue = u64;

/// One decimal cell of a rendered counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DigitSlot {
    /// 0 = ones, 1 = tens, ... Stable identity across renders.
    pub position_from_right: usize,
    /// Digit the slot settles on
    #[serde(serialize_with = "serialize_digit")]
    pub final_digit: Digit,
    /// Shifted current quotient minus shifted previous quotient. Any pair of
    /// `u64` values fits without clamping.
    pub delta: i128,
    /// No digit existed at this position in the previous value
    pub is_newly_appeared: bool,
    /// Rendered statically, never animated
    pub is_exempt_from_animation: bool,
}

fn serialize_digit<S: serde::Serializer>(digit: &Digit, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u8(digit.value())
}

/// Number of decimal digits in `value` (0 has one digit)
pub fn digit_count(value: CounterValue) -> usize {
    let mut n = 1;
    let mut v = value / 10;
    while v > 0 {
        n += 1;
        v /= 10;
    }
    n
}

/// Leading positions present in `current` but not in `previous`
pub fn number_of_new_digits(previous: CounterValue, current: CounterValue) -> usize {
    digit_count(current).saturating_sub(digit_count(previous))
}

/// `floor(current / 10^position) - floor(previous / 10^position)`
pub fn positional_delta(previous: CounterValue, current: CounterValue, position: usize) -> i128 {
    let mut prev = previous;
    let mut curr = current;
    for _ in 0..position {
        prev /= 10;
        curr /= 10;
    }
    quotient_delta(prev, curr)
}

#[inline]
fn quotient_delta(previous: u64, current: u64) -> i128 {
    current as i128 - previous as i128
}

/// Per-position deltas for every digit of `current`, most-significant first.
///
/// `previous == None` is the first mount: the counter compares against
/// itself, so every delta is zero and nothing is newly appeared.
pub fn diff_values(previous: Option<CounterValue>, current: CounterValue) -> Vec<DigitSlot> {
    let previous = previous.unwrap_or(current);
    let digits = current.to_string();
    let len = digits.len();
    let new_digits = number_of_new_digits(previous, current);

    let mut deltas = Vec::with_capacity(len);
    let mut prev = previous;
    let mut curr = current;
    for _ in 0..len {
        deltas.push(quotient_delta(prev, curr));
        prev /= 10;
        curr /= 10;
    }

    digits
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let position_from_right = len - 1 - i;
            DigitSlot {
                position_from_right,
                final_digit: Digit::from_char(c).unwrap_or_else(|| unreachable!("non-digit {c:?}")),
                delta: deltas[position_from_right],
                is_newly_appeared: i < new_digits,
                is_exempt_from_animation: false,
            }
        })
        .collect()
}

/// Parse user-entered text as a counter value
pub fn parse_counter_value(text: &str) -> crate::Result<CounterValue> {
    text.trim()
        .parse::<CounterValue>()
        .map_err(|e| crate::Error::InvalidValue(format!("{text:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deltas(slots: &[DigitSlot]) -> Vec<i128> {
        slots.iter().map(|s| s.delta).collect()
    }

    #[test]
    fn test_carry_uses_whole_quotients() {
        let slots = diff_values(Some(9), 10);
        assert_eq!(slots.len(), 2);
        // most-significant first: tens, ones
        assert_eq!(deltas(&slots), vec![1, 1]);
        assert!(slots[0].is_newly_appeared);
        assert!(!slots[1].is_newly_appeared);
        assert_eq!(slots[0].position_from_right, 1);
        assert_eq!(slots[1].position_from_right, 0);
    }

    #[test]
    fn test_single_step() {
        let slots = diff_values(Some(100), 101);
        assert_eq!(deltas(&slots), vec![0, 0, 1]);
        assert!(slots.iter().all(|s| !s.is_newly_appeared));
        assert_eq!(slots[2].final_digit, Digit::from_u8(1));
    }

    #[test]
    fn test_large_jump_accumulates_per_position() {
        // 100 -> 250: ones 250-100, tens 25-10, hundreds 2-1
        let slots = diff_values(Some(100), 250);
        assert_eq!(deltas(&slots), vec![1, 15, 150]);
    }

    #[test]
    fn test_shrinking_value() {
        let slots = diff_values(Some(1000), 999);
        assert_eq!(slots.len(), 3);
        assert_eq!(deltas(&slots), vec![-1, -1, -1]);
        assert!(slots.iter().all(|s| !s.is_newly_appeared));
    }

    #[test]
    fn test_first_mount_has_no_motion() {
        let slots = diff_values(None, 100);
        assert_eq!(slots.len(), 3);
        assert!(slots.iter().all(|s| s.delta == 0 && !s.is_newly_appeared));
    }

    #[test]
    fn test_slot_count_matches_digit_count() {
        for (value, count) in [(0, 1), (7, 1), (10, 2), (100, 3), (u64::MAX, 20)] {
            assert_eq!(diff_values(Some(0), value).len(), count);
            assert_eq!(digit_count(value), count);
        }
    }

    #[test]
    fn test_positional_delta_matches_formula() {
        let pairs = [(0u64, 0u64), (9, 10), (123, 4567), (4567, 123), (99_999, 100_000)];
        for (p, c) in pairs {
            let slots = diff_values(Some(p), c);
            for slot in &slots {
                let pow = 10u64.pow(slot.position_from_right as u32);
                let expected = (c / pow) as i128 - (p / pow) as i128;
                assert_eq!(slot.delta, expected, "{p} -> {c} at {}", slot.position_from_right);
                assert_eq!(
                    positional_delta(p, c, slot.position_from_right),
                    expected
                );
            }
        }
    }

    #[test]
    fn test_number_of_new_digits_clamps_at_zero() {
        assert_eq!(number_of_new_digits(9, 10), 1);
        assert_eq!(number_of_new_digits(5, 12_345), 4);
        assert_eq!(number_of_new_digits(1000, 9), 0);
    }

    #[test]
    fn test_extreme_values_keep_exact_deltas() {
        let slots = diff_values(Some(0), u64::MAX);
        assert_eq!(slots.last().map(|s| s.delta), Some(u64::MAX as i128));
        assert_eq!(slots[0].delta, 1);
        let slots = diff_values(Some(u64::MAX), 0);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].delta, -(u64::MAX as i128));
        assert_eq!(positional_delta(u64::MAX, 0, 1), -((u64::MAX / 10) as i128));
    }

    #[test]
    fn test_parse_counter_value() {
        assert_eq!(parse_counter_value(" 42 ").unwrap(), 42);
        assert!(parse_counter_value("-1").is_err());
        assert!(parse_counter_value("abc").is_err());
    }
}
