use std::time::Instant;

use anyhow::Result;
use serde::Serialize;

use odometer_core::{AppConfig, Counter, DigitSlot, GlyphSize, RollStack};

/// Longest roll sequence printed in full
const MAX_PRINTED_GLYPHS: u128 = 12;

#[derive(Serialize)]
struct DiffReport<'a> {
    from: u64,
    to: u64,
    slots: &'a [DigitSlot],
}

pub fn run(config: &AppConfig, from: u64, to: u64, json: bool) -> Result<()> {
    let slots = diff_slots(config, from, to);

    if json {
        let report = DiffReport {
            from,
            to,
            slots: &slots,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} -> {}", from, to);
    println!("{:>4}  {:>5}  {:>21}  {:<4}  {:<6}  roll", "pos", "digit", "delta", "new", "static");
    for slot in &slots {
        let roll = if slot.is_exempt_from_animation {
            slot.final_digit.to_string()
        } else {
            roll_sequence(&RollStack::from_slot(slot))
        };
        println!(
            "{:>4}  {:>5}  {:>21}  {:<4}  {:<6}  {}",
            slot.position_from_right,
            slot.final_digit,
            slot.delta,
            yes_no(slot.is_newly_appeared),
            yes_no(slot.is_exempt_from_animation),
            roll
        );
    }
    Ok(())
}

/// Slots of the transition as a counter mounted at `from` would see them
fn diff_slots(config: &AppConfig, from: u64, to: u64) -> Vec<DigitSlot> {
    let mut counter = Counter::new(from, config.counter_options(), GlyphSize::new(1, 1));
    counter.set_value(to, Instant::now());
    counter.slots().to_vec()
}

/// Glyphs from the top of the stack down, ending on the final digit
fn roll_sequence(stack: &RollStack) -> String {
    let count = stack.draw_count();
    if count <= MAX_PRINTED_GLYPHS {
        let glyphs: Vec<String> = stack.glyphs().map(|g| g.to_string()).collect();
        return glyphs.into_iter().rev().collect::<Vec<_>>().join(" ");
    }
    let head: Vec<String> = (count - 3..count)
        .rev()
        .map(|k| stack.glyph_at(k).to_string())
        .collect();
    format!("{} … {} ({} glyphs)", head.join(" "), stack.final_digit, count)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
