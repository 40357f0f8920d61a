use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};
use odometer_core::config::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// Parsed key binding (key code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

/// Runtime keymap for key-to-action lookup
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    /// Create a keymap from configuration
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();

        let mut add_binding = |key_str: &str, action: Action| {
            if let Some(binding) = parse_key_binding(key_str) {
                if let Some(existing) = bindings.get(&binding) {
                    warn!(
                        "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                        key_str, existing, action
                    );
                } else {
                    bindings.insert(binding, action);
                }
            } else {
                warn!("Invalid key binding: '{}', ignoring", key_str);
            }
        };

        add_binding(&config.quit, Action::Quit);
        add_binding(&config.increment, Action::Increment);
        add_binding(&config.decrement, Action::Decrement);
        add_binding(&config.edit_step, Action::EditStep);
        add_binding(&config.edit_never_animate, Action::EditNeverAnimate);
        add_binding(&config.edit_value, Action::EditValue);
        add_binding(&config.toggle_font, Action::ToggleFont);
        add_binding(&config.reset, Action::Reset);
        add_binding(&config.help, Action::ToggleHelp);

        // Ctrl+C always quits
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        // Arrow keys and +/- as alternatives
        bindings.entry(KeyBinding::simple(KeyCode::Up)).or_insert(Action::Increment);
        bindings.entry(KeyBinding::simple(KeyCode::Down)).or_insert(Action::Decrement);
        bindings.entry(KeyBinding::simple(KeyCode::Char('-'))).or_insert(Action::Decrement);
        // '+' is shifted on most layouts; accept both forms
        bindings.entry(KeyBinding::simple(KeyCode::Char('+'))).or_insert(Action::Increment);
        bindings.entry(KeyBinding::shift(KeyCode::Char('+'))).or_insert(Action::Increment);
        // '?' is usually shifted too
        if let Some(binding) = parse_key_binding(&config.help) {
            if let KeyCode::Char(c) = binding.code {
                if !c.is_ascii_alphanumeric() {
                    bindings
                        .entry(KeyBinding::shift(KeyCode::Char(c)))
                        .or_insert(Action::ToggleHelp);
                }
            }
        }

        Self { bindings }
    }

    /// Get action for a key binding
    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }
}

/// Parse Vim-style key notation into KeyBinding
/// Supported formats:
/// - Single char: "j", "k", "q", "=", etc.
/// - Uppercase (Shift): "G", "N", etc.
/// - Ctrl: "<C-j>", "<C-k>", etc.
/// - Shift: "<S-Tab>", "<S-g>", etc.
/// - Special keys: "<CR>", "<Enter>", "<Esc>", "<Tab>", "<Space>", "<Left>", "<Right>", "<Up>", "<Down>"
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();

    if s.len() > 2 && s.starts_with('<') && s.ends_with('>') {
        let inner = &s[1..s.len() - 1];
        return parse_special_key(inner);
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    // Uppercase letters are Shift+letter
    if c.is_ascii_uppercase() {
        return Some(KeyBinding::shift(KeyCode::Char(c)));
    }
    Some(KeyBinding::simple(KeyCode::Char(c)))
}

/// Parse special key notation (content inside <...>)
fn parse_special_key(inner: &str) -> Option<KeyBinding> {
    if let Some(rest) = inner.strip_prefix("C-") {
        let key = parse_key_name(rest)?;
        return Some(KeyBinding::ctrl(key));
    }

    if let Some(rest) = inner.strip_prefix("S-") {
        let key = parse_key_name(rest)?;
        return Some(KeyBinding::shift(key));
    }

    parse_key_name(inner).map(KeyBinding::simple)
}

/// Parse a key name (without modifiers)
fn parse_key_name(name: &str) -> Option<KeyCode> {
    match name.to_lowercase().as_str() {
        "cr" | "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "space" | "spc" => Some(KeyCode::Char(' ')),
        "bs" | "backspace" => Some(KeyCode::Backspace),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        _ => {
            // Single character after modifier (e.g., "j" in "<C-j>")
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_none() {
                Some(KeyCode::Char(c.to_ascii_lowercase()))
            } else {
                None
            }
        }
    }
}
