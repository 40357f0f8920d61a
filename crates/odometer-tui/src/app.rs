use std::sync::Arc;
use std::time::Instant;

use odometer_core::{
    parse_counter_value, uniform_slot_size, AppConfig, Counter, CounterValue, DigitFontKind,
};
use ratatui::style::{Modifier, Style};
use tracing::{debug, info};

use crate::font::{DigitStyle, FontMeasurer};
use crate::theme::Theme;

/// Editable numeric field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Amount added or subtracted per key press
    Step,
    /// Trailing digits that never animate
    NeverAnimate,
    /// Value to jump to
    Value,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Step => "step",
            Field::NeverAnimate => "never-animate digits",
            Field::Value => "value",
        }
    }
}

/// Message shown in the status bar until the next value change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Info(text) | StatusMessage::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StatusMessage::Error(_))
    }
}

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Keys change the counter
    Normal,
    /// Typing into a field
    Editing(Field, String),
    /// Help overlay
    Help,
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    /// The counter on display
    pub counter: Counter,
    /// Amount added or subtracted per key press
    pub step: u64,
    /// Current digit font
    pub font: DigitFontKind,
    /// Current application mode
    pub mode: Mode,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<StatusMessage>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Self {
        let font = config.counter.font;
        let style = DigitStyle::new(font, Self::digits_style(&theme));
        let slot_size = uniform_slot_size(&FontMeasurer, &style);
        let counter = Counter::new(config.ui.initial_value, config.counter_options(), slot_size);
        Self {
            step: config.ui.initial_step,
            config,
            theme,
            counter,
            font,
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
        }
    }

    fn digits_style(theme: &Theme) -> Style {
        Style::default()
            .fg(theme.digits)
            .add_modifier(Modifier::BOLD)
    }

    /// Text style the counter is drawn with
    pub fn digit_style(&self) -> DigitStyle {
        DigitStyle::new(self.font, Self::digits_style(&self.theme))
    }

    /// Add the step to the value
    pub fn increment(&mut self, now: Instant) {
        let value = self.counter.value().saturating_add(self.step);
        self.set_value(value, now);
    }

    /// Subtract the step from the value, stopping at 0
    pub fn decrement(&mut self, now: Instant) {
        let value = self.counter.value().saturating_sub(self.step);
        self.set_value(value, now);
    }

    pub fn set_value(&mut self, value: CounterValue, now: Instant) {
        if self.counter.set_value(value, now) {
            self.status_message = None;
        }
    }

    /// Jump back to the configured initial value without rolling
    pub fn reset(&mut self) {
        self.counter.reset(self.config.ui.initial_value);
        self.status_message = Some(StatusMessage::Info("Reset".to_string()));
    }

    /// Switch between plain and block digits, resizing every slot
    pub fn toggle_font(&mut self) {
        self.font = match self.font {
            DigitFontKind::Plain => DigitFontKind::Block,
            DigitFontKind::Block => DigitFontKind::Plain,
        };
        let size = uniform_slot_size(&FontMeasurer, &self.digit_style());
        self.counter.set_slot_size(size);
        debug!(font = ?self.font, ?size, "digit font changed");
    }

    /// Begin editing `field`, prefilled with its current value
    pub fn start_editing(&mut self, field: Field) {
        let current = match field {
            Field::Step => self.step.to_string(),
            Field::NeverAnimate => self
                .counter
                .options()
                .number_of_end_digits_that_never_animate
                .to_string(),
            Field::Value => self.counter.value().to_string(),
        };
        self.mode = Mode::Editing(field, current);
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::Editing(..))
    }

    pub fn input_char(&mut self, c: char) {
        if let Mode::Editing(_, buffer) = &mut self.mode {
            if c.is_ascii_digit() {
                buffer.push(c);
            }
        }
    }

    pub fn input_backspace(&mut self) {
        if let Mode::Editing(_, buffer) = &mut self.mode {
            buffer.pop();
        }
    }

    /// Apply the field being edited. Text that is not a number is ignored.
    pub fn confirm_input(&mut self, now: Instant) {
        let Mode::Editing(field, text) = std::mem::replace(&mut self.mode, Mode::Normal) else {
            return;
        };

        let parsed = match parse_counter_value(&text) {
            Ok(v) => v,
            Err(e) => {
                debug!(field = field.label(), error = %e, "ignoring input");
                self.status_message = Some(StatusMessage::Error(format!(
                    "Invalid {}: {:?}",
                    field.label(),
                    text
                )));
                return;
            }
        };

        match field {
            Field::Step => {
                self.step = parsed;
                info!(step = parsed, "step changed");
            }
            Field::NeverAnimate => {
                let count = usize::try_from(parsed).unwrap_or(usize::MAX);
                self.counter.set_never_animate(count);
            }
            Field::Value => self.set_value(parsed, now),
        }
    }

    pub fn cancel_input(&mut self) {
        self.mode = Mode::Normal;
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            Mode::Help => Mode::Normal,
            _ => Mode::Help,
        };
    }

    /// Advance animations; returns whether a fast frame rate is needed
    pub fn tick(&mut self, now: Instant) -> bool {
        self.counter.tick(now)
    }
}
