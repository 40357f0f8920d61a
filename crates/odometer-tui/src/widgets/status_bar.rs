use std::time::Instant;

use odometer_core::config::KeymapConfig;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
        let theme = &app.theme;
        let mode_str = match &app.mode {
            Mode::Normal => {
                if app.counter.is_animating(now) {
                    "ROLLING"
                } else {
                    "NORMAL"
                }
            }
            Mode::Editing(field, _) => field.label(),
            Mode::Help => "HELP",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg.text())
        } else {
            format!(
                " {} | value: {} | digits: {}",
                mode_str,
                app.counter.value(),
                app.counter.slots().len()
            )
        };

        let help_hint = key_hints(&app.mode, &app.config.keymap);
        let padding_len = area.width.saturating_sub(
            status_text.chars().count() as u16 + help_hint.chars().count() as u16,
        ) as usize;

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(status_color(app)).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Foreground for the left-hand status text
fn status_color(app: &App) -> Color {
    match &app.status_message {
        Some(msg) if msg.is_error() => app.theme.error,
        Some(_) => app.theme.accent,
        None => app.theme.fg0,
    }
}

/// Right-hand key hints, using the configured bindings
fn key_hints(mode: &Mode, keymap: &KeymapConfig) -> String {
    match mode {
        Mode::Editing(..) => " <CR>:apply <Esc>:cancel ".to_string(),
        _ => format!(
            " {}:quit {}/{}:up/down {}:step {}:never-animate {}:help ",
            keymap.quit,
            keymap.increment,
            keymap.decrement,
            keymap.edit_step,
            keymap.edit_never_animate,
            keymap.help
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use odometer_core::AppConfig;

    use super::*;
    use crate::app::{Field, StatusMessage};
    use crate::theme::Theme;

    #[test]
    fn test_default_hints() {
        let hints = key_hints(&Mode::Normal, &KeymapConfig::default());
        assert_eq!(hints, " q:quit k/j:up/down s:step n:never-animate ?:help ");
    }

    #[test]
    fn test_hints_follow_configured_keys() {
        let keymap = KeymapConfig {
            quit: "x".to_string(),
            increment: "<Up>".to_string(),
            decrement: "<Down>".to_string(),
            ..Default::default()
        };
        let hints = key_hints(&Mode::Help, &keymap);
        assert!(hints.contains("x:quit"));
        assert!(hints.contains("<Up>/<Down>:up/down"));
        assert!(!hints.contains("q:quit"));
    }

    #[test]
    fn test_editing_hints() {
        let hints = key_hints(&Mode::Editing(Field::Step, String::new()), &KeymapConfig::default());
        assert!(hints.contains("<Esc>:cancel"));
    }

    #[test]
    fn test_status_color_by_severity() {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default());
        assert_eq!(status_color(&app), app.theme.fg0);

        app.reset();
        assert_eq!(status_color(&app), app.theme.accent);

        app.status_message = Some(StatusMessage::Error("Invalid step".to_string()));
        assert_eq!(status_color(&app), app.theme.error);
    }
}
