use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use odometer_core::config::KeymapConfig;

use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key help overlay
    pub fn render_help(frame: &mut Frame, keymap: &KeymapConfig, theme: &Theme) {
        let entries: [(&str, &str); 9] = [
            (keymap.increment.as_str(), "add step (also ↑ or +)"),
            (keymap.decrement.as_str(), "subtract step (also ↓ or -)"),
            (keymap.edit_step.as_str(), "edit step"),
            (keymap.edit_never_animate.as_str(), "edit never-animate digits"),
            (keymap.edit_value.as_str(), "jump to a value"),
            (keymap.toggle_font.as_str(), "toggle plain/block digits"),
            (keymap.reset.as_str(), "reset without rolling"),
            (keymap.help.as_str(), "toggle this help"),
            (keymap.quit.as_str(), "quit"),
        ];

        let area = frame.area();
        let popup_width = 44u16.min(area.width.saturating_sub(4));
        let popup_height = (entries.len() as u16 + 2).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg2));

        let lines: Vec<Line> = entries
            .iter()
            .map(|(key, description)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:>6}  ", key),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*description, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
