use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Field, Mode};

/// Step and never-animate settings, with an inline editor
pub struct ControlsWidget;

impl ControlsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let label = Style::default().fg(theme.grey);
        let value = Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD);
        let editing = Style::default()
            .fg(theme.bg0)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD);

        let field_span = |field: Field, current: String| -> Span<'static> {
            match &app.mode {
                Mode::Editing(f, buffer) if *f == field => {
                    Span::styled(format!("{}▏", buffer), editing)
                }
                _ => Span::styled(current, value),
            }
        };

        let options = app.counter.options();
        let mut spans = vec![
            Span::styled("step ", label),
            field_span(Field::Step, app.step.to_string()),
            Span::styled("   never-animate ", label),
            field_span(
                Field::NeverAnimate,
                options.number_of_end_digits_that_never_animate.to_string(),
            ),
            Span::styled("   duration ", label),
            Span::styled(format!("{}ms", options.animation_duration_ms), value),
        ];
        if options.animation_delay_ms > 0 {
            spans.push(Span::styled("   delay ", label));
            spans.push(Span::styled(format!("{}ms", options.animation_delay_ms), value));
        }
        if let Mode::Editing(Field::Value, _) = &app.mode {
            spans.push(Span::styled("   value ", label));
            spans.push(field_span(Field::Value, String::new()));
        }

        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(theme.grey))
            .style(Style::default().bg(theme.bg0));

        let paragraph = Paragraph::new(Line::from(spans))
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}
