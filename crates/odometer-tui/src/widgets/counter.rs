use std::time::Instant;

use odometer_core::Counter;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Widget},
    Frame,
};

use crate::app::App;
use crate::canvas::BufferCanvas;
use crate::font::DigitStyle;

/// Draws a [`Counter`] as it looks at one instant.
///
/// The widget occupies `counter.width()` by `counter.height()` cells,
/// placed inside the area according to `alignment` and centred vertically.
pub struct CounterWidget<'a> {
    counter: &'a Counter,
    style: DigitStyle,
    now: Instant,
    alignment: Alignment,
}

impl<'a> CounterWidget<'a> {
    pub fn new(counter: &'a Counter, style: DigitStyle, now: Instant) -> Self {
        Self {
            counter,
            style,
            now,
            alignment: Alignment::Center,
        }
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl Widget for CounterWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = self.counter.width();
        let height = self.counter.height();
        let free = area.width.saturating_sub(width);
        let x = match self.alignment {
            Alignment::Left => area.x,
            Alignment::Center => area.x + free / 2,
            Alignment::Right => area.x + free,
        };
        let y = area.y + area.height.saturating_sub(height) / 2;

        let mut canvas = BufferCanvas::new(buf, area);
        self.counter.render(&mut canvas, &self.style, x, y, self.now);
    }
}

/// Bordered panel holding the app's counter
pub struct CounterPanel;

impl CounterPanel {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
        let block = Block::default()
            .title(" Odometer ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.grey))
            .style(Style::default().bg(app.theme.bg0));

        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(CounterWidget::new(&app.counter, app.digit_style(), now), inner);
    }
}
