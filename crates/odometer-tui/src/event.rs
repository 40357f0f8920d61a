use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Event handler for terminal events
///
/// Polls at the idle tick rate normally and at the animation frame rate while
/// a counter is rolling.
pub struct EventHandler {
    tick_rate: Duration,
    animation_tick: Duration,
}

impl EventHandler {
    pub fn with_animation_fps(tick_rate_ms: u64, animation_fps: u32) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_tick: animation_tick_duration(animation_fps),
        }
    }

    /// Poll for the next event at the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll for the next event at the animation frame rate
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_tick)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    // (crossterm 0.27+ sends release events on some systems)
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Frame interval for an animation FPS
pub fn animation_tick_duration(fps: u32) -> Duration {
    if fps == 0 {
        Duration::from_millis(16) // ~60fps fallback
    } else {
        // Never zero: a zero poll timeout would spin
        Duration::from_millis((1000 / fps as u64).max(1))
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}
