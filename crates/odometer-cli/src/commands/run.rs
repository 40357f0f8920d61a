use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::info;

use odometer_core::AppConfig;
use odometer_tui::{
    app::{App, Field, Mode},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    keymap::Keymap,
    load_theme,
    widgets::{ControlsWidget, CounterPanel, PopupWidget, StatusBarWidget},
};

pub fn run(config: Arc<AppConfig>) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("Odometer"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Load theme from config
    let theme = load_theme(&config.ui.theme);

    // Create app state
    let mut app = App::new(config.clone(), theme);
    info!(value = app.counter.value(), step = app.step, "counter started");

    // Create event handler with animation FPS support
    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);

    let result = run_loop(&mut terminal, &mut app, &keymap, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    keymap: &Keymap,
    event_handler: &EventHandler,
) -> Result<()> {
    // Poll at the animation frame rate only while a digit is rolling
    let mut needs_fast_update = false;

    loop {
        let now = Instant::now();

        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: counter + controls + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(3),
                    Constraint::Length(2),
                    Constraint::Length(1),
                ])
                .split(size);

            CounterPanel::render(frame, main_layout[0], app, now);
            ControlsWidget::render(frame, main_layout[1], app);
            StatusBarWidget::render(frame, main_layout[2], app, now);

            if app.mode == Mode::Help {
                PopupWidget::render_help(frame, &app.config.keymap, &app.theme);
            }
        })?;

        // Handle events (use faster tick rate while rolling)
        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    handle_action(app, action, Instant::now());
                }
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {}
            }
        }

        // Update fast update flag for next iteration
        needs_fast_update = app.tick(Instant::now());

        if app.should_quit {
            info!(value = app.counter.value(), "counter stopped");
            return Ok(());
        }
    }
}

/// Apply an input action to the app
fn handle_action(app: &mut App, action: Action, now: Instant) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::Increment => app.increment(now),
        Action::Decrement => app.decrement(now),
        Action::EditStep => app.start_editing(Field::Step),
        Action::EditNeverAnimate => app.start_editing(Field::NeverAnimate),
        Action::EditValue => app.start_editing(Field::Value),
        Action::ToggleFont => app.toggle_font(),
        Action::Reset => app.reset(),
        Action::ToggleHelp => app.toggle_help(),
        Action::Confirm => app.confirm_input(now),
        Action::Cancel => app.cancel_input(),
        Action::InputChar(c) => app.input_char(c),
        Action::Backspace => app.input_backspace(),
        Action::None => {}
    }
}
