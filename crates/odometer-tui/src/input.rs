use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Increment,
    Decrement,
    EditStep,
    EditNeverAnimate,
    EditValue,
    ToggleFont,
    Reset,
    ToggleHelp,
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    if app.is_input_mode() {
        return handle_input_mode(key);
    }

    if app.mode == Mode::Help {
        // Any key exits help
        return Action::ToggleHelp;
    }

    // Shifted characters arrive with SHIFT set; bindings store them that way
    let binding = KeyBinding::new(key.code, key.modifiers);
    keymap.get(&binding).cloned().unwrap_or(Action::None)
}

/// Handle keys while a field is being edited
fn handle_input_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => Action::Confirm,
        (KeyCode::Esc, _) => Action::Cancel,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Cancel,
        (KeyCode::Backspace, _) => Action::Backspace,
        (KeyCode::Char(c), _) => Action::InputChar(c),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use odometer_core::AppConfig;

    use super::*;
    use crate::app::Field;
    use crate::theme::Theme;

    fn app() -> App {
        App::new(Arc::new(AppConfig::default()), Theme::default())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_uses_keymap() {
        let app = app();
        let keymap = Keymap::default();
        assert_eq!(handle_key_event(press(KeyCode::Char('k')), &app, &keymap), Action::Increment);
        assert_eq!(handle_key_event(press(KeyCode::Down), &app, &keymap), Action::Decrement);
        assert_eq!(handle_key_event(press(KeyCode::Char('z')), &app, &keymap), Action::None);
    }

    #[test]
    fn test_input_mode_captures_characters() {
        let mut app = app();
        app.start_editing(Field::Step);
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(press(KeyCode::Char('q')), &app, &keymap),
            Action::InputChar('q')
        );
        assert_eq!(handle_key_event(press(KeyCode::Enter), &app, &keymap), Action::Confirm);
        assert_eq!(handle_key_event(press(KeyCode::Esc), &app, &keymap), Action::Cancel);
    }

    #[test]
    fn test_any_key_leaves_help() {
        let mut app = app();
        app.toggle_help();
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(press(KeyCode::Char('k')), &app, &keymap),
            Action::ToggleHelp
        );
    }
}
