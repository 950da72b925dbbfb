//! Keyboard navigation and event handling
//!
//! Maps keyboard events to viewer actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Handle keyboard input and update app state
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit();
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.quit();
        }
        KeyCode::Esc => {
            if app.show_help {
                app.toggle_help();
            } else {
                app.quit();
            }
        }

        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),

        KeyCode::Char('?') | KeyCode::Char('h') => app.toggle_help(),

        _ => {}
    }
}

/// Key bindings help text
pub fn key_bindings_help() -> Vec<(&'static str, &'static str)> {
    vec![
        ("q / Esc / Ctrl+C", "Quit"),
        ("↑/k, ↓/j", "Select trade"),
        ("g / G", "First / last trade"),
        ("? / h", "Toggle help"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::round_trip_result;

    fn app() -> App {
        App::new(&round_trip_result())
    }

    #[test]
    fn test_quit_key() {
        let mut app = app();
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(!app.running);
    }

    #[test]
    fn test_plain_c_does_nothing() {
        let mut app = app();
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Char('c')));
        assert!(app.running);
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = app();
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Down));
        assert_eq!(app.selected_trade, 1);
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Char('k')));
        assert_eq!(app.selected_trade, 0);
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Char('G')));
        assert_eq!(app.selected_trade, 1);
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Char('g')));
        assert_eq!(app.selected_trade, 0);
    }

    #[test]
    fn test_esc_closes_help_before_quitting() {
        let mut app = app();
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(app.running);
        handle_key_event(&mut app, KeyEvent::from(KeyCode::Esc));
        assert!(!app.running);
    }

    #[test]
    fn test_key_bindings_help() {
        let help = key_bindings_help();
        assert!(help.iter().any(|(k, _)| k.contains('q')));
    }
}
