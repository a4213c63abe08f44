//! Key mapping from terminal events to game controls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A control the player can hold down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    Jump,
}

/// Map a key to the control it drives.
pub fn control_for(code: KeyCode) -> Option<Control> {
    match code {
        KeyCode::Left
        | KeyCode::Char('a')
        | KeyCode::Char('A')
        | KeyCode::Char('h')
        | KeyCode::Char('H') => Some(Control::Left),
        KeyCode::Right
        | KeyCode::Char('d')
        | KeyCode::Char('D')
        | KeyCode::Char('l')
        | KeyCode::Char('L') => Some(Control::Right),
        KeyCode::Up
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char(' ') => Some(Control::Jump),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Escape/cancel ends the session as well, but is reported separately.
pub fn is_escape(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
}
