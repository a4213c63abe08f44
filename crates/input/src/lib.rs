//! Terminal input module (game-facing).
//!
//! This module maps `crossterm` key events onto the three controls the game
//! reads (left, right, jump) and tracks which of them are held. Most terminals
//! only report presses and auto-repeats, never releases, so held keys expire
//! after a short timeout unless the terminal has proven it sends releases.

pub mod handler;
pub mod map;
pub mod terminal;

pub use tui_platformer_types as types;

pub use handler::KeyTracker;
pub use map::{control_for, is_escape, should_quit, Control};
pub use terminal::TerminalInput;
