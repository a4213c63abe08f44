//! `InputSource` backed by crossterm's event queue.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::handler::KeyTracker;
use crate::map::{control_for, is_escape, should_quit};
use crate::types::{InputFrame, InputSource};

/// Drains pending terminal events without blocking.
#[derive(Debug, Clone, Default)]
pub struct TerminalInput {
    tracker: KeyTracker,
}

impl TerminalInput {
    pub fn new(key_release_timeout_ms: u32) -> Self {
        Self {
            tracker: KeyTracker::with_key_release_timeout_ms(key_release_timeout_ms),
        }
    }

    pub fn tracker(&self) -> &KeyTracker {
        &self.tracker
    }

    /// Fold one key event into the tracker and the frame being built.
    pub fn handle_key(&mut self, key: KeyEvent, frame: &mut InputFrame) {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if should_quit(key) {
                    frame.quit = true;
                } else if is_escape(key) {
                    frame.escape = true;
                } else if let Some(control) = control_for(key.code) {
                    self.tracker.press(control);
                }
            }
            KeyEventKind::Release => {
                if let Some(control) = control_for(key.code) {
                    self.tracker.release(control);
                }
            }
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> InputFrame {
        let mut frame = InputFrame::default();
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    log::error!("terminal event poll failed: {}", e);
                    frame.quit = true;
                    break;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) => self.handle_key(key, &mut frame),
                // Resize is picked up by the renderer on the next draw.
                Ok(_) => {}
                Err(e) => {
                    log::error!("terminal event read failed: {}", e);
                    frame.quit = true;
                    break;
                }
            }
        }
        frame.held = self.tracker.held();
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn press_and_release_update_tracker() {
        let mut input = TerminalInput::new(10_000);
        let mut frame = InputFrame::default();

        input.handle_key(key(KeyCode::Left, KeyEventKind::Press), &mut frame);
        input.handle_key(key(KeyCode::Up, KeyEventKind::Repeat), &mut frame);
        let mut tracker = input.tracker().clone();
        let held = tracker.held();
        assert!(held.left && held.jump && !held.right);

        input.handle_key(key(KeyCode::Left, KeyEventKind::Release), &mut frame);
        let mut tracker = input.tracker().clone();
        assert!(!tracker.held().left);
        assert!(!frame.quit && !frame.escape);
    }

    #[test]
    fn quit_and_escape_are_flagged() {
        let mut input = TerminalInput::default();
        let mut frame = InputFrame::default();
        input.handle_key(key(KeyCode::Esc, KeyEventKind::Press), &mut frame);
        assert!(frame.escape);
        assert!(!frame.quit);

        input.handle_key(key(KeyCode::Char('q'), KeyEventKind::Press), &mut frame);
        assert!(frame.quit);
    }

    #[test]
    fn release_of_quit_key_is_ignored() {
        let mut input = TerminalInput::default();
        let mut frame = InputFrame::default();
        input.handle_key(key(KeyCode::Char('q'), KeyEventKind::Release), &mut frame);
        assert!(!frame.quit);
    }
}
