//! Held-key tracking for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::{Duration, Instant};

use crate::map::Control;
use crate::types::HeldKeys;

// Terminal auto-repeat runs at 15+ Hz once it kicks in, but the initial repeat
// delay can be longer; this is short enough that a tap does not turn into a run.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks which controls are held.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    left: Option<Instant>,
    right: Option<Instant>,
    jump: Option<Instant>,
    key_release_timeout: Duration,
    /// Set once a real release event arrives; from then on keys never time out.
    releases_reported: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::with_key_release_timeout_ms(DEFAULT_KEY_RELEASE_TIMEOUT_MS)
    }

    pub fn with_key_release_timeout_ms(timeout_ms: u32) -> Self {
        Self {
            left: None,
            right: None,
            jump: None,
            key_release_timeout: Duration::from_millis(timeout_ms as u64),
            releases_reported: false,
        }
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout.as_millis() as u32
    }

    pub fn releases_reported(&self) -> bool {
        self.releases_reported
    }

    /// A press or auto-repeat for `control`.
    pub fn press(&mut self, control: Control) {
        *self.slot(control) = Some(Instant::now());
    }

    pub fn release(&mut self, control: Control) {
        self.releases_reported = true;
        *self.slot(control) = None;
    }

    /// Current held state, expiring stale presses.
    pub fn held(&mut self) -> HeldKeys {
        HeldKeys {
            left: self.check(Control::Left),
            right: self.check(Control::Right),
            jump: self.check(Control::Jump),
        }
    }

    fn check(&mut self, control: Control) -> bool {
        let timeout = self.key_release_timeout;
        let trust_releases = self.releases_reported;
        let slot = self.slot(control);
        let pressed_at = *slot;
        match pressed_at {
            Some(_) if trust_releases => true,
            Some(at) if at.elapsed() <= timeout => true,
            Some(_) => {
                *slot = None;
                false
            }
            None => false,
        }
    }

    fn slot(&mut self, control: Control) -> &mut Option<Instant> {
        match control {
            Control::Left => &mut self.left,
            Control::Right => &mut self.right,
            Control::Jump => &mut self.jump,
        }
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}
