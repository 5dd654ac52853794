//! Held-key repeat and cursor blink timers
//!
//! Both are driven by frame deltas in seconds. A repeat fires at most once
//! per tick, so a slow frame never replays a burst of edits.

/// Auto-repeat timer for a held key
///
/// The action runs once on press (by the caller), then again after
/// `first_delay`, then every `interval` until the key is released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyRepeat {
    held: bool,
    timer: f32,
    timeout: f32,
    first_delay: f32,
    interval: f32,
}

impl KeyRepeat {
    /// Create a released repeat timer
    pub fn new(first_delay: f32, interval: f32) -> Self {
        Self {
            held: false,
            timer: 0.0,
            timeout: first_delay,
            first_delay,
            interval,
        }
    }

    /// Start holding the key
    pub fn press(&mut self) {
        self.held = true;
        self.timer = 0.0;
        self.timeout = self.first_delay;
    }

    /// Stop holding the key
    pub fn release(&mut self) {
        self.held = false;
        self.timer = 0.0;
        self.timeout = self.first_delay;
    }

    /// Check if the key is held
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Advance by `dt` seconds; returns true when the action should repeat
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.held {
            return false;
        }
        self.timer += dt;
        if self.timer > self.timeout {
            self.timer = 0.0;
            self.timeout = self.interval;
            return true;
        }
        false
    }
}

/// Cursor blink phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blink {
    visible: bool,
    timer: f32,
    period: f32,
}

impl Blink {
    /// Create a visible cursor toggling every `period` seconds
    pub fn new(period: f32) -> Self {
        Self {
            visible: true,
            timer: 0.0,
            period,
        }
    }

    /// Check if the cursor is in its visible phase
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Advance by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.timer += dt;
        if self.timer > self.period {
            self.timer = 0.0;
            self.visible = !self.visible;
        }
    }

    /// Restart in the visible phase
    pub fn reset(&mut self) {
        self.visible = true;
        self.timer = 0.0;
    }
}
