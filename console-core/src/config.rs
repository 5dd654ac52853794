//! Console configuration
//!
//! Sizes, timings and the activation key. Every field has a default so a
//! partial TOML table deserializes cleanly.

use serde::{Deserialize, Serialize};

use crate::input::Key;

/// Bytes of text per line (a 1024-byte buffer minus its terminator)
pub const DEFAULT_LINE_CAPACITY: usize = 1023;

/// Total console lines: the prompt plus the scrollback
pub const DEFAULT_LINES: usize = 255;

/// Console configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Maximum bytes per line, for the prompt and for output
    #[serde(default = "default_line_capacity")]
    pub line_capacity: usize,

    /// Total lines including the prompt; the scrollback keeps one less
    #[serde(default = "default_lines")]
    pub lines: usize,

    /// Number of remembered commands
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Key that opens and closes the console
    #[serde(default = "default_activation_key")]
    pub activation_key: Key,

    /// Seconds backspace must be held before it repeats
    #[serde(default = "default_backspace_delay")]
    pub backspace_delay: f32,

    /// Seconds between backspace repeats
    #[serde(default = "default_backspace_interval")]
    pub backspace_interval: f32,

    /// Seconds an arrow key must be held before it repeats
    #[serde(default = "default_cursor_delay")]
    pub cursor_delay: f32,

    /// Seconds between arrow key repeats
    #[serde(default = "default_cursor_interval")]
    pub cursor_interval: f32,

    /// Seconds per cursor blink phase
    #[serde(default = "default_blink_period")]
    pub blink_period: f32,

    /// Steps between closed and fully open
    #[serde(default = "default_animation_steps")]
    pub animation_steps: u32,

    /// Seconds that must pass before the next animation step
    #[serde(default = "default_step_interval")]
    pub step_interval: f32,

    /// Glyph drawn over the cursor position
    #[serde(default = "default_cursor_glyph")]
    pub cursor_glyph: char,

    /// Share of the viewport height covered when fully open
    #[serde(default = "default_viewport_fraction")]
    pub viewport_fraction: f32,
}

fn default_line_capacity() -> usize {
    DEFAULT_LINE_CAPACITY
}
fn default_lines() -> usize {
    DEFAULT_LINES
}
fn default_history_capacity() -> usize {
    255
}
fn default_activation_key() -> Key {
    Key::F3
}
fn default_backspace_delay() -> f32 {
    0.5
}
fn default_backspace_interval() -> f32 {
    0.025
}
fn default_cursor_delay() -> f32 {
    0.4
}
fn default_cursor_interval() -> f32 {
    0.05
}
fn default_blink_period() -> f32 {
    0.5
}
fn default_animation_steps() -> u32 {
    100
}
fn default_step_interval() -> f32 {
    0.001
}
fn default_cursor_glyph() -> char {
    '_'
}
fn default_viewport_fraction() -> f32 {
    1.0 / 3.0
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            line_capacity: default_line_capacity(),
            lines: default_lines(),
            history_capacity: default_history_capacity(),
            activation_key: default_activation_key(),
            backspace_delay: default_backspace_delay(),
            backspace_interval: default_backspace_interval(),
            cursor_delay: default_cursor_delay(),
            cursor_interval: default_cursor_interval(),
            blink_period: default_blink_period(),
            animation_steps: default_animation_steps(),
            step_interval: default_step_interval(),
            cursor_glyph: default_cursor_glyph(),
            viewport_fraction: default_viewport_fraction(),
        }
    }
}

/// Configuration error
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    pub message: String,
    pub field: Option<String>,
}

impl ConfigError {
    /// Error about a specific field
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "Config error in '{}': {}", field, self.message)
        } else {
            write!(f, "Config error: {}", self.message)
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConsoleConfig {
    /// Number of output lines kept in the scrollback
    pub fn scrollback_capacity(&self) -> usize {
        self.lines.saturating_sub(1)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        // A line must hold any single codepoint
        if self.line_capacity < 4 {
            return Err(ConfigError::field(
                "line_capacity",
                "Line capacity must be at least 4 bytes",
            ));
        }
        if self.line_capacity > 1 << 20 {
            return Err(ConfigError::field(
                "line_capacity",
                "Line capacity must be at most 1 MiB",
            ));
        }

        if self.lines < 2 {
            return Err(ConfigError::field(
                "lines",
                "Console needs at least 2 lines (prompt and output)",
            ));
        }
        if self.lines > 1_000_000 {
            return Err(ConfigError::field("lines", "Lines must be at most 1,000,000"));
        }
        if self.history_capacity > 1_000_000 {
            return Err(ConfigError::field(
                "history_capacity",
                "History capacity must be at most 1,000,000",
            ));
        }

        for (field, value) in [
            ("backspace_delay", self.backspace_delay),
            ("backspace_interval", self.backspace_interval),
            ("cursor_delay", self.cursor_delay),
            ("cursor_interval", self.cursor_interval),
            ("blink_period", self.blink_period),
            ("step_interval", self.step_interval),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::field(
                    field,
                    format!("Expected a non-negative number of seconds, got {}", value),
                ));
            }
        }

        if self.animation_steps == 0 {
            return Err(ConfigError::field(
                "animation_steps",
                "Animation needs at least one step",
            ));
        }

        if !(self.viewport_fraction > 0.0 && self.viewport_fraction <= 1.0) {
            return Err(ConfigError::field(
                "viewport_fraction",
                "Viewport fraction must be in (0, 1]",
            ));
        }

        if self.cursor_glyph.is_control() {
            return Err(ConfigError::field(
                "cursor_glyph",
                "Cursor glyph must be printable",
            ));
        }

        Ok(())
    }
}
