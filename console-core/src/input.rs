//! Input events
//!
//! The host translates its windowing events into [`InputEvent`]s and feeds
//! them to the console once per frame. Text arrives as [`InputEvent::Char`];
//! editing and navigation keys arrive as key down/up pairs so held keys can
//! auto-repeat.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Keys the console reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    // Cursor keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,

    // Editing
    Backspace,
    Enter,
    Tab,
    Escape,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    /// A backquote / tilde key, a common console toggle
    Grave,
}

const FUNCTION_KEYS: [Key; 12] = [
    Key::F1,
    Key::F2,
    Key::F3,
    Key::F4,
    Key::F5,
    Key::F6,
    Key::F7,
    Key::F8,
    Key::F9,
    Key::F10,
    Key::F11,
    Key::F12,
];

impl Key {
    /// Function key by number (1-12)
    pub fn function(n: u8) -> Option<Key> {
        let index = usize::from(n).checked_sub(1)?;
        FUNCTION_KEYS.get(index).copied()
    }

    /// Canonical lowercase name, as accepted by [`FromStr`]
    pub fn name(self) -> &'static str {
        match self {
            Key::Up => "up",
            Key::Down => "down",
            Key::Left => "left",
            Key::Right => "right",
            Key::Home => "home",
            Key::End => "end",
            Key::Backspace => "backspace",
            Key::Enter => "enter",
            Key::Tab => "tab",
            Key::Escape => "escape",
            Key::F1 => "f1",
            Key::F2 => "f2",
            Key::F3 => "f3",
            Key::F4 => "f4",
            Key::F5 => "f5",
            Key::F6 => "f6",
            Key::F7 => "f7",
            Key::F8 => "f8",
            Key::F9 => "f9",
            Key::F10 => "f10",
            Key::F11 => "f11",
            Key::F12 => "f12",
            Key::Grave => "grave",
        }
    }
}

impl FromStr for Key {
    type Err = Error;

    /// Parse a key name, ignoring case (`"F3"`, `"backspace"`, `"return"`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let key = match lower.as_str() {
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "home" => Key::Home,
            "end" => Key::End,
            "backspace" | "bs" => Key::Backspace,
            "enter" | "return" => Key::Enter,
            "tab" => Key::Tab,
            "escape" | "esc" => Key::Escape,
            "grave" | "`" | "~" => Key::Grave,
            other => other
                .strip_prefix('f')
                .and_then(|n| n.parse::<u8>().ok())
                .and_then(Key::function)
                .ok_or_else(|| Error::UnknownKey(s.to_string()))?,
        };
        Ok(key)
    }
}

impl TryFrom<String> for Key {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> String {
        key.name().to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One input event for the console
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A key went down
    KeyDown(Key),
    /// A key went up
    KeyUp(Key),
    /// A character was typed
    Char(char),
    /// A frame passed, with its duration in seconds
    FrameTick(f32),
    /// Mouse wheel movement; positive scrolls back into older output
    Scroll(i32),
}
