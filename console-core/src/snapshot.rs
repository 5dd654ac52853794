//! Console snapshot for rendering and testing
//!
//! Provides a serializable, read-only view of what the console shows in a
//! frame. Renderers draw from it; tests compare against it.

use serde::{Deserialize, Serialize};

use crate::animation::AnimationState;

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Visibility state
    pub state: AnimationState,
    /// Fraction open, in [0, 1]
    pub percent: f32,
    /// Prompt text, with the cursor glyph drawn in when visible
    pub prompt: String,
    /// Cursor state
    pub cursor: SnapshotCursor,
    /// Output lines, newest first
    pub lines: Vec<String>,
    /// Lines scrolled back from the newest
    #[serde(default, skip_serializing_if = "is_zero")]
    pub scroll_offset: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotCursor {
    /// Codepoint index in the prompt
    pub index: usize,
    /// Byte offset in the prompt
    pub byte_offset: usize,
    /// Whether the glyph is drawn this frame
    pub visible: bool,
}

impl Snapshot {
    /// Convert snapshot to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse snapshot from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Lines shown from the bottom of the window up, starting after the prompt
    pub fn visible_lines(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .skip(self.scroll_offset)
            .map(String::as_str)
    }

    /// Plain text as it reads on screen: oldest output at the top, prompt last
    pub fn to_text(&self) -> String {
        let mut rows: Vec<&str> = self.visible_lines().collect();
        rows.reverse();
        rows.push(&self.prompt);
        rows.join("\n")
    }
}
