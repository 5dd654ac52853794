//! Codepoint-aware text cursor
//!
//! The prompt is edited in UTF-8 but the user moves through it one codepoint
//! at a time. [`TextCursor`] keeps both views of the position in step so the
//! byte offset always sits on a codepoint boundary. Every piece of boundary
//! arithmetic in the crate goes through this module.

use serde::{Deserialize, Serialize};

/// Byte length of the codepoint that ends at `offset`, 0 at the start
pub fn prev_char_len(text: &str, offset: usize) -> usize {
    text[..offset].chars().next_back().map_or(0, char::len_utf8)
}

/// Byte length of the codepoint that starts at `offset`, 0 at the end
pub fn next_char_len(text: &str, offset: usize) -> usize {
    text[offset..].chars().next().map_or(0, char::len_utf8)
}

/// Longest prefix of `text` that fits in `max` bytes without splitting a codepoint
pub fn truncate_to_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Cursor position inside a line of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextCursor {
    /// Position in codepoints (0-indexed)
    pub index: usize,
    /// Position in bytes, always on a codepoint boundary
    pub byte_offset: usize,
}

impl TextCursor {
    /// Create a cursor at the start of the line
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cursor just past the last codepoint of `text`
    pub fn at_end(text: &str) -> Self {
        Self {
            index: text.chars().count(),
            byte_offset: text.len(),
        }
    }

    /// Move right over one codepoint; false if already at the end
    pub fn advance(&mut self, text: &str) -> bool {
        let len = next_char_len(text, self.byte_offset);
        if len == 0 {
            return false;
        }
        self.byte_offset += len;
        self.index += 1;
        true
    }

    /// Move left over one codepoint; false if already at the start
    pub fn retreat(&mut self, text: &str) -> bool {
        let len = prev_char_len(text, self.byte_offset);
        if len == 0 {
            return false;
        }
        self.byte_offset -= len;
        self.index -= 1;
        true
    }

    /// Step over a codepoint of `len` bytes that was just inserted at the cursor
    pub fn step_over_inserted(&mut self, len: usize) {
        self.byte_offset += len;
        self.index += 1;
    }

    /// Whether the cursor is at the start of the line
    pub fn is_at_start(&self) -> bool {
        self.index == 0
    }

    /// Check both coordinates describe the same boundary in `text`
    pub fn is_valid_for(&self, text: &str) -> bool {
        self.byte_offset <= text.len()
            && text.is_char_boundary(self.byte_offset)
            && text[..self.byte_offset].chars().count() == self.index
    }

    /// Move back to the start of the line
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_lens() {
        let s = "aé中😀";
        assert_eq!(next_char_len(s, 0), 1);
        assert_eq!(next_char_len(s, 1), 2);
        assert_eq!(next_char_len(s, 3), 3);
        assert_eq!(next_char_len(s, 6), 4);
        assert_eq!(next_char_len(s, 10), 0);
        assert_eq!(prev_char_len(s, 10), 4);
        assert_eq!(prev_char_len(s, 3), 2);
        assert_eq!(prev_char_len(s, 0), 0);
    }

    #[test]
    fn test_truncate_to_boundary() {
        assert_eq!(truncate_to_boundary("hello", 10), "hello");
        assert_eq!(truncate_to_boundary("hello", 3), "hel");
        // 'é' spans bytes 1..3; cutting at 2 must back off to 1
        assert_eq!(truncate_to_boundary("aé", 2), "a");
        assert_eq!(truncate_to_boundary("中", 2), "");
    }

    #[test]
    fn test_advance_and_retreat() {
        let s = "aé中";
        let mut cursor = TextCursor::new();
        assert!(cursor.advance(s));
        assert!(cursor.advance(s));
        assert_eq!(cursor, TextCursor { index: 2, byte_offset: 3 });
        assert!(cursor.advance(s));
        assert!(!cursor.advance(s));
        assert_eq!(cursor, TextCursor::at_end(s));

        assert!(cursor.retreat(s));
        assert_eq!(cursor, TextCursor { index: 2, byte_offset: 3 });
        cursor.reset();
        assert!(!cursor.retreat(s));
    }

    #[test]
    fn test_validity() {
        let s = "aé";
        assert!(TextCursor { index: 1, byte_offset: 1 }.is_valid_for(s));
        assert!(!TextCursor { index: 1, byte_offset: 2 }.is_valid_for(s));
        assert!(!TextCursor { index: 2, byte_offset: 1 }.is_valid_for(s));
        assert!(!TextCursor { index: 3, byte_offset: 4 }.is_valid_for(s));
    }
}
