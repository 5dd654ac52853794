//! Editable prompt line
//!
//! The line buffer is the one line the user types into. It owns the prompt
//! [`Line`] and a [`TextCursor`]; every edit keeps the cursor on a codepoint
//! boundary.

use crate::error::Result;
use crate::line::Line;
use crate::text::{next_char_len, TextCursor};

/// The prompt line with its editing cursor
#[derive(Debug, Clone)]
pub struct LineBuffer {
    /// Authoritative prompt content
    line: Line,
    /// Cursor into `line`
    cursor: TextCursor,
}

impl LineBuffer {
    /// Create an empty buffer holding at most `capacity` bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            line: Line::new(capacity),
            cursor: TextCursor::new(),
        }
    }

    /// Get the prompt line
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Get the prompt content
    pub fn as_str(&self) -> &str {
        self.line.as_str()
    }

    /// Get the cursor
    pub fn cursor(&self) -> TextCursor {
        self.cursor
    }

    /// Check if the prompt is empty
    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// Insert a codepoint at the cursor and move past it
    ///
    /// Fails with `CapacityExceeded` when the line is full; the content is
    /// left as it was.
    pub fn insert(&mut self, ch: char) -> Result<()> {
        let len = self.line.insert(self.cursor.byte_offset, ch)?;
        self.cursor.step_over_inserted(len);
        Ok(())
    }

    /// Delete the codepoint before the cursor
    ///
    /// Returns false if the cursor is at the start of the line.
    pub fn delete_before_cursor(&mut self) -> bool {
        if self.cursor.is_at_start() {
            return false;
        }
        let offset = self.cursor.byte_offset;
        self.cursor.retreat(self.line.as_str());
        self.line.remove_before(offset).is_some()
    }

    /// Move the cursor one codepoint left
    pub fn move_left(&mut self) -> bool {
        self.cursor.retreat(self.line.as_str())
    }

    /// Move the cursor one codepoint right
    pub fn move_right(&mut self) -> bool {
        self.cursor.advance(self.line.as_str())
    }

    /// Move the cursor to the start of the line
    pub fn move_home(&mut self) {
        self.cursor.reset();
    }

    /// Move the cursor past the last codepoint
    pub fn move_end(&mut self) {
        self.cursor = TextCursor::at_end(self.line.as_str());
    }

    /// Replace the content and put the cursor at the end
    pub fn set_text(&mut self, text: &str) {
        self.line.set_text(text);
        self.move_end();
    }

    /// Clear the content and the cursor
    pub fn reset(&mut self) {
        self.line.clear();
        self.cursor.reset();
    }

    /// Copy of the prompt with `glyph` drawn over the cursor position
    ///
    /// The codepoint under the cursor is replaced; at end of line the glyph
    /// is appended. The buffer itself is not modified.
    pub fn render_with_cursor(&self, glyph: char) -> String {
        let text = self.line.as_str();
        let offset = self.cursor.byte_offset;
        let under = next_char_len(text, offset);

        let mut shown = String::with_capacity(text.len() + glyph.len_utf8());
        shown.push_str(&text[..offset]);
        shown.push(glyph);
        shown.push_str(&text[offset + under..]);
        shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn typed(text: &str) -> LineBuffer {
        let mut buf = LineBuffer::new(64);
        for c in text.chars() {
            buf.insert(c).unwrap();
        }
        buf
    }

    #[test]
    fn test_insert_advances_cursor() {
        let buf = typed("aé中");
        assert_eq!(buf.as_str(), "aé中");
        assert_eq!(buf.cursor(), TextCursor { index: 3, byte_offset: 6 });
    }

    #[test]
    fn test_insert_in_middle() {
        let mut buf = typed("ac");
        buf.move_left();
        buf.insert('b').unwrap();
        assert_eq!(buf.as_str(), "abc");
        assert_eq!(buf.cursor().index, 2);
    }

    #[test]
    fn test_insert_at_capacity_is_rejected() {
        let mut buf = LineBuffer::new(2);
        buf.insert('a').unwrap();
        assert_eq!(buf.insert('é'), Err(Error::CapacityExceeded { capacity: 2 }));
        assert_eq!(buf.as_str(), "a");
        assert_eq!(buf.cursor().index, 1);
    }

    #[test]
    fn test_delete_before_cursor() {
        let mut buf = typed("aé中");
        assert!(buf.delete_before_cursor());
        assert_eq!(buf.as_str(), "aé");
        buf.move_left();
        assert!(buf.delete_before_cursor());
        assert_eq!(buf.as_str(), "é");
        assert_eq!(buf.cursor(), TextCursor::new());
        assert!(!buf.delete_before_cursor());
        assert_eq!(buf.as_str(), "é");
    }

    #[test]
    fn test_movement_is_clamped() {
        let mut buf = typed("ab");
        assert!(!buf.move_right());
        assert!(buf.move_left());
        assert!(buf.move_left());
        assert!(!buf.move_left());
        assert_eq!(buf.cursor().index, 0);
        buf.move_end();
        assert_eq!(buf.cursor(), TextCursor { index: 2, byte_offset: 2 });
        buf.move_home();
        assert_eq!(buf.cursor(), TextCursor::new());
    }

    #[test]
    fn test_set_text_moves_cursor_to_end() {
        let mut buf = typed("xyz");
        buf.move_home();
        buf.set_text("日本");
        assert_eq!(buf.cursor(), TextCursor { index: 2, byte_offset: 6 });
    }

    #[test]
    fn test_reset() {
        let mut buf = typed("abc");
        buf.reset();
        assert!(buf.is_empty());
        assert_eq!(buf.cursor(), TextCursor::new());
    }

    #[test]
    fn test_render_with_cursor() {
        let mut buf = typed("aé中");
        assert_eq!(buf.render_with_cursor('_'), "aé中_");
        buf.move_left();
        assert_eq!(buf.render_with_cursor('_'), "aé_");
        buf.move_home();
        assert_eq!(buf.render_with_cursor('_'), "_é中");
        // The authoritative content is untouched
        assert_eq!(buf.as_str(), "aé中");
    }
}
