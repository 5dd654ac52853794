//! Console line representation
//!
//! A line is a run of UTF-8 text with a fixed byte capacity. Scrollback
//! entries, history entries and the prompt all share this type. Content is
//! valid UTF-8 at all times and never exceeds the capacity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::text::{prev_char_len, truncate_to_boundary};

/// A bounded line of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Line content
    text: String,
    /// Maximum content length in bytes
    capacity: usize,
}

impl Line {
    /// Create an empty line holding at most `capacity` bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            // Lines are usually short; grow on demand
            text: String::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Create a line from `text`, truncated to `capacity` on a codepoint boundary
    pub fn from_text(text: &str, capacity: usize) -> Self {
        let mut line = Self::new(capacity);
        line.set_text(text);
        line
    }

    /// Replace the content, truncating if needed
    ///
    /// Returns true if the text had to be truncated.
    pub fn set_text(&mut self, text: &str) -> bool {
        let kept = truncate_to_boundary(text, self.capacity);
        self.text.clear();
        self.text.push_str(kept);
        kept.len() < text.len()
    }

    /// Get the content
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Content length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the line has no content
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Maximum content length in bytes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Content length in codepoints
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Insert `ch` at `byte_offset`, shifting the tail right
    ///
    /// Returns the encoded length of `ch`. Fails without touching the content
    /// if the line would grow past its capacity.
    ///
    /// # Panics
    ///
    /// Panics if `byte_offset` is not a codepoint boundary.
    pub fn insert(&mut self, byte_offset: usize, ch: char) -> Result<usize> {
        let len = ch.len_utf8();
        if self.text.len() + len > self.capacity {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.text.insert(byte_offset, ch);
        Ok(len)
    }

    /// Remove the codepoint that ends at `byte_offset`
    pub fn remove_before(&mut self, byte_offset: usize) -> Option<char> {
        let len = prev_char_len(&self.text, byte_offset);
        if len == 0 {
            return None;
        }
        Some(self.text.remove(byte_offset - len))
    }

    /// Clear the content
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Deep-copy this line's content into `other`
    ///
    /// `other` keeps its own capacity; content that does not fit is
    /// truncated on a codepoint boundary.
    pub fn clone_into(&self, other: &mut Line) {
        other.set_text(&self.text);
    }

    /// Compare content only, ignoring capacity
    pub fn same_text(&self, other: &Line) -> bool {
        self.text == other.text
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Line {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_new() {
        let line = Line::new(16);
        assert!(line.is_empty());
        assert_eq!(line.capacity(), 16);
        assert_eq!(line.as_str(), "");
    }

    #[test]
    fn test_from_text_truncates_on_boundary() {
        let line = Line::from_text("abcé", 4);
        assert_eq!(line.as_str(), "abc");
        let line = Line::from_text("abcé", 5);
        assert_eq!(line.as_str(), "abcé");
    }

    #[test]
    fn test_set_text_reports_truncation() {
        let mut line = Line::new(3);
        assert!(!line.set_text("abc"));
        assert!(line.set_text("abcd"));
        assert_eq!(line.as_str(), "abc");
    }

    #[test]
    fn test_insert_shifts_tail() {
        let mut line = Line::from_text("ac", 8);
        assert_eq!(line.insert(1, 'b').unwrap(), 1);
        assert_eq!(line.as_str(), "abc");
        assert_eq!(line.insert(3, '中').unwrap(), 3);
        assert_eq!(line.as_str(), "abc中");
    }

    #[test]
    fn test_insert_respects_capacity() {
        let mut line = Line::from_text("abc", 4);
        assert_eq!(
            line.insert(3, 'é'),
            Err(Error::CapacityExceeded { capacity: 4 })
        );
        assert_eq!(line.as_str(), "abc");
        assert!(line.insert(3, 'd').is_ok());
        assert!(line.insert(0, 'x').is_err());
        assert_eq!(line.len(), 4);
    }

    #[test]
    fn test_remove_before() {
        let mut line = Line::from_text("aé中", 16);
        assert_eq!(line.remove_before(3), Some('é'));
        assert_eq!(line.as_str(), "a中");
        assert_eq!(line.remove_before(0), None);
    }

    #[test]
    fn test_clone_into() {
        let source = Line::from_text("hello", 16);
        let mut small = Line::new(3);
        source.clone_into(&mut small);
        assert_eq!(small.as_str(), "hel");
        assert_eq!(small.capacity(), 3);

        let mut big = Line::from_text("old", 32);
        source.clone_into(&mut big);
        assert!(big.same_text(&source));
    }

    #[test]
    fn test_char_count() {
        assert_eq!(Line::from_text("aé😀", 16).char_count(), 3);
    }
}
