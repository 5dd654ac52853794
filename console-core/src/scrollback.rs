//! Scrollback buffer implementation
//!
//! The scrollback stores the console's output lines, most recent first. It
//! is a ring with a fixed number of lines; writing past that evicts the
//! oldest line. Writes never fail: text longer than a line is truncated on a
//! codepoint boundary.

use std::fmt::{self, Write as _};

use crate::error::Error;
use crate::line::Line;
use crate::ring::{Ring, RingIter};
use crate::text::truncate_to_boundary;

/// Ring buffer of output lines
#[derive(Debug, Clone)]
pub struct Scrollback {
    /// Output lines, index 0 = most recent
    lines: Ring<Line>,
    /// Byte capacity of each line
    line_capacity: usize,
    /// Lines ever written, including evicted and cleared ones
    written: u64,
}

impl Scrollback {
    /// Create a scrollback holding `capacity` lines of `line_capacity` bytes
    pub fn new(capacity: usize, line_capacity: usize) -> Self {
        Self {
            lines: Ring::new(capacity),
            line_capacity,
            written: 0,
        }
    }

    /// Get the number of lines in the scrollback
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the scrollback is empty
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Maximum number of lines
    pub fn capacity(&self) -> usize {
        self.lines.capacity()
    }

    /// Byte capacity of each line
    pub fn line_capacity(&self) -> usize {
        self.line_capacity
    }

    /// Write a line of plain text
    pub fn write_line(&mut self, text: &str) {
        let line = Line::from_text(text, self.line_capacity);
        if line.len() < text.len() {
            log::debug!(
                "{}",
                Error::FormatOverflow {
                    capacity: self.line_capacity
                }
            );
        }
        self.push(line);
    }

    /// Write a formatted line
    ///
    /// This is what `write!(scrollback, ...)` calls.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
        let (line, overflow) = format_line(args, self.line_capacity);
        if let Some(err) = overflow {
            log::debug!("{}", err);
        }
        self.push(line);
    }

    /// Insert an existing line at the front
    pub fn push(&mut self, line: Line) {
        self.written += 1;
        self.lines.push_front(line);
    }

    /// Number of lines ever written
    ///
    /// Keeps counting through eviction and `clear`, so the difference of two
    /// readings is how many lines were written in between.
    pub fn total_written(&self) -> u64 {
        self.written
    }

    /// Get a line by age (0 = most recent)
    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Remove every line
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Iterate from most recent to oldest
    pub fn iter(&self) -> RingIter<'_, Line> {
        self.lines.iter()
    }
}

/// Render `args` into a line of at most `capacity` bytes
///
/// Returns the (possibly truncated) line, plus `FormatOverflow` if the
/// output did not fit.
pub fn format_line(args: fmt::Arguments<'_>, capacity: usize) -> (Line, Option<Error>) {
    let mut writer = BoundedWriter {
        buf: String::new(),
        capacity,
        overflowed: false,
    };

    if writer.write_fmt(args).is_err() && !writer.overflowed {
        log::warn!("formatting a console line failed; keeping partial output");
    }

    let overflow = writer
        .overflowed
        .then_some(Error::FormatOverflow { capacity });
    (Line::from_text(&writer.buf, capacity), overflow)
}

/// `fmt::Write` sink that stops at a byte capacity
struct BoundedWriter {
    buf: String,
    capacity: usize,
    overflowed: bool,
}

impl fmt::Write for BoundedWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.capacity - self.buf.len();
        let kept = truncate_to_boundary(s, room);
        self.buf.push_str(kept);
        if kept.len() < s.len() {
            self.overflowed = true;
            // Stop formatting; nothing more can be kept
            return Err(fmt::Error);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(sb: &Scrollback) -> Vec<&str> {
        sb.iter().map(Line::as_str).collect()
    }

    #[test]
    fn test_write_line_most_recent_first() {
        let mut sb = Scrollback::new(5, 32);
        sb.write_line("one");
        sb.write_line("two");
        assert_eq!(texts(&sb), vec!["two", "one"]);
        assert_eq!(sb.get(0).unwrap().as_str(), "two");
    }

    #[test]
    fn test_write_fmt() {
        let mut sb = Scrollback::new(5, 32);
        write!(sb, "{}: {}", "exit", 3);
        assert_eq!(sb.get(0).unwrap().as_str(), "exit: 3");
    }

    #[test]
    fn test_write_line_truncates() {
        let mut sb = Scrollback::new(5, 4);
        sb.write_line("abcdef");
        sb.write_line("abcé");
        assert_eq!(texts(&sb), vec!["abc", "abcd"]);
    }

    #[test]
    fn test_format_line_reports_overflow() {
        let (line, overflow) = format_line(format_args!("{}-{}", "long", "text"), 6);
        assert_eq!(line.as_str(), "long-t");
        assert_eq!(overflow, Some(Error::FormatOverflow { capacity: 6 }));

        let (line, overflow) = format_line(format_args!("{}", 42), 6);
        assert_eq!(line.as_str(), "42");
        assert_eq!(overflow, None);
    }

    #[test]
    fn test_format_line_never_splits_codepoints() {
        let (line, overflow) = format_line(format_args!("{}", "日本語"), 7);
        assert_eq!(line.as_str(), "日本");
        assert!(overflow.is_some());
    }

    #[test]
    fn test_ring_eviction() {
        let mut sb = Scrollback::new(3, 8);
        for i in 0..4 {
            write!(sb, "line {}", i);
        }
        assert_eq!(sb.len(), 3);
        assert_eq!(texts(&sb), vec!["line 3", "line 2", "line 1"]);
    }

    #[test]
    fn test_clear() {
        let mut sb = Scrollback::new(3, 8);
        sb.write_line("x");
        sb.clear();
        assert!(sb.is_empty());
        assert_eq!(sb.total_written(), 1);
    }

    #[test]
    fn test_total_written_counts_evicted() {
        let mut sb = Scrollback::new(2, 8);
        for _ in 0..5 {
            sb.write_line("x");
        }
        assert_eq!(sb.len(), 2);
        assert_eq!(sb.total_written(), 5);
    }

    #[test]
    fn test_zero_capacity() {
        let mut sb = Scrollback::new(0, 8);
        sb.write_line("dropped");
        assert!(sb.is_empty());
    }
}
