//! Command history
//!
//! Submitted lines are kept most recent first in a fixed-size ring. The
//! browse position walks the ring: 0 means the user is editing a fresh
//! line, 1 is the most recent entry, and larger values go further back.

use crate::line::Line;
use crate::ring::{Ring, RingIter};

/// Bounded history of submitted lines with a browse cursor
#[derive(Debug, Clone)]
pub struct History {
    /// Submitted lines, index 0 = most recent
    entries: Ring<Line>,
    /// Browse position (0 = not browsing)
    browse: usize,
    /// The line being edited when browsing started
    draft: String,
}

impl History {
    /// Create a history holding at most `capacity` lines
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Ring::new(capacity),
            browse: 0,
            draft: String::new(),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Current browse position
    pub fn browse_index(&self) -> usize {
        self.browse
    }

    /// Record a submitted line
    ///
    /// A repeat of the most recent entry is skipped. Returns true if the
    /// line was stored.
    pub fn record(&mut self, line: &Line) -> bool {
        if self.entries.front().is_some_and(|front| front.same_text(line)) {
            return false;
        }
        self.entries.push_front(line.clone());
        true
    }

    /// Step to an older entry
    ///
    /// `current` is the prompt content, saved as the draft when browsing
    /// starts. The position is clamped to the oldest entry. Returns the text
    /// to show, or `None` when there is no history.
    pub fn older(&mut self, current: &str) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        if self.browse == 0 {
            self.draft.clear();
            self.draft.push_str(current);
        }
        if self.browse < self.entries.len() {
            self.browse += 1;
        }
        Some(self.selected())
    }

    /// Step to a newer entry
    ///
    /// Stepping back to position 0 returns the saved draft. Returns `None`
    /// when not browsing.
    pub fn newer(&mut self) -> Option<&str> {
        if self.browse == 0 {
            return None;
        }
        self.browse -= 1;
        Some(self.selected())
    }

    /// Stop browsing and forget the draft
    pub fn reset_browse(&mut self) {
        self.browse = 0;
        self.draft.clear();
    }

    /// Get an entry by age (0 = most recent)
    pub fn get(&self, index: usize) -> Option<&Line> {
        self.entries.get(index)
    }

    /// Iterate from most recent to oldest
    pub fn iter(&self) -> RingIter<'_, Line> {
        self.entries.iter()
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.reset_browse();
    }

    fn selected(&self) -> &str {
        match self.browse {
            0 => &self.draft,
            n => self.entries.get(n - 1).map_or("", Line::as_str),
        }
    }
}
