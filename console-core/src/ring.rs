//! Most-recent-first ring buffer
//!
//! Fixed-capacity storage shared by the scrollback and the history. Slots
//! are allocated as the ring fills and then reused: inserting at the front
//! overwrites the oldest slot in O(1) instead of shifting every entry.

/// Fixed-capacity ring, index 0 = most recent
#[derive(Debug, Clone)]
pub struct Ring<T> {
    /// Slot arena, grows up to `capacity` and is then reused
    slots: Vec<T>,
    /// Slot holding the most recent entry
    head: usize,
    /// Maximum number of entries
    capacity: usize,
}

impl<T> Ring<T> {
    /// Create an empty ring holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            // Don't pre-allocate too much
            slots: Vec::with_capacity(capacity.min(256)),
            head: 0,
            capacity,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the ring is empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check if the next push will evict an entry
    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.slots.len() == self.capacity
    }

    /// Insert at the front, returning the evicted oldest entry when full
    ///
    /// A zero-capacity ring stores nothing and hands the entry straight back.
    pub fn push_front(&mut self, item: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(item);
        }

        if self.slots.len() < self.capacity {
            self.slots.push(item);
            self.head = self.slots.len() - 1;
            None
        } else {
            // The slot after the newest holds the oldest entry
            self.head = (self.head + 1) % self.capacity;
            Some(std::mem::replace(&mut self.slots[self.head], item))
        }
    }

    /// Get an entry by age (0 = most recent)
    pub fn get(&self, index: usize) -> Option<&T> {
        let len = self.slots.len();
        if index >= len {
            return None;
        }
        self.slots.get((self.head + len - index) % len)
    }

    /// Get the most recent entry
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = 0;
    }

    /// Iterate from most recent to oldest
    pub fn iter(&self) -> RingIter<'_, T> {
        RingIter {
            ring: self,
            index: 0,
        }
    }
}

/// Iterator over ring entries, most recent first
pub struct RingIter<'a, T> {
    ring: &'a Ring<T>,
    index: usize,
}

impl<'a, T> Iterator for RingIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.ring.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ring.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for RingIter<'_, T> {}

impl<'a, T> IntoIterator for &'a Ring<T> {
    type Item = &'a T;
    type IntoIter = RingIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The ring always holds the newest `capacity` pushes, newest first.
        #[test]
        fn ring_matches_model(capacity in 0usize..12, pushes in 0usize..40) {
            let mut ring = Ring::new(capacity);
            for i in 0..pushes {
                ring.push_front(i);
            }
            let expected: Vec<usize> = (0..pushes).rev().take(capacity).collect();
            prop_assert_eq!(ring.iter().copied().collect::<Vec<_>>(), expected);
            prop_assert!(ring.len() <= capacity);
        }
    }
}
