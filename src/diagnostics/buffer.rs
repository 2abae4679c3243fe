// SPDX-License-Identifier: MPL-2.0
//! Bounded event log.

use std::collections::VecDeque;

pub use crate::domain::diagnostics::EventCapacity;

/// A ring buffer that evicts its oldest entry when full.
///
/// ```
/// use playsync::diagnostics::EventLog;
///
/// let mut log = EventLog::with_raw_capacity(2);
/// log.push("a");
/// log.push("b");
/// log.push("c");
///
/// let items: Vec<_> = log.iter().copied().collect();
/// assert_eq!(items, vec!["b", "c"]);
/// ```
#[derive(Debug, Clone)]
pub struct EventLog<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> EventLog<T> {
    #[must_use]
    pub fn new(capacity: EventCapacity) -> Self {
        Self::with_raw_capacity(capacity.value())
    }

    /// Creates a log with an unchecked capacity (at least 1).
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(item);
    }

    /// Iterates oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_when_full() {
        let mut log = EventLog::with_raw_capacity(3);
        for i in 0..5 {
            log.push(i);
        }
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut log = EventLog::with_raw_capacity(0);
        log.push('x');
        log.push('y');
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec!['y']);
    }

    #[test]
    fn capacity_comes_from_newtype() {
        let log: EventLog<u8> = EventLog::new(EventCapacity::default());
        assert_eq!(log.capacity(), 1_000);
        assert!(log.is_empty());
    }

    #[test]
    fn clear_empties_log() {
        let mut log = EventLog::with_raw_capacity(4);
        log.push(1);
        log.clear();
        assert!(log.is_empty());
    }
}
