//! Bounded event log.
//!
//! A fixed-capacity ring of timestamped entries, newest first. Pushing
//! into a full log evicts the oldest entry in O(1).

use chrono::Local;
use std::collections::VecDeque;

/// Default number of entries retained.
pub const DEFAULT_CAPACITY: usize = 50;

/// Fixed-capacity log of recent events, newest first.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl EventLog {
    /// Create a log retaining at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Timestamp `message` and push it to the front, evicting the
    /// oldest entry when full.
    pub fn push(&mut self, message: &str) {
        let entry = format!("[{}] {message}", Local::now().format("%Y-%m-%d %H:%M:%S"));
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(entry);
    }

    /// Entries newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}
