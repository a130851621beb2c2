use std::collections::VecDeque;

use chrono::{DateTime, Local};
use tokio::time::Instant;

/// Capacity of the deduplicated error log.
pub const MAX_ERRORS: usize = 100;

#[derive(Debug, Clone)]
pub struct ErrorEntry {
    pub message: String,
    pub count: u64,
    pub last_seen: Instant,
    pub last_seen_wall: DateTime<Local>,
}

/// Distinct error messages with occurrence counts. When full, the entry
/// inserted first is evicted.
#[derive(Debug)]
pub struct ErrorLog {
    capacity: usize,
    entries: VecDeque<ErrorEntry>,
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::with_capacity(MAX_ERRORS)
    }
}

impl ErrorLog {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
        }
    }

    pub fn record(&mut self, message: &str, now: Instant, wall: DateTime<Local>) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.message == message) {
            entry.count = entry.count.saturating_add(1);
            entry.last_seen = now;
            entry.last_seen_wall = wall;
            return;
        }
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(ErrorEntry {
            message: message.to_owned(),
            count: 1,
            last_seen: now,
            last_seen_wall: wall,
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorEntry> {
        self.entries.iter()
    }

    /// Entries ordered by count, highest first.
    #[must_use]
    pub fn top(&self, limit: usize) -> Vec<(String, u64)> {
        let mut ranked: Vec<(String, u64)> = self
            .entries
            .iter()
            .map(|entry| (entry.message.clone(), entry.count))
            .collect();
        ranked.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));
        ranked.truncate(limit);
        ranked
    }
}
