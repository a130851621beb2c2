use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::Instant;

/// Length of the RPS history ring.
pub const MAX_RPS_HISTORY: usize = 60;
const DEFAULT_WINDOW: Duration = Duration::from_secs(1);
const MS_PER_SEC: u64 = 1000;

/// Completion timestamps inside the trailing window.
#[derive(Debug)]
pub struct SlidingWindow {
    span: Duration,
    stamps: VecDeque<Instant>,
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl SlidingWindow {
    #[must_use]
    pub const fn new(span: Duration) -> Self {
        Self {
            span,
            stamps: VecDeque::new(),
        }
    }

    pub fn record(&mut self, at: Instant) {
        self.stamps.push_back(at);
    }

    /// Evicts stamps older than `now - span` and returns how many remain.
    pub fn count(&mut self, now: Instant) -> u64 {
        let span = self.span;
        while self
            .stamps
            .front()
            .is_some_and(|ts| now.saturating_duration_since(*ts) >= span)
        {
            self.stamps.pop_front();
        }
        u64::try_from(self.stamps.len()).unwrap_or(u64::MAX)
    }

    /// Events per second over the window.
    pub fn rate(&mut self, now: Instant) -> u64 {
        let count = self.count(now);
        let span_ms = u64::try_from(self.span.as_millis()).unwrap_or(u64::MAX);
        count
            .saturating_mul(MS_PER_SEC)
            .checked_div(span_ms)
            .unwrap_or(0)
    }
}

/// Fixed-capacity FIFO of RPS samples, oldest first.
#[derive(Debug)]
pub struct RpsHistory {
    capacity: usize,
    samples: VecDeque<u64>,
}

impl Default for RpsHistory {
    fn default() -> Self {
        Self::with_capacity(MAX_RPS_HISTORY)
    }
}

impl RpsHistory {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, rps: u64) {
        if self.capacity == 0 {
            return;
        }
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(rps);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<u64> {
        self.samples.iter().copied().collect()
    }

    #[must_use]
    pub fn peak(&self) -> u64 {
        self.samples.iter().copied().max().unwrap_or(0)
    }
}
