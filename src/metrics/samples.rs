use std::collections::VecDeque;
use std::time::Duration;

/// Number of successful latencies kept for percentile estimation.
pub const MAX_LATENCY_SAMPLES: usize = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Percentiles {
    pub p50: Duration,
    pub p90: Duration,
    pub p95: Duration,
    pub p99: Duration,
}

/// Rolling sample of the most recent successful latencies.
#[derive(Debug)]
pub struct LatencySamples {
    capacity: usize,
    values: VecDeque<Duration>,
}

impl Default for LatencySamples {
    fn default() -> Self {
        Self::with_capacity(MAX_LATENCY_SAMPLES)
    }
}

impl LatencySamples {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, latency: Duration) {
        if self.capacity == 0 {
            return;
        }
        while self.values.len() >= self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(latency);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn percentiles(&self) -> Percentiles {
        let mut sorted: Vec<Duration> = self.values.iter().copied().collect();
        sorted.sort_unstable();
        Percentiles {
            p50: percentile_of(&sorted, 50),
            p90: percentile_of(&sorted, 90),
            p95: percentile_of(&sorted, 95),
            p99: percentile_of(&sorted, 99),
        }
    }
}

/// `sorted[floor(p * n / 100)]`, clamped to the last element.
pub(crate) fn percentile_of(sorted: &[Duration], percentile: usize) -> Duration {
    let last = match sorted.len().checked_sub(1) {
        Some(last) => last,
        None => return Duration::ZERO,
    };
    let index = sorted
        .len()
        .saturating_mul(percentile)
        .checked_div(100)
        .unwrap_or(0)
        .min(last);
    sorted.get(index).copied().unwrap_or_default()
}
