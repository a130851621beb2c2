use std::time::Duration;

use rand::Rng;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Lowest pace a worker runs at, so no worker is starved by integer division.
pub const MIN_PER_WORKER_RATE: u64 = 1;
const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Per-worker pacing derived from the global rate and worker count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePlan {
    pub per_worker_rate: u64,
    pub interval: Duration,
}

impl RatePlan {
    /// `rate / concurrency`, floored at [`MIN_PER_WORKER_RATE`].
    #[must_use]
    pub fn new(rate: u64, concurrency: usize) -> Self {
        let workers = u64::try_from(concurrency).unwrap_or(u64::MAX);
        let per_worker_rate = rate
            .checked_div(workers)
            .unwrap_or(0)
            .max(MIN_PER_WORKER_RATE);
        let interval_nanos = NANOS_PER_SEC
            .checked_div(per_worker_rate)
            .unwrap_or(NANOS_PER_SEC)
            .max(1);
        Self {
            per_worker_rate,
            interval: Duration::from_nanos(interval_nanos),
        }
    }

    /// Effective aggregate rate once the per-worker floor is applied.
    #[must_use]
    pub fn effective_rate(&self, concurrency: usize) -> u64 {
        self.per_worker_rate
            .saturating_mul(u64::try_from(concurrency).unwrap_or(u64::MAX))
    }

    /// Random offset in `[0, interval)` for a worker's first tick.
    pub fn phase<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let nanos = u64::try_from(self.interval.as_nanos()).unwrap_or(u64::MAX);
        if nanos == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos(rng.gen_range(0..nanos))
    }

    /// Ticker starting after `phase`. Missed ticks are skipped, never bunched.
    #[must_use]
    pub fn ticker(&self, phase: Duration) -> Interval {
        let start = Instant::now()
            .checked_add(phase)
            .unwrap_or_else(Instant::now);
        let mut ticker = interval_at(start, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker
    }
}
