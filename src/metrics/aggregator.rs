//! Folds exchange results into the dashboard's live metrics.
//!
//! The aggregator is driven by the dashboard loop, which is the only reader
//! of the result bus. Absorption is gated by the lifecycle status: results
//! that arrive while the run is not `Running` are dropped.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::domain::{TestConfig, TestStatus};

use super::error_log::ErrorLog;
use super::histogram::LatencyHistogram;
use super::samples::{LatencySamples, Percentiles};
use super::types::{ExchangeResult, MetricsSummary};
use super::window::{RpsHistory, SlidingWindow};

const HISTORY_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);
const SUMMARY_TOP_ERRORS: usize = 5;
const PERCENT_X100: u64 = 10_000;
const MS_PER_SEC: u128 = 1000;

/// Values recomputed after each batch and tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivedMetrics {
    pub success_rate_x100: u64,
    pub error_rate_x100: u64,
    pub current_rps: u64,
    pub bytes_per_sec: u64,
    pub avg_latency: Duration,
    pub percentiles: Percentiles,
    pub elapsed: Duration,
    pub remaining: Duration,
    /// Completion ratio scaled to 0..=10_000.
    pub progress_x100: u64,
}

#[derive(Debug)]
pub struct Aggregator {
    config: Arc<TestConfig>,
    status: TestStatus,
    started_at: Instant,
    total: u64,
    successful: u64,
    failed: u64,
    total_bytes: u64,
    latency_sum_us: u128,
    min_latency: Option<Duration>,
    max_latency: Duration,
    samples: LatencySamples,
    histogram: Option<LatencyHistogram>,
    window: SlidingWindow,
    rps_history: RpsHistory,
    latency_history: RpsHistory,
    last_history_sample: Option<Instant>,
    status_codes: BTreeMap<u16, u64>,
    errors: ErrorLog,
    derived: DerivedMetrics,
}

impl Aggregator {
    #[must_use]
    pub fn new(config: Arc<TestConfig>, started_at: Instant) -> Self {
        let histogram = match LatencyHistogram::new() {
            Ok(histogram) => Some(histogram),
            Err(err) => {
                tracing::warn!("Failed to initialize latency histogram: {}", err);
                None
            }
        };
        Self {
            config,
            status: TestStatus::Running,
            started_at,
            total: 0,
            successful: 0,
            failed: 0,
            total_bytes: 0,
            latency_sum_us: 0,
            min_latency: None,
            max_latency: Duration::ZERO,
            samples: LatencySamples::default(),
            histogram,
            window: SlidingWindow::default(),
            rps_history: RpsHistory::default(),
            latency_history: RpsHistory::default(),
            last_history_sample: None,
            status_codes: BTreeMap::new(),
            errors: ErrorLog::default(),
            derived: DerivedMetrics::default(),
        }
    }

    /// Moves the absorption gate. Entering a terminal status takes one last
    /// snapshot at `now` so the summary covers the whole run.
    pub fn set_status(&mut self, status: TestStatus, now: Instant) {
        if status.is_terminal() && !self.status.is_terminal() {
            self.recompute(now);
        }
        self.status = status;
    }

    #[must_use]
    pub const fn status(&self) -> TestStatus {
        self.status
    }

    /// Folds one result in. Returns `false` when the result was dropped
    /// because the run is not `Running`.
    pub fn absorb(&mut self, result: &ExchangeResult, now: Instant) -> bool {
        if !self.fold(result) {
            return false;
        }
        self.recompute(now);
        true
    }

    /// Folds a batch and recomputes derived values once. Returns how many
    /// results were absorbed. An empty batch changes nothing.
    pub fn absorb_batch(&mut self, results: &[ExchangeResult], now: Instant) -> usize {
        if results.is_empty() {
            return 0;
        }
        let mut absorbed = 0usize;
        for result in results {
            if self.fold(result) {
                absorbed = absorbed.saturating_add(1);
            }
        }
        if absorbed > 0 {
            self.recompute(now);
        }
        absorbed
    }

    /// Refreshes time-based values and samples the RPS history. Frozen once
    /// the run has ended.
    pub fn tick(&mut self, now: Instant) {
        if self.status.is_terminal() {
            return;
        }
        self.recompute(now);
        let due = self
            .last_history_sample
            .is_none_or(|last| now.saturating_duration_since(last) >= HISTORY_SAMPLE_INTERVAL);
        if due {
            self.rps_history.push(self.derived.current_rps);
            let p50_ms =
                u64::try_from(self.derived.percentiles.p50.as_millis()).unwrap_or(u64::MAX);
            self.latency_history.push(p50_ms);
            self.last_history_sample = Some(now);
        }
    }

    fn fold(&mut self, result: &ExchangeResult) -> bool {
        if self.status != TestStatus::Running {
            return false;
        }

        self.total = self.total.saturating_add(1);
        self.total_bytes = self.total_bytes.saturating_add(result.bytes);
        self.window.record(result.completed_at());

        if let Some(code) = result.status {
            let count = self.status_codes.entry(code).or_insert(0);
            *count = count.saturating_add(1);
        }

        match result.error.as_deref() {
            Some(message) => {
                self.failed = self.failed.saturating_add(1);
                self.errors
                    .record(message, result.completed_at(), chrono::Local::now());
            }
            None => {
                self.successful = self.successful.saturating_add(1);
                self.record_latency(result.latency);
            }
        }
        true
    }

    fn record_latency(&mut self, latency: Duration) {
        self.latency_sum_us = self.latency_sum_us.saturating_add(latency.as_micros());
        self.min_latency = Some(self.min_latency.map_or(latency, |min| min.min(latency)));
        self.max_latency = self.max_latency.max(latency);
        self.samples.push(latency);
        if let Some(histogram) = self.histogram.as_mut() {
            histogram.record(latency);
        }
    }

    fn recompute(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.started_at);
        let duration = self.config.duration;
        let elapsed_ms = elapsed.as_millis();

        self.derived = DerivedMetrics {
            success_rate_x100: ratio_x100(self.successful, self.total),
            error_rate_x100: ratio_x100(self.failed, self.total),
            current_rps: self.window.rate(now),
            bytes_per_sec: per_second(u128::from(self.total_bytes), elapsed_ms),
            avg_latency: self.avg_latency(),
            percentiles: self.samples.percentiles(),
            elapsed,
            remaining: duration.saturating_sub(elapsed),
            progress_x100: progress_x100(elapsed, duration),
        };
    }

    fn avg_latency(&self) -> Duration {
        let avg_us = self
            .latency_sum_us
            .checked_div(u128::from(self.successful))
            .unwrap_or(0);
        Duration::from_micros(u64::try_from(avg_us).unwrap_or(u64::MAX))
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub const fn successful(&self) -> u64 {
        self.successful
    }

    #[must_use]
    pub const fn failed(&self) -> u64 {
        self.failed
    }

    #[must_use]
    pub const fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    #[must_use]
    pub fn min_latency(&self) -> Duration {
        self.min_latency.unwrap_or_default()
    }

    #[must_use]
    pub const fn max_latency(&self) -> Duration {
        self.max_latency
    }

    #[must_use]
    pub const fn derived(&self) -> &DerivedMetrics {
        &self.derived
    }

    #[must_use]
    pub const fn rps_history(&self) -> &RpsHistory {
        &self.rps_history
    }

    /// Rolling p50 latency in milliseconds, sampled with the RPS history.
    #[must_use]
    pub const fn latency_history(&self) -> &RpsHistory {
        &self.latency_history
    }

    #[must_use]
    pub const fn status_codes(&self) -> &BTreeMap<u16, u64> {
        &self.status_codes
    }

    #[must_use]
    pub const fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    #[must_use]
    pub fn config(&self) -> &TestConfig {
        &self.config
    }

    #[must_use]
    pub fn summary(&self) -> MetricsSummary {
        let (p50_ms, p90_ms, p99_ms) = self
            .histogram
            .as_ref()
            .map_or((0, 0, 0), LatencyHistogram::percentiles);
        let elapsed_ms = self.derived.elapsed.as_millis();
        let avg_rps_x100 = per_second(u128::from(self.total).saturating_mul(100), elapsed_ms);

        let mut status_codes: Vec<(u16, u64)> =
            self.status_codes.iter().map(|(code, count)| (*code, *count)).collect();
        status_codes.sort_by(|left, right| right.1.cmp(&left.1).then(left.0.cmp(&right.0)));

        MetricsSummary {
            status: self.status,
            duration: self.derived.elapsed,
            total_requests: self.total,
            successful_requests: self.successful,
            failed_requests: self.failed,
            success_rate_x100: ratio_x100(self.successful, self.total),
            avg_rps_x100,
            min_latency: self.min_latency(),
            avg_latency: self.avg_latency(),
            max_latency: self.max_latency,
            p50_ms,
            p90_ms,
            p99_ms,
            total_bytes: self.total_bytes,
            status_codes,
            top_errors: self.errors.top(SUMMARY_TOP_ERRORS),
        }
    }
}

/// `part / whole` as a percentage scaled by 100.
pub(crate) fn ratio_x100(part: u64, whole: u64) -> u64 {
    u128::from(part)
        .saturating_mul(u128::from(PERCENT_X100))
        .checked_div(u128::from(whole))
        .and_then(|value| u64::try_from(value).ok())
        .unwrap_or(0)
}

fn per_second(amount: u128, elapsed_ms: u128) -> u64 {
    amount
        .saturating_mul(MS_PER_SEC)
        .checked_div(elapsed_ms)
        .and_then(|value| u64::try_from(value).ok())
        .unwrap_or(0)
}

fn progress_x100(elapsed: Duration, duration: Duration) -> u64 {
    let scaled = elapsed
        .as_millis()
        .saturating_mul(u128::from(PERCENT_X100))
        .checked_div(duration.as_millis())
        .unwrap_or(u128::from(PERCENT_X100));
    u64::try_from(scaled)
        .unwrap_or(PERCENT_X100)
        .min(PERCENT_X100)
}
