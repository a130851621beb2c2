use std::time::Duration;

use tokio::time::Instant;

use crate::domain::TestStatus;

/// Outcome of one request/response exchange. Exactly one of `status` and
/// `error` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeResult {
    pub dispatched_at: Instant,
    pub latency: Duration,
    pub status: Option<u16>,
    pub bytes: u64,
    pub error: Option<String>,
}

impl ExchangeResult {
    #[must_use]
    pub const fn success(dispatched_at: Instant, latency: Duration, status: u16, bytes: u64) -> Self {
        Self {
            dispatched_at,
            latency,
            status: Some(status),
            bytes,
            error: None,
        }
    }

    #[must_use]
    pub fn failure(dispatched_at: Instant, latency: Duration, error: impl Into<String>) -> Self {
        Self {
            dispatched_at,
            latency,
            status: None,
            bytes: 0,
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Instant the exchange completed.
    #[must_use]
    pub fn completed_at(&self) -> Instant {
        self.dispatched_at
            .checked_add(self.latency)
            .unwrap_or(self.dispatched_at)
    }
}

/// Frozen view of a run, used for the closing summary.
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub status: TestStatus,
    pub duration: Duration,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub success_rate_x100: u64,
    pub avg_rps_x100: u64,
    pub min_latency: Duration,
    pub avg_latency: Duration,
    pub max_latency: Duration,
    /// Whole-run histogram percentiles in milliseconds.
    pub p50_ms: u64,
    pub p90_ms: u64,
    pub p99_ms: u64,
    pub total_bytes: u64,
    pub status_codes: Vec<(u16, u64)>,
    pub top_errors: Vec<(String, u64)>,
}
