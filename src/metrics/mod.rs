//! Streaming metrics: per-exchange results and their aggregation.
pub mod aggregator;
mod error_log;
mod histogram;
mod samples;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use aggregator::{Aggregator, DerivedMetrics};
pub use error_log::{ErrorEntry, ErrorLog, MAX_ERRORS};
pub use histogram::LatencyHistogram;
pub use samples::{LatencySamples, MAX_LATENCY_SAMPLES, Percentiles};
pub use types::{ExchangeResult, MetricsSummary};
pub use window::{MAX_RPS_HISTORY, RpsHistory, SlidingWindow};
