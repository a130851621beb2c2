use std::time::Duration;

use hdrhistogram::{CreationError, Histogram};

/// One hour, in microseconds. Longer exchanges are clamped.
const HIGHEST_TRACKABLE_US: u64 = 3_600_000_000;
const SIGNIFICANT_DIGITS: u8 = 3;
const US_PER_MS: u64 = 1_000;

/// Whole-run latency distribution, recorded in microseconds and read back
/// in milliseconds for the closing summary. Unlike the rolling sample
/// buffer it never forgets.
#[derive(Debug)]
pub struct LatencyHistogram {
    hist: Histogram<u64>,
}

impl LatencyHistogram {
    /// # Errors
    ///
    /// Returns an error if the histogram bounds are rejected.
    pub fn new() -> Result<Self, CreationError> {
        let hist =
            Histogram::<u64>::new_with_bounds(1, HIGHEST_TRACKABLE_US, SIGNIFICANT_DIGITS)?;
        Ok(Self { hist })
    }

    pub fn record(&mut self, latency: Duration) {
        let micros = u64::try_from(latency.as_micros())
            .unwrap_or(u64::MAX)
            .clamp(1, HIGHEST_TRACKABLE_US);
        self.hist.saturating_record(micros);
    }

    /// p50, p90 and p99 in milliseconds, or zeros when empty.
    #[must_use]
    pub fn percentiles(&self) -> (u64, u64, u64) {
        if self.count() == 0 {
            return (0, 0, 0);
        }
        let at = |quantile| {
            self.hist
                .value_at_quantile(quantile)
                .checked_div(US_PER_MS)
                .unwrap_or(0)
        };
        (at(0.5), at(0.9), at(0.99))
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.hist.len()
    }
}
