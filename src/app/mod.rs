//! Wires one run together: terminal, lifecycle, worker pool, dashboard
//! loop, and the closing summary.
mod runner;
mod summary;


use std::time::Duration;

use crate::domain::TestStatus;
use crate::load::PoolReport;
use crate::metrics::MetricsSummary;

pub use runner::run;
pub(crate) use runner::{fail_setup, run_with_transport};
pub use summary::{print_summary, summary_lines};

/// How the run is presented. Independent of what is being tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Skip the terminal UI and log progress instead.
    pub headless: bool,
    pub no_color: bool,
    pub refresh: Duration,
    /// Keep the final screen until the user quits. Ignored when headless.
    pub linger: bool,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub summary: MetricsSummary,
    /// Terminal status the run ended in.
    pub status: TestStatus,
    pub pool: PoolReport,
    /// Reason recorded when the run ended in `Error`.
    pub failure: Option<String>,
}
