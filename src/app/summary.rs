use crate::load::PoolReport;
use crate::metrics::MetricsSummary;
use crate::ui::render::formatting::{format_bytes_compact, format_latency, format_percent_x100};

use super::RunOutcome;

/// Errors listed under the summary.
const SUMMARY_TOP_ERRORS: usize = 5;

/// Closing report, one line per entry.
#[must_use]
pub fn summary_lines(summary: &MetricsSummary, pool: &PoolReport) -> Vec<String> {
    let mut lines = vec![
        format!("Status: {}", summary.status),
        format!("Duration: {}s", summary.duration.as_secs()),
        format!("Total Requests: {}", summary.total_requests),
        format!(
            "Successful: {} ({})",
            summary.successful_requests,
            format_percent_x100(summary.success_rate_x100)
        ),
        format!("Failed: {}", summary.failed_requests),
        format!(
            "Avg RPS: {}.{:02}",
            summary.avg_rps_x100.checked_div(100).unwrap_or(0),
            summary.avg_rps_x100.checked_rem(100).unwrap_or(0)
        ),
        format!(
            "Latency min/avg/max: {} / {} / {}",
            format_latency(summary.min_latency),
            format_latency(summary.avg_latency),
            format_latency(summary.max_latency)
        ),
        format!(
            "P50: {}ms, P90: {}ms, P99: {}ms",
            summary.p50_ms, summary.p90_ms, summary.p99_ms
        ),
        format!(
            "Data Received: {}",
            format_bytes_compact(u128::from(summary.total_bytes))
        ),
    ];

    if !summary.status_codes.is_empty() {
        let codes: Vec<String> = summary
            .status_codes
            .iter()
            .map(|(code, count)| format!("{}={}", code, count))
            .collect();
        lines.push(format!("Status Codes: {}", codes.join(", ")));
    }
    if pool.dropped_at_shutdown > 0 {
        lines.push(format!(
            "In-flight at shutdown (not counted): {}",
            pool.dropped_at_shutdown
        ));
    }
    if !summary.top_errors.is_empty() {
        lines.push("Top Errors:".to_owned());
        for (message, count) in summary.top_errors.iter().take(SUMMARY_TOP_ERRORS) {
            lines.push(format!("  [x{}] {}", count, message));
        }
    }
    lines
}

pub fn print_summary(outcome: &RunOutcome) {
    for line in summary_lines(&outcome.summary, &outcome.pool) {
        println!("{}", line);
    }
    if let Some(reason) = outcome.failure.as_deref() {
        println!("Run failed: {}", reason);
    }
}
