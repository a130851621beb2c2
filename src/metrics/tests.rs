use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use tokio::time::Instant;

use super::*;
use crate::domain::{ProtocolKind, TestConfig, TestStatus};
use crate::error::{AppError, AppResult};

fn test_config() -> Arc<TestConfig> {
    Arc::new(TestConfig {
        target: "http://localhost".to_owned(),
        protocol: ProtocolKind::Http,
        method: Method::GET,
        headers: Vec::new(),
        body: None,
        duration: Duration::from_secs(10),
        rate: 10,
        concurrency: 2,
        request_timeout: Duration::from_secs(1),
    })
}

fn ok_result(at: Instant, latency_ms: u64) -> ExchangeResult {
    ExchangeResult::success(at, Duration::from_millis(latency_ms), 200, 128)
}

fn err_result(at: Instant, message: &str) -> ExchangeResult {
    ExchangeResult::failure(at, Duration::from_millis(1), message)
}

#[test]
fn counters_add_up_after_absorbing() -> AppResult<()> {
    let start = Instant::now();
    let mut aggregator = Aggregator::new(test_config(), start);
    let batch = vec![
        ok_result(start, 5),
        err_result(start, "failed to execute request: refused"),
        ok_result(start, 7),
        ok_result(start, 9),
    ];

    let absorbed = aggregator.absorb_batch(&batch, start);
    if !aggregator.absorb(&err_result(start, "boom"), start) {
        return Err(AppError::validation("Expected absorb while running"));
    }

    if absorbed != 4 || aggregator.total() != 5 {
        return Err(AppError::validation(format!(
            "Unexpected total: {}",
            aggregator.total()
        )));
    }
    if aggregator.successful().saturating_add(aggregator.failed()) != aggregator.total() {
        return Err(AppError::validation("successful + failed != total"));
    }
    if aggregator.successful() != 3 || aggregator.failed() != 2 {
        return Err(AppError::validation("Unexpected success/failure split"));
    }
    if aggregator.status_codes().get(&200) != Some(&3) {
        return Err(AppError::validation("Expected three 200 responses"));
    }
    if aggregator.derived().success_rate_x100 != 6000 {
        return Err(AppError::validation(format!(
            "Unexpected success rate: {}",
            aggregator.derived().success_rate_x100
        )));
    }
    Ok(())
}

#[test]
fn empty_batch_leaves_derived_untouched() -> AppResult<()> {
    let start = Instant::now();
    let mut aggregator = Aggregator::new(test_config(), start);
    aggregator.absorb_batch(&[ok_result(start, 10)], start);
    let before = *aggregator.derived();

    let later = start + Duration::from_secs(3);
    if aggregator.absorb_batch(&[], later) != 0 {
        return Err(AppError::validation("Empty batch should absorb nothing"));
    }
    if *aggregator.derived() != before {
        return Err(AppError::validation("Empty batch changed derived values"));
    }
    Ok(())
}

#[test]
fn percentiles_follow_floor_index() -> AppResult<()> {
    let start = Instant::now();
    let mut aggregator = Aggregator::new(test_config(), start);
    let batch: Vec<ExchangeResult> = [10, 20, 30, 40, 50]
        .into_iter()
        .map(|ms| ok_result(start, ms))
        .collect();
    aggregator.absorb_batch(&batch, start);

    let percentiles = aggregator.derived().percentiles;
    if percentiles.p50 != Duration::from_millis(30) {
        return Err(AppError::validation(format!(
            "Unexpected p50: {:?}",
            percentiles.p50
        )));
    }
    if percentiles.p90 != Duration::from_millis(50) {
        return Err(AppError::validation(format!(
            "Unexpected p90: {:?}",
            percentiles.p90
        )));
    }
    if aggregator.min_latency() != Duration::from_millis(10)
        || aggregator.max_latency() != Duration::from_millis(50)
        || aggregator.derived().avg_latency != Duration::from_millis(30)
    {
        return Err(AppError::validation("Unexpected min/max/avg"));
    }
    Ok(())
}

#[test]
fn latency_samples_stay_bounded() -> AppResult<()> {
    let mut samples = LatencySamples::with_capacity(3);
    for ms in [100, 1, 2, 3] {
        samples.push(Duration::from_millis(ms));
    }
    if samples.len() != 3 {
        return Err(AppError::validation("Sample buffer exceeded capacity"));
    }
    if samples.percentiles().p99 != Duration::from_millis(3) {
        return Err(AppError::validation("Oldest sample should have been evicted"));
    }
    if LatencySamples::default().percentiles() != Percentiles::default() {
        return Err(AppError::validation("Empty samples should yield zeros"));
    }
    Ok(())
}

#[test]
fn current_rps_counts_window_then_decays() -> AppResult<()> {
    let start = Instant::now();
    let mut aggregator = Aggregator::new(test_config(), start);
    let at = start + Duration::from_millis(100);
    let batch: Vec<ExchangeResult> = (0..5)
        .map(|_| ExchangeResult::success(at, Duration::ZERO, 200, 0))
        .collect();
    aggregator.absorb_batch(&batch, at);

    if aggregator.derived().current_rps != 5 {
        return Err(AppError::validation(format!(
            "Expected 5 rps, got {}",
            aggregator.derived().current_rps
        )));
    }

    aggregator.tick(at + Duration::from_millis(1001));
    if aggregator.derived().current_rps != 0 {
        return Err(AppError::validation("Expected rps to decay to 0"));
    }
    Ok(())
}

#[test]
fn sliding_window_evicts_old_stamps() -> AppResult<()> {
    let start = Instant::now();
    let mut window = SlidingWindow::new(Duration::from_secs(1));
    window.record(start);
    window.record(start + Duration::from_millis(600));
    if window.count(start + Duration::from_millis(900)) != 2 {
        return Err(AppError::validation("Expected both stamps in window"));
    }
    if window.count(start + Duration::from_millis(1200)) != 1 {
        return Err(AppError::validation("Expected the first stamp evicted"));
    }
    Ok(())
}

#[test]
fn rps_history_is_a_bounded_ring() -> AppResult<()> {
    let mut history = RpsHistory::default();
    for value in 0..(MAX_RPS_HISTORY as u64 + 5) {
        history.push(value);
    }
    if history.len() != MAX_RPS_HISTORY {
        return Err(AppError::validation("History exceeded capacity"));
    }
    if history.to_vec().first() != Some(&5) {
        return Err(AppError::validation("Expected oldest samples evicted first"));
    }
    Ok(())
}

#[test]
fn tick_samples_history_once_per_second() -> AppResult<()> {
    let start = Instant::now();
    let mut aggregator = Aggregator::new(test_config(), start);
    aggregator.tick(start);
    aggregator.tick(start + Duration::from_millis(100));
    aggregator.tick(start + Duration::from_millis(500));
    if aggregator.rps_history().len() != 1 {
        return Err(AppError::validation("Expected a single history sample"));
    }
    aggregator.tick(start + Duration::from_millis(1000));
    if aggregator.rps_history().len() != 2 {
        return Err(AppError::validation("Expected a second history sample"));
    }
    Ok(())
}

#[test]
fn duplicate_errors_collapse_into_one_entry() -> AppResult<()> {
    let start = Instant::now();
    let mut aggregator = Aggregator::new(test_config(), start);
    aggregator.absorb_batch(
        &[err_result(start, "timeout"), err_result(start, "timeout")],
        start,
    );

    let entries: Vec<&ErrorEntry> = aggregator.errors().iter().collect();
    match entries.as_slice() {
        [entry] if entry.count == 2 && entry.message == "timeout" => Ok(()),
        other => Err(AppError::validation(format!(
            "Unexpected error entries: {:?}",
            other
        ))),
    }
}

#[test]
fn error_log_evicts_oldest_at_capacity() -> AppResult<()> {
    let now = Instant::now();
    let wall = chrono::Local::now();
    let mut log = ErrorLog::default();
    for index in 0..(MAX_ERRORS + 3) {
        log.record(&format!("error {}", index), now, wall);
    }
    if log.len() != MAX_ERRORS {
        return Err(AppError::validation("Error log exceeded capacity"));
    }
    let first = log.iter().next().map(|entry| entry.message.clone());
    if first.as_deref() != Some("error 3") {
        return Err(AppError::validation(format!(
            "Unexpected oldest entry: {:?}",
            first
        )));
    }
    Ok(())
}

#[test]
fn paused_results_are_dropped_until_resume() -> AppResult<()> {
    let start = Instant::now();
    let mut aggregator = Aggregator::new(test_config(), start);

    aggregator.set_status(TestStatus::Paused, start);
    if aggregator.absorb(&ok_result(start, 5), start) {
        return Err(AppError::validation("Absorbed while paused"));
    }
    if aggregator.absorb_batch(&[ok_result(start, 5), ok_result(start, 6)], start) != 0 {
        return Err(AppError::validation("Batch absorbed while paused"));
    }
    if aggregator.total() != 0 {
        return Err(AppError::validation("Paused results should not count"));
    }

    aggregator.set_status(TestStatus::Running, start);
    if !aggregator.absorb(&ok_result(start, 5), start) {
        return Err(AppError::validation("Expected absorption after resume"));
    }
    if aggregator.total() != 1 {
        return Err(AppError::validation("Expected one result after resume"));
    }
    Ok(())
}

#[test]
fn progress_and_remaining_track_elapsed() -> AppResult<()> {
    let start = Instant::now();
    let mut aggregator = Aggregator::new(test_config(), start);
    aggregator.tick(start + Duration::from_secs(4));
    let derived = aggregator.derived();
    if derived.progress_x100 != 4000 {
        return Err(AppError::validation(format!(
            "Unexpected progress: {}",
            derived.progress_x100
        )));
    }
    if derived.remaining != Duration::from_secs(6) {
        return Err(AppError::validation("Unexpected remaining time"));
    }

    aggregator.tick(start + Duration::from_secs(30));
    if aggregator.derived().progress_x100 != 10_000 {
        return Err(AppError::validation("Progress should clamp at 100%"));
    }
    if aggregator.derived().remaining != Duration::ZERO {
        return Err(AppError::validation("Remaining should clamp at zero"));
    }
    Ok(())
}

#[test]
fn summary_reports_histogram_and_top_errors() -> AppResult<()> {
    let start = Instant::now();
    let mut aggregator = Aggregator::new(test_config(), start);
    let mut batch: Vec<ExchangeResult> = (1..=100).map(|ms| ok_result(start, ms)).collect();
    batch.push(err_result(start, "refused"));
    batch.push(err_result(start, "refused"));
    batch.push(err_result(start, "reset"));
    aggregator.absorb_batch(&batch, start);
    aggregator.set_status(TestStatus::Finished, start + Duration::from_secs(2));

    let summary = aggregator.summary();
    if summary.total_requests != 103 || summary.status != TestStatus::Finished {
        return Err(AppError::validation("Unexpected summary totals"));
    }
    if summary.p50_ms < 49 || summary.p50_ms > 51 {
        return Err(AppError::validation(format!(
            "Unexpected p50: {}",
            summary.p50_ms
        )));
    }
    if summary.avg_rps_x100 != 5150 {
        return Err(AppError::validation(format!(
            "Unexpected avg rps: {}",
            summary.avg_rps_x100
        )));
    }
    match summary.top_errors.first() {
        Some((message, 2)) if message == "refused" => Ok(()),
        other => Err(AppError::validation(format!(
            "Unexpected top error: {:?}",
            other
        ))),
    }
}

#[test]
fn finishing_takes_a_final_snapshot() -> AppResult<()> {
    let start = Instant::now();
    let mut aggregator = Aggregator::new(test_config(), start);
    aggregator.absorb_batch(&[ok_result(start, 5), ok_result(start, 5)], start);
    aggregator.tick(start + Duration::from_millis(9_500));

    let deadline = start + Duration::from_secs(10);
    aggregator.set_status(TestStatus::Finished, deadline);
    aggregator.tick(deadline + Duration::from_secs(5));

    let derived = aggregator.derived();
    if derived.elapsed != Duration::from_secs(10) || derived.remaining != Duration::ZERO {
        return Err(AppError::validation(format!(
            "Expected a snapshot at the deadline, got {:?}",
            derived.elapsed
        )));
    }
    if derived.progress_x100 != 10_000 {
        return Err(AppError::validation("Progress should reach 100%"));
    }
    let summary = aggregator.summary();
    if summary.duration < aggregator.config().duration || summary.avg_rps_x100 != 20 {
        return Err(AppError::validation(format!(
            "Unexpected summary: {:?} at {} rps x100",
            summary.duration, summary.avg_rps_x100
        )));
    }
    Ok(())
}
