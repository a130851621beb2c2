use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::domain::TestConfig;
use crate::error::{AppError, AppResult};
use crate::lifecycle::LifecycleController;
use crate::load::{RatePlan, result_bus, spawn_worker_pool};
use crate::metrics::Aggregator;
use crate::protocol::{Transport, build_transport};
use crate::shutdown::shutdown_channel;
use crate::system::shutdown_handlers::setup_signal_handler;
use crate::ui::input::spawn_input_reader;
use crate::ui::render::{Ui, UiActions};
use crate::ui::{
    DashboardState, HeadlessRenderer, MessageSources, TerminalRenderer, UiSettings, run_dashboard,
};

use super::{RunOptions, RunOutcome};

/// Key presses, resizes and signals queued for the dashboard loop.
const UI_CHANNEL_CAPACITY: usize = 64;

/// Runs one load test against the configured target until the duration
/// elapses or the user stops it.
///
/// # Errors
///
/// Returns an error when the transport cannot be built, the terminal cannot
/// be set up, or a background task panics.
pub async fn run(config: Arc<TestConfig>, options: RunOptions) -> AppResult<RunOutcome> {
    let transport = match build_transport(&config) {
        Ok(transport) => transport,
        Err(err) => {
            let lifecycle = fail_setup(&config, &err);
            debug!("Setup aborted, run ended in {} state", lifecycle.status());
            return Err(err);
        }
    };
    run_with_transport(config, transport, options).await
}

/// Records a setup failure as the run's terminal `Error` state. No worker
/// exists yet, so the shutdown broadcast has no receivers.
pub(crate) fn fail_setup(config: &TestConfig, err: &AppError) -> LifecycleController {
    let (shutdown_tx, _) = shutdown_channel();
    let mut lifecycle = LifecycleController::new(config.duration, Instant::now(), shutdown_tx);
    lifecycle.fail(err.to_string());
    lifecycle
}

pub(crate) async fn run_with_transport(
    config: Arc<TestConfig>,
    transport: Arc<dyn Transport>,
    options: RunOptions,
) -> AppResult<RunOutcome> {
    // Raw mode goes on before any worker fires so setup failures leave
    // nothing running.
    let terminal = if options.headless {
        None
    } else {
        Some(Ui::setup_terminal()?)
    };

    let plan = RatePlan::new(config.rate, config.concurrency);
    info!(
        "Starting {} {} {} for {}s: {} workers at {} req/s each",
        transport.protocol().as_str(),
        config.method_name(),
        config.target,
        config.duration.as_secs(),
        config.concurrency,
        plan.per_worker_rate
    );

    let started_at = Instant::now();
    let (shutdown_tx, _) = shutdown_channel();
    let lifecycle = LifecycleController::new(config.duration, started_at, shutdown_tx.clone());
    let status_rx = lifecycle.subscribe();
    let (result_tx, result_rx) = result_bus();
    let pool_handle = spawn_worker_pool(&config, &transport, &shutdown_tx, &status_rx, result_tx);
    drop(status_rx);

    let (ui_tx, ui_rx) = mpsc::channel(UI_CHANNEL_CAPACITY);
    let signal_handle = setup_signal_handler(&ui_tx);
    let input_handle = terminal
        .is_some()
        .then(|| spawn_input_reader(ui_tx.clone()));
    drop(ui_tx);

    let mut state = DashboardState::new(
        Aggregator::new(Arc::clone(&config), started_at),
        lifecycle,
        UiSettings {
            no_color: options.no_color,
            // Without an input reader nothing could dismiss the final screen.
            linger: options.linger && !options.headless,
        },
    );
    let mut sources = MessageSources::new(result_rx, ui_rx, options.refresh);

    let loop_result = match terminal {
        Some(terminal) => {
            let mut renderer = TerminalRenderer::new(terminal);
            let result = run_dashboard(&mut state, &mut sources, &mut renderer).await;
            Ui::cleanup();
            result
        }
        None => {
            let mut renderer = HeadlessRenderer::new();
            run_dashboard(&mut state, &mut sources, &mut renderer).await
        }
    };

    if !state.lifecycle.status().is_terminal() {
        state.lifecycle.stop();
        state.sync_status(Instant::now());
    }
    // Closing both receivers releases the workers, the signal task, and
    // the input reader.
    drop(sources);

    let pool = pool_handle.await?;
    signal_handle.await?;
    if let Some(handle) = input_handle {
        handle.await?;
    }
    debug!(
        "Pool exited: executed={} delivered={} dropped_at_shutdown={}",
        pool.executed, pool.delivered, pool.dropped_at_shutdown
    );
    loop_result?;

    Ok(RunOutcome {
        summary: state.aggregator.summary(),
        status: state.lifecycle.status(),
        pool,
        failure: state.lifecycle.failure().map(str::to_owned),
    })
}
