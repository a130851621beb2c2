use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use super::*;
use crate::error::{AppError, AppResult};
use crate::shutdown::shutdown_channel;

fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

#[test]
fn pause_resume_round_trip_publishes_status() -> AppResult<()> {
    let (shutdown_tx, _) = shutdown_channel();
    let mut controller =
        LifecycleController::new(Duration::from_secs(5), Instant::now(), shutdown_tx);
    let status_rx = controller.subscribe();

    let paused = controller.toggle_pause();
    if paused
        != (Transition::Changed {
            from: TestStatus::Running,
            to: TestStatus::Paused,
        })
    {
        return Err(AppError::validation(format!("Unexpected transition: {:?}", paused)));
    }
    if *status_rx.borrow() != TestStatus::Paused {
        return Err(AppError::validation("Watch did not see Paused"));
    }
    if controller.pause() != Transition::Ignored {
        return Err(AppError::validation("Pausing twice should be ignored"));
    }

    if !controller.toggle_pause().is_changed() || controller.status() != TestStatus::Running {
        return Err(AppError::validation("Expected resume to Running"));
    }
    if *status_rx.borrow() != TestStatus::Running {
        return Err(AppError::validation("Watch did not see Running"));
    }
    Ok(())
}

#[test]
fn terminal_states_absorb_every_event() -> AppResult<()> {
    let (shutdown_tx, _) = shutdown_channel();
    let mut controller =
        LifecycleController::new(Duration::from_secs(5), Instant::now(), shutdown_tx);

    if !controller.stop().is_changed() {
        return Err(AppError::validation("Expected stop to change state"));
    }
    let ignored = [
        controller.pause(),
        controller.resume(),
        controller.toggle_pause(),
        controller.finish(),
        controller.fail("late"),
        controller.stop(),
    ];
    if ignored.iter().any(|transition| transition.is_changed()) {
        return Err(AppError::validation(format!(
            "Terminal state accepted an event: {:?}",
            ignored
        )));
    }
    if controller.status() != TestStatus::Stopped || controller.failure().is_some() {
        return Err(AppError::validation("Terminal state was overwritten"));
    }
    Ok(())
}

#[test]
fn terminal_transition_fires_shutdown_once() -> AppResult<()> {
    let (shutdown_tx, _) = shutdown_channel();
    let mut shutdown_rx = shutdown_tx.subscribe();
    let mut controller =
        LifecycleController::new(Duration::from_secs(5), Instant::now(), shutdown_tx);

    controller.pause();
    if shutdown_rx.try_recv().is_ok() {
        return Err(AppError::validation("Pause must not fire shutdown"));
    }
    controller.finish();
    controller.stop();
    if shutdown_rx.try_recv().is_err() {
        return Err(AppError::validation("Finish should fire shutdown"));
    }
    if shutdown_rx.try_recv().is_ok() {
        return Err(AppError::validation("Shutdown fired twice"));
    }
    Ok(())
}

#[test]
fn fail_records_reason() -> AppResult<()> {
    let (shutdown_tx, _) = shutdown_channel();
    let mut controller =
        LifecycleController::new(Duration::from_secs(5), Instant::now(), shutdown_tx);
    controller.fail("transport setup failed");
    if controller.status() != TestStatus::Error
        || controller.failure() != Some("transport setup failed")
    {
        return Err(AppError::validation("Expected Error with reason"));
    }
    Ok(())
}

#[test]
fn deadline_resolves_after_duration() -> AppResult<()> {
    run_async_test(async {
        let (shutdown_tx, _) = shutdown_channel();
        let started = Instant::now();
        let controller =
            LifecycleController::new(Duration::from_millis(50), started, shutdown_tx);

        tokio::time::timeout(Duration::from_secs(1), controller.deadline_reached())
            .await
            .map_err(|err| AppError::validation(format!("Deadline never fired: {}", err)))?;
        if started.elapsed() < Duration::from_millis(50) {
            return Err(AppError::validation("Deadline fired early"));
        }
        Ok(())
    })
}
