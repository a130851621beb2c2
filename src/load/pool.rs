use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Interval;
use tracing::{debug, warn};

use crate::domain::{TestConfig, TestStatus};
use crate::protocol::Transport;
use crate::shutdown::{ShutdownReceiver, ShutdownSender};

use super::bus::ResultSender;
use super::rate::RatePlan;

/// Totals reported by the pool once every worker has exited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolReport {
    pub workers: usize,
    pub executed: u64,
    pub delivered: u64,
    pub dropped_at_shutdown: u64,
}

impl PoolReport {
    fn merge(&mut self, worker: WorkerReport) {
        self.executed = self.executed.saturating_add(worker.executed);
        self.delivered = self.delivered.saturating_add(worker.delivered);
        self.dropped_at_shutdown = self
            .dropped_at_shutdown
            .saturating_add(worker.dropped_at_shutdown);
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct WorkerReport {
    executed: u64,
    delivered: u64,
    dropped_at_shutdown: u64,
}

struct Worker {
    id: usize,
    transport: Arc<dyn Transport>,
    ticker: Interval,
    shutdown_rx: ShutdownReceiver,
    status_rx: watch::Receiver<TestStatus>,
    result_tx: ResultSender,
}

/// Spawns `config.concurrency` paced workers. The returned task resolves
/// after every worker has exited and the pool's sender has been dropped,
/// which closes the result bus.
pub fn spawn_worker_pool(
    config: &TestConfig,
    transport: &Arc<dyn Transport>,
    shutdown_tx: &ShutdownSender,
    status_rx: &watch::Receiver<TestStatus>,
    result_tx: ResultSender,
) -> JoinHandle<PoolReport> {
    let workers = config.concurrency;
    let plan = RatePlan::new(config.rate, workers);
    if plan.effective_rate(workers) != config.rate {
        debug!(
            "Per-worker rate {}/s across {} workers gives {}/s (requested {}/s)",
            plan.per_worker_rate,
            workers,
            plan.effective_rate(workers),
            config.rate
        );
    }

    let mut rng = rand::thread_rng();
    let mut handles = Vec::with_capacity(workers);
    for id in 0..workers {
        let worker = Worker {
            id,
            transport: Arc::clone(transport),
            ticker: plan.ticker(plan.phase(&mut rng)),
            shutdown_rx: shutdown_tx.subscribe(),
            status_rx: status_rx.clone(),
            result_tx: result_tx.clone(),
        };
        handles.push(tokio::spawn(run_worker(worker)));
    }

    tokio::spawn(async move {
        let mut report = PoolReport {
            workers,
            ..PoolReport::default()
        };
        for handle in handles {
            match handle.await {
                Ok(worker) => report.merge(worker),
                Err(err) => warn!("Worker task failed: {}", err),
            }
        }
        drop(result_tx);
        debug!(
            "Worker pool stopped: executed={} delivered={} dropped={}",
            report.executed, report.delivered, report.dropped_at_shutdown
        );
        report
    })
}

async fn run_worker(mut worker: Worker) -> WorkerReport {
    let mut report = WorkerReport::default();
    loop {
        tokio::select! {
            biased;
            _ = worker.shutdown_rx.recv() => break,
            _ = worker.ticker.tick() => {}
        }

        let status = *worker.status_rx.borrow();
        if status.is_terminal() {
            break;
        }
        if status != TestStatus::Running {
            continue;
        }

        let result = tokio::select! {
            biased;
            _ = worker.shutdown_rx.recv() => break,
            result = worker.transport.execute() => result,
        };
        report.executed = report.executed.saturating_add(1);

        tokio::select! {
            biased;
            _ = worker.shutdown_rx.recv() => {
                report.dropped_at_shutdown = report.dropped_at_shutdown.saturating_add(1);
                break;
            }
            sent = worker.result_tx.send(result) => {
                if sent.is_err() {
                    report.dropped_at_shutdown = report.dropped_at_shutdown.saturating_add(1);
                    break;
                }
                report.delivered = report.delivered.saturating_add(1);
            }
        }
    }
    debug!("Worker {} exiting", worker.id);
    report
}
