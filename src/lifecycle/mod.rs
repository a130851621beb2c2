//! Run state machine: Running, Paused, and the terminal states.
//!
//! The controller owns the duration deadline and is the only writer of
//! the status channel that workers read. Entering a terminal state fires
//! the shutdown broadcast exactly once.

#[cfg(test)]
mod tests;

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::TestStatus;
use crate::shutdown::ShutdownSender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed { from: TestStatus, to: TestStatus },
    Ignored,
}

impl Transition {
    #[must_use]
    pub const fn is_changed(self) -> bool {
        matches!(self, Transition::Changed { .. })
    }
}

#[derive(Debug)]
pub struct LifecycleController {
    status: TestStatus,
    status_tx: watch::Sender<TestStatus>,
    shutdown_tx: ShutdownSender,
    deadline: Instant,
    failure: Option<String>,
}

impl LifecycleController {
    /// Starts in `Running` with a deadline of `started_at + duration`.
    #[must_use]
    pub fn new(duration: Duration, started_at: Instant, shutdown_tx: ShutdownSender) -> Self {
        let (status_tx, _) = watch::channel(TestStatus::Running);
        let deadline = started_at.checked_add(duration).unwrap_or(started_at);
        Self {
            status: TestStatus::Running,
            status_tx,
            shutdown_tx,
            deadline,
            failure: None,
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TestStatus> {
        self.status_tx.subscribe()
    }

    #[must_use]
    pub const fn status(&self) -> TestStatus {
        self.status
    }

    #[must_use]
    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Resolves at the deadline while the run is live; never once it ended.
    pub async fn deadline_reached(&self) {
        if self.status.is_terminal() {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep_until(self.deadline).await;
    }

    pub fn pause(&mut self) -> Transition {
        match self.status {
            TestStatus::Running => self.transition(TestStatus::Paused),
            TestStatus::Paused | TestStatus::Stopped | TestStatus::Finished | TestStatus::Error => {
                Transition::Ignored
            }
        }
    }

    pub fn resume(&mut self) -> Transition {
        match self.status {
            TestStatus::Paused => self.transition(TestStatus::Running),
            TestStatus::Running | TestStatus::Stopped | TestStatus::Finished | TestStatus::Error => {
                Transition::Ignored
            }
        }
    }

    pub fn toggle_pause(&mut self) -> Transition {
        match self.status {
            TestStatus::Running => self.pause(),
            TestStatus::Paused => self.resume(),
            TestStatus::Stopped | TestStatus::Finished | TestStatus::Error => Transition::Ignored,
        }
    }

    pub fn stop(&mut self) -> Transition {
        self.transition(TestStatus::Stopped)
    }

    pub fn finish(&mut self) -> Transition {
        self.transition(TestStatus::Finished)
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> Transition {
        let transition = self.transition(TestStatus::Error);
        if transition.is_changed() {
            let reason = reason.into();
            warn!("Run failed: {}", reason);
            self.failure = Some(reason);
        }
        transition
    }

    fn transition(&mut self, to: TestStatus) -> Transition {
        let from = self.status;
        if from.is_terminal() || from == to {
            return Transition::Ignored;
        }

        self.status = to;
        self.status_tx.send_replace(to);
        if to.is_terminal() {
            info!("Run {} after {} state", to, from);
            if self.shutdown_tx.send(()).is_err() {
                debug!("No shutdown subscribers left");
            }
        } else {
            debug!("Run state {} -> {}", from, to);
        }
        Transition::Changed { from, to }
    }
}
