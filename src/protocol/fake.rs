use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::domain::ProtocolKind;
use crate::metrics::ExchangeResult;

use super::Transport;

/// Answers every exchange with a fixed status after a fixed delay.
#[derive(Debug)]
pub(crate) struct FakeTransport {
    delay: Duration,
    status: u16,
    calls: AtomicU64,
}

impl FakeTransport {
    pub(crate) const fn new(delay: Duration, status: u16) -> Self {
        Self {
            delay,
            status,
            calls: AtomicU64::new(0),
        }
    }

    pub(crate) fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(&self) -> ExchangeResult {
        let dispatched_at = Instant::now();
        self.calls.fetch_add(1, Ordering::Relaxed);
        tokio::time::sleep(self.delay).await;
        ExchangeResult::success(dispatched_at, dispatched_at.elapsed(), self.status, 2)
    }

    fn protocol(&self) -> ProtocolKind {
        ProtocolKind::Http
    }
}
