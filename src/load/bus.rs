use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::metrics::ExchangeResult;

/// Bound on in-flight results between workers and the dashboard loop.
pub const RESULT_BUS_CAPACITY: usize = 1000;

pub type ResultSender = mpsc::Sender<ExchangeResult>;
pub type ResultReceiver = mpsc::Receiver<ExchangeResult>;

/// Bounded channel from workers to the single consumer. It closes when the
/// last sender is dropped.
#[must_use]
pub fn result_bus() -> (ResultSender, ResultReceiver) {
    mpsc::channel(RESULT_BUS_CAPACITY)
}

#[derive(Debug, PartialEq, Eq)]
pub enum Drain {
    /// At least one result was ready.
    Ready(Vec<ExchangeResult>),
    /// Nothing ready, producers still alive.
    Empty,
    /// Nothing ready and every producer is gone.
    Closed,
}

/// Takes up to `max` results without waiting.
pub fn drain_ready(rx: &mut ResultReceiver, max: usize) -> Drain {
    let mut batch = Vec::new();
    while batch.len() < max {
        match rx.try_recv() {
            Ok(result) => batch.push(result),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                if batch.is_empty() {
                    return Drain::Closed;
                }
                break;
            }
        }
    }
    if batch.is_empty() {
        Drain::Empty
    } else {
        Drain::Ready(batch)
    }
}
