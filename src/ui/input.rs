use std::time::Duration;

use crossterm::event::{Event, KeyEventKind, poll, read};
use tokio::sync::mpsc;

use super::model::UiMessage;

/// Keyboard polling interval; also bounds how long the reader outlives the loop.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Reads terminal events on a blocking thread and forwards key presses and
/// resizes. Stops once the dashboard loop drops its receiver.
pub(crate) fn spawn_input_reader(ui_tx: mpsc::Sender<UiMessage>) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        loop {
            if ui_tx.is_closed() {
                break;
            }

            let has_event = match poll(INPUT_POLL_INTERVAL) {
                Ok(has_event) => has_event,
                Err(err) => {
                    tracing::warn!("Terminal input poll failed: {}", err);
                    break;
                }
            };
            if !has_event {
                continue;
            }

            let message = match read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => UiMessage::Key(key),
                Ok(Event::Resize(width, height)) => UiMessage::Resize(width, height),
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!("Terminal input read failed: {}", err);
                    break;
                }
            };
            if ui_tx.blocking_send(message).is_err() {
                break;
            }
        }
    })
}
