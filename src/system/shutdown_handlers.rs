use tokio::sync::mpsc;

use crate::ui::UiMessage;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Forwards SIGINT/SIGTERM to the dashboard loop as [`UiMessage::Interrupt`].
/// Exits once the loop drops its receiver.
pub fn setup_signal_handler(ui_tx: &mpsc::Sender<UiMessage>) -> tokio::task::JoinHandle<()> {
    let ui_tx = ui_tx.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                tracing::warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };

        #[cfg(unix)]
        {
            tokio::select! {
                () = ui_tx.closed() => {}
                _ = tokio::signal::ctrl_c() => {
                    drop(ui_tx.send(UiMessage::Interrupt).await);
                }
                () = async {
                    if let Some(signal) = term_signal.as_mut() {
                        signal.recv().await;
                    } else {
                        std::future::pending::<()>().await;
                    }
                } => {
                    drop(ui_tx.send(UiMessage::Interrupt).await);
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                () = ui_tx.closed() => {}
                _ = tokio::signal::ctrl_c() => {
                    drop(ui_tx.send(UiMessage::Interrupt).await);
                }
            }
        }
    })
}
