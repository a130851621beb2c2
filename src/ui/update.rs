use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::time::Instant;
use tracing::info;

use super::model::{DashboardState, Panel, UiCommand, UiMessage};

const STREAM_CLOSED_EARLY: &str = "result stream closed before the run ended";

/// Applies one message to the dashboard state. Total over every message.
pub fn update(state: &mut DashboardState, msg: UiMessage) -> UiCommand {
    match msg {
        UiMessage::Key(key) => return handle_key(state, key),
        UiMessage::Resize(width, height) => state.size = (width, height),
        UiMessage::ResultArrived(batch) => {
            state.aggregator.absorb_batch(&batch, Instant::now());
        }
        UiMessage::Tick(now) => {
            if now >= state.lifecycle.deadline() {
                state.lifecycle.finish();
                state.sync_status(now);
            }
            state.aggregator.tick(now);
        }
        UiMessage::DurationElapsed => {
            state.lifecycle.finish();
            state.sync_status(Instant::now());
        }
        UiMessage::StreamClosed => {
            state.stream_closed = true;
            state.lifecycle.fail(STREAM_CLOSED_EARLY);
            state.sync_status(Instant::now());
        }
        UiMessage::Interrupt => {
            info!("Interrupted, stopping run");
            state.lifecycle.stop();
            state.sync_status(Instant::now());
            return UiCommand::Quit;
        }
    }

    if state.is_done() {
        UiCommand::Quit
    } else {
        UiCommand::None
    }
}

fn handle_key(state: &mut DashboardState, key: KeyEvent) -> UiCommand {
    if key.kind == KeyEventKind::Release {
        return UiCommand::None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return quit(state),
        KeyCode::Char('q') => return quit(state),
        KeyCode::Char('p') => {
            state.lifecycle.toggle_pause();
            state.sync_status(Instant::now());
        }
        KeyCode::Char('s') => {
            state.lifecycle.stop();
            state.sync_status(Instant::now());
        }
        KeyCode::Char('h') => state.show_help = !state.show_help,
        KeyCode::Esc => state.show_help = false,
        KeyCode::Tab => state.focus = state.focus.next(),
        KeyCode::BackTab => state.focus = state.focus.prev(),
        KeyCode::Char('d') if state.focus == Panel::Progress => {
            state.toggles.progress_details = !state.toggles.progress_details;
        }
        KeyCode::Char('c') if state.focus == Panel::Status => {
            state.toggles.status_table = !state.toggles.status_table;
        }
        KeyCode::Char('o') if state.focus == Panel::Status => {
            state.toggles.status_sort = state.toggles.status_sort.next();
        }
        KeyCode::Char('m') if state.focus == Panel::Chart => {
            state.toggles.chart_mode = state.toggles.chart_mode.next();
        }
        KeyCode::Char('t') if state.focus == Panel::Errors => {
            state.toggles.error_timestamps = !state.toggles.error_timestamps;
        }
        KeyCode::Up if state.focus == Panel::Errors => {
            state.toggles.error_scroll = state.toggles.error_scroll.saturating_sub(1);
        }
        KeyCode::Down if state.focus == Panel::Errors => {
            let last = state.aggregator.errors().len().saturating_sub(1);
            state.toggles.error_scroll = state.toggles.error_scroll.saturating_add(1).min(last);
        }
        _ => {}
    }

    if state.is_done() {
        UiCommand::Quit
    } else {
        UiCommand::None
    }
}

fn quit(state: &mut DashboardState) -> UiCommand {
    state.lifecycle.stop();
    state.sync_status(Instant::now());
    UiCommand::Quit
}
