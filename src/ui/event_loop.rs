//! The single cooperative loop that owns the result bus.

use std::time::Duration;

use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval};
use tracing::info;

use crate::error::AppResult;
use crate::load::{Drain, ResultReceiver, drain_ready};

use super::model::{DashboardState, UiCommand, UiMessage};
use super::render::draw_frame;
use super::update::update;

/// Most results folded into one `ResultArrived` message.
pub const MAX_DRAIN_BATCH: usize = 256;
const HEADLESS_LOG_INTERVAL: Duration = Duration::from_secs(1);

/// Draws the dashboard state somewhere.
pub trait Renderer {
    /// # Errors
    ///
    /// Returns an error when the frame cannot be written.
    fn render(&mut self, state: &DashboardState) -> AppResult<()>;
}

pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalRenderer<B> {
    #[must_use]
    pub const fn new(terminal: Terminal<B>) -> Self {
        Self { terminal }
    }

    #[must_use]
    pub const fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn render(&mut self, state: &DashboardState) -> AppResult<()> {
        self.terminal.draw(|f| draw_frame(f, state))?;
        Ok(())
    }
}

/// No terminal: logs a progress line once per second instead of drawing.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    last_logged: Option<Instant>,
}

impl HeadlessRenderer {
    #[must_use]
    pub const fn new() -> Self {
        Self { last_logged: None }
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, state: &DashboardState) -> AppResult<()> {
        let now = Instant::now();
        let due = self
            .last_logged
            .is_none_or(|last| now.saturating_duration_since(last) >= HEADLESS_LOG_INTERVAL);
        if !due {
            return Ok(());
        }
        self.last_logged = Some(now);

        let aggregator = &state.aggregator;
        let derived = aggregator.derived();
        info!(
            "[{}] elapsed={}s total={} ok={} failed={} rps={} p50={}ms p99={}ms",
            state.lifecycle.status(),
            derived.elapsed.as_secs(),
            aggregator.total(),
            aggregator.successful(),
            aggregator.failed(),
            derived.current_rps,
            derived.percentiles.p50.as_millis(),
            derived.percentiles.p99.as_millis(),
        );
        Ok(())
    }
}

/// Inputs the loop selects over.
pub struct MessageSources {
    results: ResultReceiver,
    results_closed: bool,
    input: mpsc::Receiver<UiMessage>,
    input_closed: bool,
    tick: Interval,
}

impl MessageSources {
    #[must_use]
    pub fn new(
        results: ResultReceiver,
        input: mpsc::Receiver<UiMessage>,
        refresh: Duration,
    ) -> Self {
        let mut tick = interval(refresh);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            results,
            results_closed: false,
            input,
            input_closed: false,
            tick,
        }
    }
}

/// Picks the next message. Ready results win; otherwise waits for the first
/// of input, tick, deadline, or a new result.
pub async fn next_message(state: &DashboardState, sources: &mut MessageSources) -> UiMessage {
    if !sources.results_closed {
        match drain_ready(&mut sources.results, MAX_DRAIN_BATCH) {
            Drain::Ready(batch) => return UiMessage::ResultArrived(batch),
            Drain::Closed => {
                sources.results_closed = true;
                return UiMessage::StreamClosed;
            }
            Drain::Empty => {}
        }
    }

    loop {
        tokio::select! {
            biased;
            message = sources.input.recv(), if !sources.input_closed => match message {
                Some(message) => return message,
                None => sources.input_closed = true,
            },
            _ = sources.tick.tick() => return UiMessage::Tick(Instant::now()),
            () = state.lifecycle.deadline_reached() => return UiMessage::DurationElapsed,
            first = sources.results.recv(), if !sources.results_closed => match first {
                Some(first) => {
                    let mut batch = vec![first];
                    if let Drain::Ready(rest) =
                        drain_ready(&mut sources.results, MAX_DRAIN_BATCH.saturating_sub(1))
                    {
                        batch.extend(rest);
                    }
                    return UiMessage::ResultArrived(batch);
                }
                None => {
                    sources.results_closed = true;
                    return UiMessage::StreamClosed;
                }
            },
        }
    }
}

/// Runs until `update` asks to quit. Result batches are folded without a
/// redraw; the next tick repaints.
///
/// # Errors
///
/// Returns an error when the renderer fails.
pub async fn run_dashboard<R: Renderer>(
    state: &mut DashboardState,
    sources: &mut MessageSources,
    renderer: &mut R,
) -> AppResult<()> {
    renderer.render(state)?;
    loop {
        let message = next_message(state, sources).await;
        let redraw = !matches!(message, UiMessage::ResultArrived(_));
        let command = update(state, message);
        if redraw {
            renderer.render(state)?;
        }
        if command == UiCommand::Quit {
            break;
        }
    }
    renderer.render(state)?;
    Ok(())
}
