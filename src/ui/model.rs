use crossterm::event::KeyEvent;
use tokio::time::Instant;

use crate::lifecycle::LifecycleController;
use crate::metrics::{Aggregator, ExchangeResult};

/// Every input the dashboard loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiMessage {
    Key(KeyEvent),
    Resize(u16, u16),
    ResultArrived(Vec<ExchangeResult>),
    Tick(Instant),
    DurationElapsed,
    StreamClosed,
    Interrupt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    None,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Config,
    Metrics,
    Progress,
    Status,
    Chart,
    Errors,
}

impl Panel {
    pub const ALL: [Panel; 6] = [
        Panel::Config,
        Panel::Metrics,
        Panel::Progress,
        Panel::Status,
        Panel::Chart,
        Panel::Errors,
    ];

    const fn index(self) -> usize {
        match self {
            Panel::Config => 0,
            Panel::Metrics => 1,
            Panel::Progress => 2,
            Panel::Status => 3,
            Panel::Chart => 4,
            Panel::Errors => 5,
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        let index = self
            .index()
            .saturating_add(1)
            .checked_rem(Self::ALL.len())
            .unwrap_or(0);
        Self::ALL.get(index).copied().unwrap_or(Panel::Config)
    }

    #[must_use]
    pub fn prev(self) -> Self {
        let index = self
            .index()
            .checked_sub(1)
            .unwrap_or(Self::ALL.len().saturating_sub(1));
        Self::ALL.get(index).copied().unwrap_or(Panel::Config)
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Panel::Config => "Configuration",
            Panel::Metrics => "Metrics",
            Panel::Progress => "Progress",
            Panel::Status => "Status Codes",
            Panel::Chart => "RPS History",
            Panel::Errors => "Errors",
        }
    }
}

/// Series drawn by the history chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartMode {
    #[default]
    Rps,
    /// Rolling p50 latency in milliseconds.
    Latency,
}

impl ChartMode {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            ChartMode::Rps => ChartMode::Latency,
            ChartMode::Latency => ChartMode::Rps,
        }
    }
}

/// Row order of the status code panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusSort {
    /// Highest count first, ties to the lower code.
    #[default]
    Count,
    Code,
}

impl StatusSort {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            StatusSort::Count => StatusSort::Code,
            StatusSort::Code => StatusSort::Count,
        }
    }
}

/// View switches local to a single panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelToggles {
    pub progress_details: bool,
    pub status_table: bool,
    pub status_sort: StatusSort,
    pub chart_mode: ChartMode,
    pub error_timestamps: bool,
    pub error_scroll: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiSettings {
    pub no_color: bool,
    /// Stay open after the run ends until the user quits.
    pub linger: bool,
}

/// Everything the dashboard renders from. Mutated only by `update`.
#[derive(Debug)]
pub struct DashboardState {
    pub aggregator: Aggregator,
    pub lifecycle: LifecycleController,
    pub focus: Panel,
    pub toggles: PanelToggles,
    pub show_help: bool,
    pub size: (u16, u16),
    pub settings: UiSettings,
    pub stream_closed: bool,
}

impl DashboardState {
    #[must_use]
    pub const fn new(
        aggregator: Aggregator,
        lifecycle: LifecycleController,
        settings: UiSettings,
    ) -> Self {
        Self {
            aggregator,
            lifecycle,
            focus: Panel::Config,
            toggles: PanelToggles {
                progress_details: false,
                status_table: false,
                status_sort: StatusSort::Count,
                chart_mode: ChartMode::Rps,
                error_timestamps: false,
                error_scroll: 0,
            },
            show_help: false,
            size: (0, 0),
            settings,
            stream_closed: false,
        }
    }

    /// Pushes the lifecycle status into the aggregator's absorption gate.
    pub(crate) fn sync_status(&mut self, now: Instant) {
        self.aggregator.set_status(self.lifecycle.status(), now);
    }

    /// The loop may exit: the run ended, the bus is drained, and the user
    /// does not want the final screen kept open.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.lifecycle.status().is_terminal() && self.stream_closed && !self.settings.linger
    }
}
