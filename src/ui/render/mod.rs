mod chart;
mod config;
mod dashboard;
mod errors;
pub(crate) mod formatting;
mod frame;
mod help;
mod metrics;
mod progress;
mod status;
mod theme;

pub use dashboard::{DashboardTerminal, Ui, UiActions};
pub use frame::draw_frame;
