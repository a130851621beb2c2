//! Terminal dashboard: message model, update function, event loop and
//! rendering.
pub mod event_loop;
pub(crate) mod input;
pub mod model;
pub mod render;
pub mod update;


pub use event_loop::{
    HeadlessRenderer, MAX_DRAIN_BATCH, MessageSources, Renderer, TerminalRenderer, next_message,
    run_dashboard,
};
pub use model::{
    ChartMode, DashboardState, Panel, PanelToggles, StatusSort, UiCommand, UiMessage, UiSettings,
};
pub use update::update;
