use ratatui::{
    layout::Rect,
    prelude::{Backend, Frame},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::model::{DashboardState, Panel};

use super::formatting::{format_clock, format_latency, truncate};
use super::frame::panel_block;
use super::theme::{muted_style, panel_title_style};

const LABEL_WIDTH: usize = 13;

fn row(label: &str, value: String, no_color: bool) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), muted_style(no_color)),
        Span::styled(value, panel_title_style(no_color)),
    ])
}

/// Read-only view of the resolved run settings.
pub(super) fn render_config<B: Backend>(f: &mut Frame<'_, B>, state: &DashboardState, area: Rect) {
    let no_color = state.settings.no_color;
    let config = state.aggregator.config();
    let value_width = usize::from(area.width.saturating_sub(2)).saturating_sub(LABEL_WIDTH);

    let lines = vec![
        row("Target", truncate(&config.target, value_width), no_color),
        row(
            "Protocol",
            config.protocol.as_str().to_uppercase(),
            no_color,
        ),
        row("Method", config.method_name().to_owned(), no_color),
        row("Rate", format!("{} req/s", config.rate), no_color),
        row(
            "Concurrency",
            format!("{} workers", config.concurrency),
            no_color,
        ),
        row(
            "Duration",
            format!(
                "{} (timeout {})",
                format_clock(config.duration),
                format_latency(config.request_timeout)
            ),
            no_color,
        ),
        row("Headers", config.headers.len().to_string(), no_color),
    ];

    f.render_widget(
        Paragraph::new(lines).block(panel_block(state, Panel::Config)),
        area,
    );
}
