use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::{Backend, Frame},
    text::{Line, Span},
    widgets::{Paragraph, Sparkline},
};

use crate::ui::model::{ChartMode, DashboardState, Panel};

use super::frame::panel_block;
use super::theme::{ACCENT_LATENCY_RGB, ACCENT_RATE_RGB, muted_style, rgb, style_color};

/// Per-second RPS or p50 latency over the last minute, with the peak in
/// the caption.
pub(super) fn render_chart<B: Backend>(f: &mut Frame<'_, B>, state: &DashboardState, area: Rect) {
    let no_color = state.settings.no_color;
    let (history, unit, accent) = match state.toggles.chart_mode {
        ChartMode::Rps => (state.aggregator.rps_history(), "rps", ACCENT_RATE_RGB),
        ChartMode::Latency => (state.aggregator.latency_history(), "ms p50", ACCENT_LATENCY_RGB),
    };
    let block = panel_block(state, Panel::Chart);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);
    let (caption_area, chart_area) = match rows.as_ref() {
        [a, b] => (*a, *b),
        _ => return,
    };

    let caption = if history.is_empty() {
        Line::from(Span::styled("Collecting samples", muted_style(no_color)))
    } else {
        Line::from(vec![
            Span::styled("peak ", muted_style(no_color)),
            Span::raw(format!("{} {}", history.peak(), unit)),
            Span::styled(format!("  {}s", history.len()), muted_style(no_color)),
        ])
    };
    f.render_widget(Paragraph::new(caption), caption_area);

    // Newest samples win when the chart is narrower than the history.
    let data = history.to_vec();
    let visible = usize::from(chart_area.width);
    let start = data.len().saturating_sub(visible);
    let window = data.get(start..).unwrap_or_default();
    let sparkline = Sparkline::default()
        .data(window)
        .max(history.peak().max(1))
        .style(style_color(no_color, rgb(accent)));
    f.render_widget(sparkline, chart_area);
}
