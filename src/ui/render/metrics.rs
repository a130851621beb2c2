use ratatui::{
    layout::Rect,
    prelude::{Backend, Frame},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::model::{DashboardState, Panel};

use super::formatting::{format_latency, format_mb_per_sec, format_percent_x100};
use super::frame::panel_block;
use super::theme::{
    ACCENT_DATA_RGB, ACCENT_LATENCY_RGB, ACCENT_RATE_RGB, error_rate_color, muted_style, rgb,
    style_color,
};

pub(super) fn render_metrics<B: Backend>(
    f: &mut Frame<'_, B>,
    state: &DashboardState,
    area: Rect,
) {
    let no_color = state.settings.no_color;
    let aggregator = &state.aggregator;
    let derived = aggregator.derived();
    let target_rps = aggregator.config().rate;
    let latency_style = style_color(no_color, rgb(ACCENT_LATENCY_RGB));
    let label = |text: &'static str| Span::styled(text, muted_style(no_color));

    let lines = vec![
        Line::from(vec![
            label("RPS        "),
            Span::styled(
                format!("{} / {} target", derived.current_rps, target_rps),
                style_color(no_color, rgb(ACCENT_RATE_RGB)),
            ),
        ]),
        Line::from(vec![
            label("Success    "),
            Span::raw(format_percent_x100(derived.success_rate_x100)),
            label("  Errors "),
            Span::styled(
                format_percent_x100(derived.error_rate_x100),
                style_color(no_color, error_rate_color(derived.error_rate_x100)),
            ),
        ]),
        Line::from(vec![
            label("Latency    "),
            Span::styled(
                format!(
                    "avg {}  min {}  max {}",
                    format_latency(derived.avg_latency),
                    format_latency(aggregator.min_latency()),
                    format_latency(aggregator.max_latency())
                ),
                latency_style,
            ),
        ]),
        Line::from(vec![
            label("           "),
            Span::styled(
                format!(
                    "p50 {}  p90 {}",
                    format_latency(derived.percentiles.p50),
                    format_latency(derived.percentiles.p90)
                ),
                latency_style,
            ),
        ]),
        Line::from(vec![
            label("           "),
            Span::styled(
                format!(
                    "p95 {}  p99 {}",
                    format_latency(derived.percentiles.p95),
                    format_latency(derived.percentiles.p99)
                ),
                latency_style,
            ),
        ]),
        Line::from(vec![
            label("Throughput "),
            Span::styled(
                format_mb_per_sec(derived.bytes_per_sec),
                style_color(no_color, rgb(ACCENT_DATA_RGB)),
            ),
        ]),
        Line::from(vec![
            label("Requests   "),
            Span::raw(format!(
                "{} total  {} ok  {} failed",
                aggregator.total(),
                aggregator.successful(),
                aggregator.failed()
            )),
        ]),
    ];

    f.render_widget(
        Paragraph::new(lines).block(panel_block(state, Panel::Metrics)),
        area,
    );
}
