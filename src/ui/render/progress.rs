use ratatui::{
    layout::Rect,
    prelude::{Backend, Frame},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::model::{DashboardState, Panel};

use super::formatting::{format_bytes_compact, format_clock, format_percent_x100};
use super::frame::panel_block;
use super::theme::{
    ACCENT_PROGRESS_RGB, PANEL_TEXT_RGB, error_rate_color, muted_style, rgb, style_color,
};

const PARTIAL_BLOCKS: [&str; 8] = ["", "▏", "▎", "▍", "▌", "▋", "▊", "▉"];
const PROGRESS_SCALE: u64 = 10_000;

/// `[█████▌    ]` with `label` centered over the bar. `progress_x100` runs
/// from 0 to 10_000.
pub(super) fn progress_bar_line(
    progress_x100: u64,
    width: u16,
    no_color: bool,
    label: &str,
) -> Line<'static> {
    let bar_width = usize::from(width.saturating_sub(2)).max(1);
    let total_eighths = u64::try_from(bar_width)
        .unwrap_or(u64::MAX)
        .saturating_mul(8);
    let filled_eighths = progress_x100
        .min(PROGRESS_SCALE)
        .saturating_mul(total_eighths)
        .checked_div(PROGRESS_SCALE)
        .unwrap_or(0);
    let full = usize::try_from(filled_eighths.checked_div(8).unwrap_or(0))
        .unwrap_or(0)
        .min(bar_width);
    let rem = usize::try_from(filled_eighths.checked_rem(8).unwrap_or(0)).unwrap_or(0);
    let partial = PARTIAL_BLOCKS
        .get(rem)
        .and_then(|block| block.chars().next())
        .filter(|_| full < bar_width);

    let label_chars: Vec<char> = label.chars().take(bar_width).collect();
    let label_start = bar_width
        .saturating_sub(label_chars.len())
        .checked_div(2)
        .unwrap_or(0);

    let bar_style = style_color(no_color, rgb(ACCENT_PROGRESS_RGB));
    let text_style = style_color(no_color, rgb(PANEL_TEXT_RGB));
    let mut spans = Vec::with_capacity(bar_width.saturating_add(2));
    spans.push(Span::raw("["));
    for idx in 0..bar_width {
        let label_char = idx
            .checked_sub(label_start)
            .and_then(|offset| label_chars.get(offset))
            .copied();
        let span = match label_char {
            Some(ch) => Span::styled(ch.to_string(), text_style),
            None if idx < full => Span::styled("█", bar_style),
            None if idx == full => partial.map_or_else(
                || Span::raw(" "),
                |ch| Span::styled(ch.to_string(), bar_style),
            ),
            None => Span::raw(" "),
        };
        spans.push(span);
    }
    spans.push(Span::raw("]"));
    Line::from(spans)
}

pub(super) fn render_progress<B: Backend>(
    f: &mut Frame<'_, B>,
    state: &DashboardState,
    area: Rect,
) {
    let no_color = state.settings.no_color;
    let aggregator = &state.aggregator;
    let derived = aggregator.derived();
    let target_rps = aggregator.config().rate;
    let inner_width = area.width.saturating_sub(2);

    let speed_x100 = crate::metrics::aggregator::ratio_x100(derived.current_rps, target_rps);
    let label = format!(" {} ", format_percent_x100(derived.progress_x100));
    let mut lines = vec![
        progress_bar_line(derived.progress_x100, inner_width, no_color, &label),
        Line::from(vec![
            Span::styled("Elapsed ", muted_style(no_color)),
            Span::raw(format_clock(derived.elapsed)),
            Span::styled("  Remaining ", muted_style(no_color)),
            Span::raw(format_clock(derived.remaining)),
            Span::styled("  Speed ", muted_style(no_color)),
            Span::raw(format!(
                "{}/{} rps ({})",
                derived.current_rps,
                target_rps,
                format_percent_x100(speed_x100)
            )),
        ]),
    ];

    if state.toggles.progress_details {
        lines.push(Line::from(vec![
            Span::styled("Sent ", muted_style(no_color)),
            Span::raw(aggregator.total().to_string()),
            Span::styled("  OK ", muted_style(no_color)),
            Span::raw(aggregator.successful().to_string()),
            Span::styled("  Failed ", muted_style(no_color)),
            Span::styled(
                aggregator.failed().to_string(),
                style_color(no_color, error_rate_color(derived.error_rate_x100)),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Received ", muted_style(no_color)),
            Span::raw(format_bytes_compact(u128::from(aggregator.total_bytes()))),
            Span::styled("  Status ", muted_style(no_color)),
            Span::raw(state.lifecycle.status().as_str()),
        ]));
        lines.push(Line::from(Span::styled(
            "d hides details",
            muted_style(no_color),
        )));
    }

    f.render_widget(
        Paragraph::new(lines).block(panel_block(state, Panel::Progress)),
        area,
    );
}
