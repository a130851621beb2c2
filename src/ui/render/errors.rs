use ratatui::{
    layout::Rect,
    prelude::{Backend, Frame},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::ui::model::{DashboardState, Panel};

use super::formatting::truncate;
use super::frame::panel_block;
use super::theme::{ACCENT_RED_RGB, muted_style, rgb, style_color};

pub(super) fn render_errors<B: Backend>(
    f: &mut Frame<'_, B>,
    state: &DashboardState,
    area: Rect,
) {
    let no_color = state.settings.no_color;
    let errors = state.aggregator.errors();
    let block = panel_block(state, Panel::Errors);

    if errors.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No errors", muted_style(no_color))).block(block),
            area,
        );
        return;
    }

    let width = usize::from(area.width.saturating_sub(2));
    let lines: Vec<Line<'static>> = errors
        .iter()
        .skip(state.toggles.error_scroll)
        .map(|entry| {
            let mut spans = Vec::with_capacity(3);
            if state.toggles.error_timestamps {
                spans.push(Span::styled(
                    format!("{} ", entry.last_seen_wall.format("%H:%M:%S")),
                    muted_style(no_color),
                ));
            }
            let count = format!("[x{}] ", entry.count);
            let room = width
                .saturating_sub(count.chars().count())
                .saturating_sub(if state.toggles.error_timestamps { 9 } else { 0 });
            spans.push(Span::styled(
                count,
                style_color(no_color, rgb(ACCENT_RED_RGB)),
            ));
            spans.push(Span::raw(truncate(&entry.message, room)));
            Line::from(spans)
        })
        .collect();

    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}
