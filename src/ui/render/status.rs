use ratatui::{
    layout::{Constraint, Rect},
    prelude::{Backend, Frame},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
};

use crate::metrics::aggregator::ratio_x100;
use crate::ui::model::{DashboardState, Panel, StatusSort};

use super::formatting::format_percent_x100;
use super::frame::panel_block;
use super::theme::{muted_style, panel_title_style, status_code_color, style_color};

const CODE_WIDTH: u16 = 5;
const PERCENT_WIDTH: u16 = 8;

/// Codes in the panel's current order. By count, ties go to the lower code.
fn ranked_codes(state: &DashboardState) -> Vec<(u16, u64)> {
    // The map already iterates in code order.
    let mut codes: Vec<(u16, u64)> = state
        .aggregator
        .status_codes()
        .iter()
        .map(|(code, count)| (*code, *count))
        .collect();
    if state.toggles.status_sort == StatusSort::Count {
        codes.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));
    }
    codes
}

pub(super) fn render_status<B: Backend>(
    f: &mut Frame<'_, B>,
    state: &DashboardState,
    area: Rect,
) {
    let no_color = state.settings.no_color;
    let codes = ranked_codes(state);
    let total: u64 = codes.iter().map(|(_, count)| *count).sum();
    let block = panel_block(state, Panel::Status);

    if codes.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No responses yet", muted_style(no_color))).block(block),
            area,
        );
        return;
    }

    if state.toggles.status_table {
        let rows: Vec<Row<'static>> = codes
            .iter()
            .map(|(code, count)| {
                Row::new(vec![
                    Cell::from(code.to_string())
                        .style(style_color(no_color, status_code_color(*code))),
                    Cell::from(count.to_string()),
                    Cell::from(format_percent_x100(ratio_x100(*count, total))),
                ])
            })
            .collect();
        let widths = [
            Constraint::Length(CODE_WIDTH),
            Constraint::Min(6),
            Constraint::Length(PERCENT_WIDTH),
        ];
        let table = Table::new(rows)
            .header(Row::new(vec!["Code", "Count", "Share"]).style(panel_title_style(no_color)))
            .widths(&widths)
            .block(block);
        f.render_widget(table, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2);
    let bar_width = inner_width
        .saturating_sub(CODE_WIDTH)
        .saturating_sub(PERCENT_WIDTH)
        .saturating_sub(1);
    let lines: Vec<Line<'static>> = codes
        .iter()
        .map(|(code, count)| {
            let share_x100 = ratio_x100(*count, total);
            let filled = u64::from(bar_width)
                .saturating_mul(share_x100)
                .checked_div(10_000)
                .and_then(|cells| usize::try_from(cells).ok())
                .unwrap_or(0);
            let color = style_color(no_color, status_code_color(*code));
            Line::from(vec![
                Span::styled(format!("{:<5}", code), color),
                Span::styled("■".repeat(filled.max(1)), color),
                Span::raw(format!(" {}", format_percent_x100(share_x100))),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(block), area);
}
