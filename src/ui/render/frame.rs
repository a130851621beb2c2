use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::{Backend, Frame},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::domain::TestStatus;
use crate::ui::model::{DashboardState, Panel};

use super::chart::render_chart;
use super::config::render_config;
use super::errors::render_errors;
use super::help::render_help;
use super::metrics::render_metrics;
use super::progress::render_progress;
use super::status::render_status;
use super::theme::{
    ACCENT_AMBER_RGB, ACCENT_GREEN_RGB, ACCENT_PROGRESS_RGB, ACCENT_RED_RGB, BOTTOM_COL_PERCENT,
    BOTTOM_MIN_HEIGHT, FOOTER_HEIGHT, MIN_HEIGHT, MIN_WIDTH, PROGRESS_DETAILS_HEIGHT,
    PROGRESS_HEIGHT, TITLE_HEIGHT, TOP_ROW_HEIGHT, app_background_style, muted_style,
    panel_block_style, panel_border_style, panel_title_style, rgb, style_color,
};

/// Draws one full frame from `state`. Nothing is carried between frames.
pub fn draw_frame<B: Backend>(f: &mut Frame<'_, B>, state: &DashboardState) {
    let size = f.size();
    let no_color = state.settings.no_color;
    f.render_widget(Block::default().style(app_background_style(no_color)), size);

    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        render_too_small(f, size, no_color);
        return;
    }

    let progress_height = if state.toggles.progress_details {
        PROGRESS_DETAILS_HEIGHT
    } else {
        PROGRESS_HEIGHT
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Length(TOP_ROW_HEIGHT),
            Constraint::Length(progress_height),
            Constraint::Min(BOTTOM_MIN_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(size);
    let (title_row, top_row, progress_row, bottom_row, footer_row) = match rows.as_ref() {
        [a, b, c, d, e] => (*a, *b, *c, *d, *e),
        _ => return,
    };

    render_title(f, state, title_row);
    render_footer(f, no_color, footer_row);

    if state.show_help {
        let body = Rect {
            height: bottom_row
                .y
                .saturating_add(bottom_row.height)
                .saturating_sub(top_row.y),
            ..top_row
        };
        render_help(f, state, body);
        return;
    }

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(top_row);
    if let [config_area, metrics_area] = top.as_ref() {
        render_config(f, state, *config_area);
        render_metrics(f, state, *metrics_area);
    }

    render_progress(f, state, progress_row);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(BOTTOM_COL_PERCENT),
            Constraint::Percentage(BOTTOM_COL_PERCENT),
            Constraint::Min(0),
        ])
        .split(bottom_row);
    if let [status_area, chart_area, errors_area] = bottom.as_ref() {
        render_status(f, state, *status_area);
        render_chart(f, state, *chart_area);
        render_errors(f, state, *errors_area);
    }
}

/// Bordered block for `panel`, highlighted when it has focus.
pub(super) fn panel_block(state: &DashboardState, panel: Panel) -> Block<'static> {
    let no_color = state.settings.no_color;
    let focused = state.focus == panel;
    Block::default()
        .title(panel.title())
        .borders(Borders::ALL)
        .style(panel_block_style(no_color))
        .border_style(panel_border_style(no_color, focused))
        .title_style(panel_title_style(no_color))
}

fn render_title<B: Backend>(f: &mut Frame<'_, B>, state: &DashboardState, area: Rect) {
    let no_color = state.settings.no_color;
    let status = state.lifecycle.status();
    let status_color = match status {
        TestStatus::Running => rgb(ACCENT_GREEN_RGB),
        TestStatus::Paused => rgb(ACCENT_AMBER_RGB),
        TestStatus::Stopped | TestStatus::Finished => rgb(ACCENT_PROGRESS_RGB),
        TestStatus::Error => rgb(ACCENT_RED_RGB),
    };
    let mut spans = vec![
        Span::styled("stresstea", panel_title_style(no_color)),
        Span::styled(" · HTTP load test  ", muted_style(no_color)),
        Span::styled(
            format!("[{}]", status.as_str().to_uppercase()),
            style_color(no_color, status_color),
        ),
    ];
    if let Some(reason) = state.lifecycle.failure() {
        spans.push(Span::styled(
            format!("  {}", reason),
            style_color(no_color, rgb(ACCENT_RED_RGB)),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_footer<B: Backend>(f: &mut Frame<'_, B>, no_color: bool, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        "q quit · p pause/resume · s stop · h help · Tab focus",
        muted_style(no_color),
    )))
    .alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn render_too_small<B: Backend>(f: &mut Frame<'_, B>, area: Rect, no_color: bool) {
    let lines = vec![
        Line::from(Span::styled(
            "Terminal too small",
            style_color(no_color, rgb(ACCENT_AMBER_RGB)),
        )),
        Line::from(format!("Minimum size: {}x{}", MIN_WIDTH, MIN_HEIGHT)),
        Line::from(format!("Current size: {}x{}", area.width, area.height)),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}
