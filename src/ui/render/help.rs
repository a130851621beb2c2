use ratatui::{
    layout::Rect,
    prelude::{Backend, Frame},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::model::DashboardState;

use super::theme::{muted_style, panel_block_style, panel_border_style, panel_title_style};

const KEYS: [(&str, &str); 13] = [
    ("q / Ctrl-C", "stop the run and quit"),
    ("p", "pause or resume"),
    ("s", "stop the run, keep the final screen"),
    ("h", "toggle this help"),
    ("Esc", "close help"),
    ("Tab", "focus next panel"),
    ("Shift-Tab", "focus previous panel"),
    ("d", "Progress: toggle details"),
    ("c", "Status Codes: toggle table view"),
    ("o", "Status Codes: sort by count or code"),
    ("m", "History: switch between RPS and p50 latency"),
    ("t", "Errors: toggle timestamps"),
    ("Up / Down", "Errors: scroll"),
];

pub(super) fn render_help<B: Backend>(f: &mut Frame<'_, B>, state: &DashboardState, area: Rect) {
    let no_color = state.settings.no_color;
    let mut lines: Vec<Line<'static>> = KEYS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("  {:<12}", key), panel_title_style(no_color)),
                Span::styled(*action, muted_style(no_color)),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press h or Esc to return",
        muted_style(no_color),
    )));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .style(panel_block_style(no_color))
        .border_style(panel_border_style(no_color, true))
        .title_style(panel_title_style(no_color));
    f.render_widget(Paragraph::new(lines).block(block), area);
}
