use ratatui::style::{Color, Modifier, Style};

pub(super) const MIN_WIDTH: u16 = 80;
pub(super) const MIN_HEIGHT: u16 = 24;
pub(super) const TITLE_HEIGHT: u16 = 1;
pub(super) const FOOTER_HEIGHT: u16 = 1;
pub(super) const TOP_ROW_HEIGHT: u16 = 9;
pub(super) const PROGRESS_HEIGHT: u16 = 4;
pub(super) const PROGRESS_DETAILS_HEIGHT: u16 = 7;
pub(super) const BOTTOM_MIN_HEIGHT: u16 = 6;
pub(super) const BOTTOM_COL_PERCENT: u16 = 33;

pub(super) const CHART_BG_RGB: (u8, u8, u8) = (0x0a, 0x0a, 0x0a);
pub(super) const PANEL_BORDER_RGB: (u8, u8, u8) = (0xe5, 0xe7, 0xeb);
pub(super) const PANEL_TEXT_RGB: (u8, u8, u8) = (0xff, 0xff, 0xff);
pub(super) const PANEL_MUTED_RGB: (u8, u8, u8) = (0xd1, 0xd5, 0xdb);
pub(super) const ACCENT_FOCUS_RGB: (u8, u8, u8) = (0xff, 0x5f, 0xc8);
pub(super) const ACCENT_PROGRESS_RGB: (u8, u8, u8) = (0x22, 0xd3, 0xee);
pub(super) const ACCENT_RATE_RGB: (u8, u8, u8) = (0x60, 0xa5, 0xfa);
pub(super) const ACCENT_DATA_RGB: (u8, u8, u8) = (0xa7, 0x8b, 0xfa);
pub(super) const ACCENT_LATENCY_RGB: (u8, u8, u8) = (0xf4, 0x72, 0xb6);
pub(super) const ACCENT_GREEN_RGB: (u8, u8, u8) = (0x22, 0xc5, 0x5e);
pub(super) const ACCENT_AMBER_RGB: (u8, u8, u8) = (0xf5, 0x9e, 0x0b);
pub(super) const ACCENT_RED_RGB: (u8, u8, u8) = (0xef, 0x44, 0x44);

pub(super) fn style_color(no_color: bool, color: Color) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default().fg(color)
    }
}

pub(super) const fn rgb(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub(super) fn panel_block_style(no_color: bool) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default()
            .bg(rgb(CHART_BG_RGB))
            .fg(rgb(PANEL_TEXT_RGB))
    }
}

pub(super) fn panel_border_style(no_color: bool, focused: bool) -> Style {
    match (no_color, focused) {
        (true, true) => Style::default().add_modifier(Modifier::BOLD),
        (true, false) => Style::default(),
        (false, true) => Style::default()
            .fg(rgb(ACCENT_FOCUS_RGB))
            .add_modifier(Modifier::BOLD),
        (false, false) => Style::default().fg(rgb(PANEL_BORDER_RGB)),
    }
}

pub(super) fn panel_title_style(no_color: bool) -> Style {
    if no_color {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(rgb(PANEL_TEXT_RGB))
            .add_modifier(Modifier::BOLD)
    }
}

pub(super) fn muted_style(no_color: bool) -> Style {
    style_color(no_color, rgb(PANEL_MUTED_RGB))
}

pub(super) fn app_background_style(no_color: bool) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default().bg(rgb(CHART_BG_RGB))
    }
}

/// Green under 1% errors, amber under 5%, red above.
pub(super) fn error_rate_color(error_rate_x100: u64) -> Color {
    if error_rate_x100 < 100 {
        rgb(ACCENT_GREEN_RGB)
    } else if error_rate_x100 < 500 {
        rgb(ACCENT_AMBER_RGB)
    } else {
        rgb(ACCENT_RED_RGB)
    }
}

pub(super) fn status_code_color(code: u16) -> Color {
    match code {
        200..=299 => rgb(ACCENT_GREEN_RGB),
        300..=399 => rgb(ACCENT_RATE_RGB),
        400..=499 => rgb(ACCENT_AMBER_RGB),
        _ => rgb(ACCENT_RED_RGB),
    }
}
