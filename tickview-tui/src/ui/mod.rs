//! Top-level UI layout: title, input sidebar, data area, status bar.

pub mod data_view;
pub mod overlays;
pub mod sidebar;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, Overlay};
use crate::theme;

pub const TITLE: &str = "Worldwide Stock Data Viewer";
pub const SUBTITLE: &str = "View historical stock data of - US,UK,IN,JAPAN,CHINA Markets etc.";

const SIDEBAR_WIDTH: u16 = 34;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_title(f, rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(rows[1]);

    // One snapshot per frame; the controller is not touched while drawing.
    let view = app.controller.render();
    sidebar::render(f, body[0], app);
    data_view::render(f, body[1], app, &view);
    status_bar::render(f, rows[2], app);

    match app.overlay {
        Overlay::Help => overlays::render_help(f, body[1]),
        Overlay::ErrorHistory => overlays::render_error_history(f, body[1], app),
        Overlay::InstrumentInfo => overlays::render_instrument_info(f, body[1], &view),
        Overlay::None => {}
    }
}

fn draw_title(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(TITLE, theme::accent_bold())),
        Line::from(Span::styled(SUBTITLE, theme::muted())),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
