//! "Input Parameters" sidebar: ticker, dates, interval, submit button.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use tickview_core::domain::MAX_SYMBOL_LEN;

use crate::app::{AppState, Focus};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(true))
        .title(" Input Parameters ")
        .title_style(theme::accent_bold());

    let form = &app.form;
    let mut lines: Vec<Line> = Vec::new();

    let cursor = if app.focus == Focus::Ticker { "_" } else { "" };
    field(
        &mut lines,
        app,
        Focus::Ticker,
        format!("{}{cursor}", form.ticker),
    );
    lines.push(Line::from(Span::styled(
        format!("  e.g. AAPL, RELIANCE.NS ({}/{MAX_SYMBOL_LEN})", form.ticker.chars().count()),
        theme::muted(),
    )));
    lines.push(Line::from(""));

    field(
        &mut lines,
        app,
        Focus::EndDate,
        form.end_date.format("%Y-%m-%d").to_string(),
    );
    lines.push(Line::from(""));
    field(
        &mut lines,
        app,
        Focus::StartDate,
        form.start_date.format("%Y-%m-%d").to_string(),
    );
    lines.push(Line::from(""));
    field(
        &mut lines,
        app,
        Focus::Interval,
        format!("< {} >", form.interval.label()),
    );
    lines.push(Line::from(""));

    let button_style = if app.focus == Focus::Submit {
        theme::focused_field()
    } else {
        theme::accent()
    };
    lines.push(Line::from(Span::styled(
        format!("[ {} ]", Focus::Submit.label()),
        button_style,
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(hint(app.focus), theme::muted())));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn field<'a>(lines: &mut Vec<Line<'a>>, app: &AppState, which: Focus, value: String) {
    let focused = app.focus == which;
    let value_style: Style = if focused {
        theme::focused_field()
    } else {
        theme::text()
    };
    lines.push(Line::from(Span::styled(which.label(), theme::muted())));
    lines.push(Line::from(vec![
        Span::raw(" "),
        Span::styled(value, value_style),
    ]));
}

fn hint(focus: Focus) -> &'static str {
    match focus {
        Focus::Ticker => "type to edit, Enter to fetch",
        Focus::StartDate | Focus::EndDate => "h/l day  H/L month  t today",
        Focus::Interval => "Left/Right to change",
        Focus::Submit => "Enter to fetch, ? for help",
    }
}
