//! Overlay widgets: help, error history, instrument details.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use tickview_core::ViewModel;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// Keyboard reference.
pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [Esc]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Input");
    key(&mut lines, "Tab / Shift+Tab", "Next / previous field");
    key(&mut lines, "Up / Down", "Previous / next field");
    key(&mut lines, "type, Backspace", "Edit the ticker (max 15 characters)");
    key(&mut lines, "h / l, Left / Right", "Date: one day back / forward");
    key(&mut lines, "H / L", "Date: one month back / forward");
    key(&mut lines, "t", "Date: today");
    key(&mut lines, "Left / Right", "Interval: cycle Daily, Weekly, Monthly");
    key(&mut lines, "Enter", "Get stock data");
    lines.push(Line::from(""));

    section(&mut lines, "Data");
    key(&mut lines, "j / k", "Scroll table one row");
    key(&mut lines, "PgDn / PgUp", "Scroll table one page");
    key(&mut lines, "g / G", "Jump to newest / oldest row");
    key(&mut lines, "x, Ctrl+S", "Export to CSV");
    key(&mut lines, "i", "Instrument details");
    lines.push(Line::from(""));

    section(&mut lines, "General");
    key(&mut lines, "e", "Error history");
    key(&mut lines, "Esc", "Dismiss error or overlay");
    key(&mut lines, "q, Ctrl+C", "Quit (q only outside the ticker field)");

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(90, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app
        .error_history
        .iter()
        .enumerate()
        .skip(app.error_scroll)
        .take(inner.height as usize)
    {
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// Metadata of the stored instrument.
pub fn render_instrument_info(f: &mut Frame, area: Rect, view: &ViewModel<'_>) {
    let popup = centered_rect(60, 50, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Instrument [Esc]close ")
        .title_style(theme::accent_bold());

    let Some(data) = &view.data else {
        let text = Paragraph::new(Span::styled(
            "No instrument loaded yet. Fetch stock data first.",
            theme::muted(),
        ))
        .block(block);
        f.render_widget(text, popup);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        data.dataset.symbol().to_string(),
        theme::accent_bold(),
    )));
    lines.push(Line::from(""));
    for (label, value) in data.info.display_fields() {
        field_line(&mut lines, label, value);
    }
    lines.push(Line::from(""));
    field_line(&mut lines, "Interval", data.dataset.interval().label());
    field_line(
        &mut lines,
        "Range",
        &format!("{} to {}", data.dataset.first_date(), data.dataset.last_date()),
    );
    field_line(&mut lines, "Rows", &data.row_count().to_string());

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn section(lines: &mut Vec<Line<'_>>, title: &'static str) {
    lines.push(Line::from(Span::styled(title, theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &'static str, action: &'static str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:>20}  "), theme::accent()),
        Span::styled(action, theme::muted()),
    ]));
}

fn field_line(lines: &mut Vec<Line<'_>>, label: &str, value: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {label:>14}: "), theme::muted()),
        Span::styled(value.to_string(), theme::text()),
    ]));
}
