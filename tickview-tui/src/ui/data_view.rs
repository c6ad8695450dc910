//! Main area: progress, inline error, header, metrics, history table and the
//! export affordance.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use tickview_core::{DataView, ViewModel};

use crate::app::AppState;
use crate::theme;

const COLUMNS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

pub fn render(f: &mut Frame, area: Rect, app: &AppState, view: &ViewModel<'_>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(false));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut constraints = Vec::new();
    if view.progress.is_some() {
        constraints.push(Constraint::Length(1));
    }
    if view.error.is_some() {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let mut slot = 0;
    if let Some(progress) = view.progress {
        f.render_widget(
            Paragraph::new(Span::styled(progress, theme::warning())),
            chunks[slot],
        );
        slot += 1;
    }
    if let Some(err) = view.error {
        let banner = Paragraph::new(vec![
            Line::from(Span::styled(err.message.as_str(), theme::negative())),
            Line::from(Span::styled("[Esc] dismiss  [e] error history", theme::muted())),
        ])
        .wrap(Wrap { trim: true });
        f.render_widget(banner, chunks[slot]);
        slot += 1;
    }
    let body = chunks[slot];

    match &view.data {
        Some(data) => render_data(f, body, app, data),
        None => {
            let hint = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Enter a ticker, pick a date range and press Enter to get stock data.",
                    theme::muted(),
                )),
            ])
            .wrap(Wrap { trim: true });
            f.render_widget(hint, body);
        }
    }
}

fn render_data(f: &mut Frame, area: Rect, app: &AppState, data: &DataView<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(Span::styled(data.header.as_str(), theme::accent_bold())),
        chunks[0],
    );
    render_metrics(f, chunks[1], data);
    render_table(f, chunks[2], app, data);

    let export = Line::from(vec![
        Span::styled("[x] Export to CSV", theme::accent()),
        Span::styled(format!("  {}", data.export_file_name), theme::muted()),
    ]);
    f.render_widget(Paragraph::new(export), chunks[3]);
}

fn render_metrics(f: &mut Frame, area: Rect, data: &DataView<'_>) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    for (metric, cell) in data.metrics.iter().zip(cells.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::muted())
            .title(metric.label)
            .title_style(theme::muted());
        let value = Paragraph::new(Span::styled(metric.value.as_str(), theme::accent_bold()))
            .block(block);
        f.render_widget(value, *cell);
    }
}

fn render_table(f: &mut Frame, area: Rect, app: &AppState, data: &DataView<'_>) {
    let header = Row::new(COLUMNS.iter().map(|c| Cell::from(*c)))
        .style(theme::accent().add_modifier(Modifier::BOLD));

    let visible = area.height.saturating_sub(3) as usize;
    let rows = data
        .dataset
        .descending()
        .zip(data.table_rows())
        .skip(app.table_scroll)
        .take(visible.max(1))
        .map(|(record, row)| {
            let tone = theme::bar(record.open, record.close);
            Row::new(vec![
                Cell::from(row.date).style(theme::text()),
                Cell::from(row.open),
                Cell::from(row.high),
                Cell::from(row.low),
                Cell::from(row.close).style(tone),
                Cell::from(row.volume).style(theme::muted()),
            ])
        });

    let widths = [
        Constraint::Length(10),
        Constraint::Min(10),
        Constraint::Min(10),
        Constraint::Min(10),
        Constraint::Min(10),
        Constraint::Min(14),
    ];

    let title = format!(
        " {} rows, newest first [{}-{}] ",
        data.row_count(),
        app.table_scroll + 1,
        (app.table_scroll + visible).min(data.row_count())
    );
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::muted())
            .title(title)
            .title_style(theme::muted()),
    );
    f.render_widget(table, area);
}
