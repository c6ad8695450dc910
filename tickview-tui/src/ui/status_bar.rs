//! Bottom status bar: controller state, last status message, key hints.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use tickview_core::ViewState;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    let state = app.controller.state();
    let state_style = match state {
        ViewState::Fetching => theme::warning(),
        ViewState::ShowingError => theme::negative(),
        ViewState::Displaying => theme::positive(),
        ViewState::Idle | ViewState::AwaitingInput => theme::neutral(),
    };
    spans.push(Span::styled(format!(" {} ", state.label()), state_style));
    spans.push(Span::raw("| "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
        spans.push(Span::raw(" | "));
    }

    spans.push(Span::styled(
        "Tab:field Enter:fetch x:export i:info e:errors ?:help q:quit",
        theme::muted(),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
