//! Keyboard input dispatch. Overlays see keys first, then global keys, then the focused field.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{shift_days, shift_months, AppState, Focus, Overlay};

const PAGE: isize = 10;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?' | 'q')) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::InstrumentInfo => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('i' | 'q')) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Keys that work regardless of focus.
    match key.code {
        KeyCode::Char('s') if ctrl => {
            app.export();
            return;
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return;
        }
        KeyCode::Down => {
            app.focus = app.focus.next();
            return;
        }
        KeyCode::Up => {
            app.focus = app.focus.prev();
            return;
        }
        KeyCode::Enter => {
            app.submit();
            return;
        }
        KeyCode::Esc => {
            app.dismiss();
            return;
        }
        KeyCode::PageDown => {
            app.scroll_table(PAGE);
            return;
        }
        KeyCode::PageUp => {
            app.scroll_table(-PAGE);
            return;
        }
        _ => {}
    }
    if ctrl {
        return;
    }

    // 3. The ticker field takes every printable character.
    if app.focus == Focus::Ticker {
        handle_ticker_key(app, key);
        return;
    }

    // 4. Field-specific keys, then single-letter commands.
    let handled = match app.focus {
        Focus::StartDate | Focus::EndDate => handle_date_key(app, key),
        Focus::Interval => handle_interval_key(app, key),
        Focus::Ticker | Focus::Submit => false,
    };
    if !handled {
        handle_command_key(app, key);
    }
}

fn handle_ticker_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => {
            if app.form.push_char(c) {
                app.touch_input();
            }
        }
        KeyCode::Backspace => {
            app.form.pop_char();
            app.touch_input();
        }
        KeyCode::Delete => {
            app.form.ticker.clear();
            app.touch_input();
        }
        _ => {}
    }
}

fn handle_date_key(app: &mut AppState, key: KeyEvent) -> bool {
    let today = app.today;
    let focus = app.focus;
    let Some(date) = app.form.date_mut(focus) else {
        return false;
    };
    *date = match key.code {
        KeyCode::Char('h') | KeyCode::Left => shift_days(*date, -1),
        KeyCode::Char('l') | KeyCode::Right => shift_days(*date, 1),
        KeyCode::Char('H') => shift_months(*date, -1),
        KeyCode::Char('L') => shift_months(*date, 1),
        KeyCode::Char('t') => today,
        _ => return false,
    };
    app.touch_input();
    true
}

fn handle_interval_key(app: &mut AppState, key: KeyEvent) -> bool {
    app.form.interval = match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.form.interval.prev(),
        KeyCode::Char('l') | KeyCode::Right => app.form.interval.next(),
        _ => return false,
    };
    app.touch_input();
    true
}

fn handle_command_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('x') => app.export(),
        KeyCode::Char('j') => app.scroll_table(1),
        KeyCode::Char('k') => app.scroll_table(-1),
        KeyCode::Char('g') | KeyCode::Home => app.scroll_table_to(true),
        KeyCode::Char('G') | KeyCode::End => app.scroll_table_to(false),
        KeyCode::Char('i') => app.overlay = Overlay::InstrumentInfo,
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
        }
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}
