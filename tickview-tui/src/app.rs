//! Application state: single-owner, main-thread only.
//!
//! The form widgets, overlays and error history live here. Everything the
//! data area shows comes from the [`ViewController`] it owns.

use std::collections::VecDeque;
use std::path::PathBuf;

use chrono::{Days, Months, NaiveDate, NaiveDateTime};
use tracing::info;

use tickview_core::controller::{ErrorKind, PendingFetch, QueryInput, ViewController};
use tickview_core::domain::{Interval, MAX_SYMBOL_LEN};
use tickview_core::{ViewerConfig, FETCHING_MESSAGE};

use crate::download;

/// Maximum number of entries kept in the error history.
pub const ERROR_HISTORY_CAP: usize = 50;

/// Which sidebar widget has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Ticker,
    EndDate,
    StartDate,
    Interval,
    Submit,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Ticker,
        Focus::EndDate,
        Focus::StartDate,
        Focus::Interval,
        Focus::Submit,
    ];

    pub fn index(self) -> usize {
        match self {
            Focus::Ticker => 0,
            Focus::EndDate => 1,
            Focus::StartDate => 2,
            Focus::Interval => 3,
            Focus::Submit => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::Ticker => "Enter Stock Ticker",
            Focus::EndDate => "End Date",
            Focus::StartDate => "Start Date",
            Focus::Interval => "Data Interval",
            Focus::Submit => "Get Stock Data",
        }
    }

    pub fn next(self) -> Focus {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Focus {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Network,
    Data,
    Export,
    Config,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Validation => "INPUT",
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Export => "EXPORT",
            ErrorCategory::Config => "CONFIG",
        }
    }
}

impl From<ErrorKind> for ErrorCategory {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Validation => ErrorCategory::Validation,
            ErrorKind::Network => ErrorCategory::Network,
            ErrorKind::Provider => ErrorCategory::Data,
            ErrorKind::EmptyResult => ErrorCategory::Data,
        }
    }
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    ErrorHistory,
    InstrumentInfo,
}

/// Raw contents of the input sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interval: Interval,
}

impl FormState {
    pub fn from_config(config: &ViewerConfig, today: NaiveDate) -> Self {
        let (start_date, end_date) = config.default_range(today);
        let mut form = Self {
            ticker: String::new(),
            start_date,
            end_date,
            interval: config.default_interval,
        };
        for c in config.default_symbol.chars() {
            form.push_char(c);
        }
        form
    }

    /// Append to the ticker, ignoring input once it is full.
    pub fn push_char(&mut self, c: char) -> bool {
        if c.is_control() || self.ticker.chars().count() >= MAX_SYMBOL_LEN {
            return false;
        }
        self.ticker.push(c);
        true
    }

    pub fn pop_char(&mut self) {
        self.ticker.pop();
    }

    pub fn query_input(&self) -> QueryInput {
        QueryInput {
            symbol: self.ticker.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            interval: self.interval,
        }
    }

    /// The date edited by `focus`, if it is a date field.
    pub fn date_mut(&mut self, focus: Focus) -> Option<&mut NaiveDate> {
        match focus {
            Focus::StartDate => Some(&mut self.start_date),
            Focus::EndDate => Some(&mut self.end_date),
            _ => None,
        }
    }
}

/// Shift a date by whole days; out-of-range results leave it unchanged.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    };
    shifted.unwrap_or(date)
}

/// Shift a date by whole months, clamping to the last day of the month.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let step = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        date.checked_add_months(step)
    } else {
        date.checked_sub_months(step)
    };
    shifted.unwrap_or(date)
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub focus: Focus,
    pub form: FormState,
    pub controller: ViewController,

    /// Set by a submission that passed the guard; run after the next draw.
    pub pending: Option<PendingFetch>,

    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub table_scroll: usize,

    pub export_dir: PathBuf,
    pub today: NaiveDate,
}

impl AppState {
    pub fn new(controller: ViewController, config: &ViewerConfig, today: NaiveDate) -> Self {
        Self {
            running: true,
            focus: Focus::Ticker,
            form: FormState::from_config(config, today),
            controller,
            pending: None,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            table_scroll: 0,
            export_dir: config.export_dir.clone(),
            today,
        }
    }

    /// Push an error to the history, capping at [`ERROR_HISTORY_CAP`].
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        self.error_history.truncate(ERROR_HISTORY_CAP);
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    /// A form field changed.
    pub fn touch_input(&mut self) {
        self.controller.begin_input();
    }

    /// Run the guard. A passing submission is queued for [`Self::run_pending_fetch`].
    pub fn submit(&mut self) {
        let input = self.form.query_input();
        match self.controller.prepare(&input) {
            Ok(pending) => {
                self.pending = Some(pending);
                self.set_warning(FETCHING_MESSAGE);
            }
            Err(e) => {
                let context = format!(
                    "{} {}..{} {}",
                    input.symbol.trim(),
                    input.start_date,
                    input.end_date,
                    input.interval.label()
                );
                self.push_error(e.kind.into(), e.message, context);
            }
        }
    }

    /// Execute a queued fetch, if any. Blocks until the provider answers.
    pub fn run_pending_fetch(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let context = pending.query().symbol().to_string();
        match self.controller.execute(pending) {
            Ok(ack) => {
                self.table_scroll = 0;
                self.set_status(ack);
            }
            Err(e) => self.push_error(e.kind.into(), e.message, context),
        }
    }

    /// Serialize the stored dataset and write it to the export directory.
    pub fn export(&mut self) {
        let artifact = match self.controller.export() {
            Ok(artifact) => artifact,
            Err(e) => {
                self.push_error(ErrorCategory::Export, e.to_string(), String::new());
                return;
            }
        };
        match download::save(&artifact, &self.export_dir) {
            Ok(path) => {
                info!(path = %path.display(), bytes = artifact.payload.len(), "exported CSV");
                self.set_status(format!("Exported {}", path.display()));
            }
            Err(e) => self.push_error(
                ErrorCategory::Export,
                format!("{e:#}"),
                artifact.file_name.clone(),
            ),
        }
    }

    /// Esc outside overlays: dismiss the inline error, else clear the status line.
    pub fn dismiss(&mut self) {
        if self.controller.error().is_some() {
            self.controller.dismiss_error();
        } else {
            self.status_message = None;
        }
    }

    pub fn table_len(&self) -> usize {
        self.controller.session().dataset().map_or(0, |d| d.len())
    }

    pub fn scroll_table(&mut self, delta: isize) {
        let max = self.table_len().saturating_sub(1);
        self.table_scroll = self.table_scroll.saturating_add_signed(delta).min(max);
    }

    pub fn scroll_table_to(&mut self, top: bool) {
        self.table_scroll = if top {
            0
        } else {
            self.table_len().saturating_sub(1)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{app_with, date, StubScript};

    #[test]
    fn focus_cycle() {
        assert_eq!(Focus::Ticker.next(), Focus::EndDate);
        assert_eq!(Focus::Submit.next(), Focus::Ticker);
        assert_eq!(Focus::Ticker.prev(), Focus::Submit);
        for f in Focus::ORDER {
            assert_eq!(f.next().prev(), f);
        }
    }

    #[test]
    fn error_history_caps_at_50() {
        let mut app = app_with(StubScript::Rows(1));
        for i in 0..60 {
            app.push_error(ErrorCategory::Data, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn form_defaults_follow_config() {
        let config = ViewerConfig {
            default_symbol: "sony".into(),
            lookback_days: 7,
            default_interval: Interval::Monthly,
            ..ViewerConfig::default()
        };
        let form = FormState::from_config(&config, date(2024, 6, 15));
        assert_eq!(form.ticker, "sony");
        assert_eq!(form.start_date, date(2024, 6, 8));
        assert_eq!(form.end_date, date(2024, 6, 15));
        assert_eq!(form.interval, Interval::Monthly);
    }

    #[test]
    fn ticker_is_capped() {
        let mut form = FormState::from_config(&ViewerConfig::default(), date(2024, 1, 1));
        for c in "ABCDEFGHIJKLMNOPQRSTUVWXYZ".chars() {
            form.push_char(c);
        }
        assert_eq!(form.ticker.chars().count(), MAX_SYMBOL_LEN);
        assert!(form.ticker.starts_with("AAPL"));
    }

    #[test]
    fn month_shift_clamps() {
        assert_eq!(shift_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(shift_months(date(2024, 3, 31), -1), date(2024, 2, 29));
        assert_eq!(shift_days(date(2024, 3, 1), -1), date(2024, 2, 29));
        assert_eq!(shift_days(NaiveDate::MAX, 1), NaiveDate::MAX);
    }

    #[test]
    fn submit_then_run_pending_fetch() {
        let mut app = app_with(StubScript::Rows(4));
        app.submit();
        assert!(app.pending.is_some());
        assert_eq!(
            app.status_message,
            Some(("Fetching stock data...".to_string(), StatusLevel::Warning))
        );

        app.run_pending_fetch();
        assert!(app.pending.is_none());
        assert_eq!(app.table_len(), 4);
        assert_eq!(
            app.status_message,
            Some(("Data loaded successfully!".to_string(), StatusLevel::Info))
        );
    }

    #[test]
    fn unknown_symbol_is_recorded_as_data() {
        let mut app = app_with(StubScript::Fail);
        app.submit();
        app.run_pending_fetch();
        let record = &app.error_history[0];
        assert_eq!(record.category, ErrorCategory::Data);
        assert!(record.message.starts_with("Error fetching data"));
        assert_eq!(record.context, "AAPL");
    }

    #[test]
    fn unreachable_provider_is_recorded_as_network() {
        let mut app = app_with(StubScript::Offline);
        app.submit();
        app.run_pending_fetch();
        let record = &app.error_history[0];
        assert_eq!(record.category, ErrorCategory::Network);
        assert!(record.message.contains("connection refused"));
    }

    #[test]
    fn export_without_data_is_recorded() {
        let mut app = app_with(StubScript::Rows(1));
        app.export();
        assert_eq!(app.error_history[0].category, ErrorCategory::Export);
    }

    #[test]
    fn table_scroll_is_bounded() {
        let mut app = app_with(StubScript::Rows(3));
        app.submit();
        app.run_pending_fetch();
        app.scroll_table(10);
        assert_eq!(app.table_scroll, 2);
        app.scroll_table(-10);
        assert_eq!(app.table_scroll, 0);
        app.scroll_table_to(false);
        assert_eq!(app.table_scroll, 2);
    }

    #[test]
    fn esc_dismisses_inline_error_first() {
        let mut app = app_with(StubScript::Rows(1));
        app.form.end_date = app.form.start_date;
        app.submit();
        assert!(app.controller.error().is_some());
        app.dismiss();
        assert!(app.controller.error().is_none());
        assert!(app.status_message.is_some());
        app.dismiss();
        assert!(app.status_message.is_none());
    }
}
