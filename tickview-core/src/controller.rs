//! View controller: the state machine between user input, the fetcher and
//! the session store.
//!
//! ```text
//! Idle ──edit──▶ AwaitingInput ──submit──▶ Fetching ──Success──▶ Displaying
//!   │                                        │
//!   └───────────────submit──────────────────▶│──Error/Empty──▶ ShowingError
//! ```
//!
//! Submission is split in two so a caller can draw the `Fetching` frame
//! before the blocking provider call: [`ViewController::prepare`] runs the
//! guard and hands back a [`PendingFetch`], [`ViewController::execute`]
//! performs the fetch. [`ViewController::submit`] does both.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::data::{fetch, FetchOutcome, MarketDataProvider, EMPTY_RESULT_MESSAGE};
use crate::domain::{InstrumentInfo, Interval, QueryParameters, TimeSeriesDataset};
use crate::export::{self, ExportArtifact, ExportError};
use crate::metrics::{format_price, format_volume, summarize, MetricDisplay};
use crate::session::SessionStore;

/// Acknowledgment returned once after a successful fetch.
pub const LOADED_MESSAGE: &str = "Data loaded successfully!";

/// Progress text while a fetch is outstanding.
pub const FETCHING_MESSAGE: &str = "Fetching stock data...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    AwaitingInput,
    Fetching,
    Displaying,
    ShowingError,
}

impl ViewState {
    pub fn label(self) -> &'static str {
        match self {
            ViewState::Idle => "Idle",
            ViewState::AwaitingInput => "Awaiting input",
            ViewState::Fetching => "Fetching",
            ViewState::Displaying => "Displaying",
            ViewState::ShowingError => "Error",
        }
    }
}

/// Which stage rejected a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input failed the guard; no provider call was made.
    Validation,
    /// The provider could not be reached.
    Network,
    /// The provider answered, but not with usable data.
    Provider,
    /// The provider answered with zero rows.
    EmptyResult,
}

/// User-visible error attached to the `ShowingError` state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewError {
    pub kind: ErrorKind,
    pub message: String,
}

impl std::fmt::Display for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ViewError {}

/// Raw values from the input widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryInput {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interval: Interval,
}

/// A query that passed the guard and is waiting for [`ViewController::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a prepared fetch does nothing until executed"]
pub struct PendingFetch {
    query: QueryParameters,
}

impl PendingFetch {
    pub fn query(&self) -> &QueryParameters {
        &self.query
    }
}

/// Read-only snapshot of everything the screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel<'a> {
    pub state: ViewState,
    pub progress: Option<&'static str>,
    pub error: Option<&'a ViewError>,
    pub data: Option<DataView<'a>>,
}

/// The data section: header, metrics, table and export affordance.
#[derive(Debug, Clone, PartialEq)]
pub struct DataView<'a> {
    pub header: String,
    pub metrics: [MetricDisplay; 5],
    pub dataset: &'a TimeSeriesDataset,
    pub info: &'a InstrumentInfo,
    pub export_file_name: String,
}

/// One formatted table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

impl<'a> DataView<'a> {
    /// Table rows, newest first.
    pub fn table_rows(&self) -> impl Iterator<Item = TableRow> + 'a {
        let dataset: &'a TimeSeriesDataset = self.dataset;
        dataset.descending().map(|r| TableRow {
            date: r.date.format("%Y-%m-%d").to_string(),
            open: format_price(r.open),
            high: format_price(r.high),
            low: format_price(r.low),
            close: format_price(r.close),
            volume: format_volume(r.volume),
        })
    }

    pub fn row_count(&self) -> usize {
        self.dataset.len()
    }
}

pub struct ViewController {
    provider: Box<dyn MarketDataProvider>,
    session: SessionStore,
    state: ViewState,
    error: Option<ViewError>,
}

impl ViewController {
    pub fn new(provider: Box<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            session: SessionStore::new(),
            state: ViewState::Idle,
            error: None,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn error(&self) -> Option<&ViewError> {
        self.error.as_ref()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// The user started editing a field.
    pub fn begin_input(&mut self) {
        if self.state == ViewState::Idle {
            self.state = ViewState::AwaitingInput;
        }
    }

    /// Clear the current error and fall back to the underlying state.
    pub fn dismiss_error(&mut self) {
        if self.state != ViewState::ShowingError {
            return;
        }
        self.error = None;
        self.state = if self.session.has_data() {
            ViewState::Displaying
        } else {
            ViewState::AwaitingInput
        };
    }

    /// Run the submission guard. On success the controller is `Fetching`.
    pub fn prepare(&mut self, input: &QueryInput) -> Result<PendingFetch, ViewError> {
        match QueryParameters::new(&input.symbol, input.start_date, input.end_date, input.interval)
        {
            Ok(query) => {
                debug!(
                    symbol = %query.symbol(),
                    start = %query.start_date(),
                    end = %query.end_date(),
                    interval = %query.interval(),
                    "submission accepted"
                );
                self.error = None;
                self.state = ViewState::Fetching;
                Ok(PendingFetch { query })
            }
            Err(e) => {
                info!(error = %e, "submission rejected");
                Err(self.fail(ErrorKind::Validation, e.to_string()))
            }
        }
    }

    /// Perform the blocking fetch and apply its outcome.
    ///
    /// Only a `Success` touches the session store.
    pub fn execute(&mut self, pending: PendingFetch) -> Result<&'static str, ViewError> {
        let query = pending.query;
        let outcome = fetch(
            self.provider.as_ref(),
            query.symbol(),
            query.start_date(),
            query.end_date(),
            query.interval(),
        );

        match outcome {
            FetchOutcome::Success { dataset, info } => {
                self.session.replace(dataset, info);
                self.error = None;
                self.state = ViewState::Displaying;
                Ok(LOADED_MESSAGE)
            }
            FetchOutcome::EmptyResult => {
                Err(self.fail(ErrorKind::EmptyResult, EMPTY_RESULT_MESSAGE.to_string()))
            }
            FetchOutcome::Error { message, network } => {
                warn!(symbol = %query.symbol(), network, "fetch failed");
                let kind = if network {
                    ErrorKind::Network
                } else {
                    ErrorKind::Provider
                };
                Err(self.fail(kind, message))
            }
        }
    }

    /// Guard and fetch in one step.
    pub fn submit(&mut self, input: &QueryInput) -> Result<&'static str, ViewError> {
        let pending = self.prepare(input)?;
        self.execute(pending)
    }

    /// Build the view from the session store. Never mutates.
    pub fn render(&self) -> ViewModel<'_> {
        let data = match (self.session.dataset(), self.session.info()) {
            (Some(dataset), Some(info)) => summarize(Some(dataset)).map(|summary| DataView {
                header: format!("{} ({}) Stock Data", dataset.symbol(), info.market_name()),
                metrics: summary.display(),
                dataset,
                info,
                export_file_name: export::export_file_name(dataset.symbol()),
            }),
            _ => None,
        };

        ViewModel {
            state: self.state,
            progress: (self.state == ViewState::Fetching).then_some(FETCHING_MESSAGE),
            error: self.error.as_ref(),
            data,
        }
    }

    /// Serialize the stored dataset for download.
    pub fn export(&self) -> Result<ExportArtifact, ExportError> {
        let dataset = self.session.dataset().ok_or(ExportError::NoData)?;
        export::to_csv(dataset)
    }

    fn fail(&mut self, kind: ErrorKind, message: String) -> ViewError {
        let err = ViewError { kind, message };
        self.error = Some(err.clone());
        self.state = ViewState::ShowingError;
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataError;
    use crate::domain::{PriceRecord, Symbol};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Scripted {
        rows: usize,
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    impl MarketDataProvider for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn instrument_info(&self, _symbol: &Symbol) -> Result<InstrumentInfo, DataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(DataError::NetworkUnreachable("offline".into()));
            }
            Ok(InstrumentInfo {
                full_exchange_name: Some("NasdaqGS".into()),
                ..Default::default()
            })
        }

        fn price_history(
            &self,
            _symbol: &Symbol,
            start: NaiveDate,
            _end: NaiveDate,
            _interval: Interval,
        ) -> Result<Vec<PriceRecord>, DataError> {
            Ok((0..self.rows as u64)
                .map(|i| PriceRecord {
                    date: start + chrono::Days::new(i),
                    open: 10.0,
                    high: 11.0,
                    low: 9.0,
                    close: 10.5 + i as f64,
                    volume: 1000 * (i + 1),
                })
                .collect())
        }
    }

    fn controller(rows: usize, fail: bool) -> (ViewController, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = Scripted {
            rows,
            fail,
            calls: Arc::clone(&calls),
        };
        (ViewController::new(Box::new(provider)), calls)
    }

    fn input(symbol: &str, start: (i32, u32, u32), end: (i32, u32, u32)) -> QueryInput {
        QueryInput {
            symbol: symbol.into(),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            interval: Interval::Daily,
        }
    }

    #[test]
    fn starts_idle_and_moves_to_awaiting_input() {
        let (mut c, _) = controller(1, false);
        assert_eq!(c.state(), ViewState::Idle);
        assert!(c.render().data.is_none());
        c.begin_input();
        assert_eq!(c.state(), ViewState::AwaitingInput);
    }

    #[test]
    fn prepare_enters_fetching_with_progress_text() {
        let (mut c, calls) = controller(1, false);
        let pending = c.prepare(&input("aapl", (2024, 1, 1), (2024, 1, 31))).unwrap();
        assert_eq!(pending.query().symbol().as_str(), "AAPL");
        assert_eq!(c.state(), ViewState::Fetching);
        assert_eq!(c.render().progress, Some("Fetching stock data..."));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(c.execute(pending), Ok(LOADED_MESSAGE));
        assert_eq!(c.state(), ViewState::Displaying);
        assert_eq!(c.render().progress, None);
    }

    #[test]
    fn date_guard_blocks_fetch() {
        let (mut c, calls) = controller(1, false);
        let err = c.submit(&input("AAPL", (2024, 2, 1), (2024, 2, 1))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "End date must be after start date.");
        assert_eq!(c.state(), ViewState::ShowingError);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_symbol_is_validation_error() {
        let (mut c, calls) = controller(1, false);
        let err = c.submit(&input("   ", (2024, 1, 1), (2024, 1, 31))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_result_is_distinct_from_provider_error() {
        let (mut c, _) = controller(0, false);
        let err = c.submit(&input("AAPL", (2024, 1, 6), (2024, 1, 7))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyResult);
        assert_eq!(err.message, "No data available for the selected date range.");

        let (mut c, _) = controller(3, true);
        let err = c.submit(&input("AAPL", (2024, 1, 1), (2024, 1, 31))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Network);
        assert!(err.message.starts_with("Error fetching data"));
    }

    #[test]
    fn error_keeps_prior_data_and_dismiss_returns_to_displaying() {
        let (mut c, _) = controller(2, false);
        c.submit(&input("AAPL", (2024, 1, 1), (2024, 1, 31))).unwrap();
        let before = c.session().clone();

        c.submit(&input("AAPL", (2024, 3, 1), (2024, 2, 1))).unwrap_err();
        assert_eq!(c.state(), ViewState::ShowingError);
        assert_eq!(c.session(), &before);
        let view = c.render();
        assert!(view.error.is_some());
        assert_eq!(view.data.unwrap().row_count(), 2);

        c.dismiss_error();
        assert_eq!(c.state(), ViewState::Displaying);
        assert!(c.error().is_none());
    }

    #[test]
    fn dismiss_without_data_returns_to_input() {
        let (mut c, _) = controller(0, false);
        c.submit(&input("AAPL", (2024, 1, 1), (2024, 1, 2))).unwrap_err();
        c.dismiss_error();
        assert_eq!(c.state(), ViewState::AwaitingInput);
    }

    #[test]
    fn render_builds_header_metrics_and_descending_rows() {
        let (mut c, _) = controller(3, false);
        c.submit(&input("aapl", (2024, 1, 2), (2024, 1, 31))).unwrap();
        let view = c.render();
        let data = view.data.expect("data present");

        assert_eq!(data.header, "AAPL (NasdaqGS) Stock Data");
        assert_eq!(data.export_file_name, "AAPL_stock_data.csv");
        assert_eq!(data.metrics[1].value, "12.50");
        assert_eq!(data.metrics[4].value, "3,000");

        let dates: Vec<String> = data.table_rows().map(|r| r.date).collect();
        assert_eq!(dates, vec!["2024-01-04", "2024-01-03", "2024-01-02"]);
    }

    #[test]
    fn export_requires_data() {
        let (mut c, _) = controller(2, false);
        assert!(matches!(c.export(), Err(ExportError::NoData)));
        c.submit(&input("AAPL", (2024, 1, 1), (2024, 1, 31))).unwrap();
        let artifact = c.export().unwrap();
        assert_eq!(artifact.file_name, "AAPL_stock_data.csv");
    }
}
