//! Shared stub provider for integration tests. No network.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Datelike, NaiveDate, Weekday};
use tickview_core::data::{DataError, MarketDataProvider};
use tickview_core::domain::{InstrumentInfo, Interval, PriceRecord, Symbol};

/// What the stub answers with.
#[derive(Debug, Clone)]
pub enum Script {
    /// Weekday bars in `[start, end)`, optionally capped at `limit` rows.
    Weekdays { limit: Option<usize> },
    /// Valid response with no rows.
    Empty,
    /// Metadata lookup fails with "symbol not found".
    UnknownSymbol,
    /// Range lookup fails with a network error.
    Offline,
}

#[derive(Debug)]
struct Shared {
    script: Mutex<Script>,
    info_calls: AtomicUsize,
    history_calls: AtomicUsize,
}

/// Test-side view of a stub already moved into a controller: counts calls
/// and swaps the script between submissions.
#[derive(Debug, Clone)]
pub struct StubHandle(Arc<Shared>);

impl StubHandle {
    pub fn info_calls(&self) -> usize {
        self.0.info_calls.load(Ordering::SeqCst)
    }

    pub fn history_calls(&self) -> usize {
        self.0.history_calls.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.info_calls() + self.history_calls()
    }

    pub fn set_script(&self, script: Script) {
        *self.0.script.lock().unwrap() = script;
    }
}

pub struct StubProvider {
    shared: Arc<Shared>,
    exchange: &'static str,
}

impl StubProvider {
    pub fn new(script: Script) -> (Self, StubHandle) {
        let shared = Arc::new(Shared {
            script: Mutex::new(script),
            info_calls: AtomicUsize::new(0),
            history_calls: AtomicUsize::new(0),
        });
        let stub = Self {
            shared: Arc::clone(&shared),
            exchange: "NasdaqGS",
        };
        (stub, StubHandle(shared))
    }

    fn script(&self) -> Script {
        self.shared.script.lock().unwrap().clone()
    }
}

impl MarketDataProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    fn instrument_info(&self, symbol: &Symbol) -> Result<InstrumentInfo, DataError> {
        self.shared.info_calls.fetch_add(1, Ordering::SeqCst);
        if let Script::UnknownSymbol = self.script() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        Ok(InstrumentInfo {
            exchange_name: Some("NMS".into()),
            full_exchange_name: Some(self.exchange.into()),
            currency: Some("USD".into()),
            long_name: Some(format!("{symbol} Inc.")),
            ..Default::default()
        })
    }

    fn price_history(
        &self,
        _symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
        _interval: Interval,
    ) -> Result<Vec<PriceRecord>, DataError> {
        self.shared.history_calls.fetch_add(1, Ordering::SeqCst);
        match self.script() {
            Script::Weekdays { limit } => {
                let rows = weekday_bars(start, end);
                Ok(match limit {
                    Some(n) => rows.into_iter().take(n).collect(),
                    None => rows,
                })
            }
            Script::Empty => Ok(Vec::new()),
            Script::Offline => Err(DataError::NetworkUnreachable(
                "connection refused".into(),
            )),
            Script::UnknownSymbol => unreachable!("metadata lookup fails first"),
        }
    }
}

/// One synthetic bar per weekday in `[start, end)`.
pub fn weekday_bars(start: NaiveDate, end: NaiveDate) -> Vec<PriceRecord> {
    start
        .iter_days()
        .take_while(|d| *d < end)
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .enumerate()
        .map(|(i, date)| {
            let close = 180.0 + i as f64 * 0.75;
            PriceRecord {
                date,
                open: close - 0.5,
                high: close + 1.25,
                low: close - 1.0,
                close,
                volume: 50_000_000 + i as u64 * 1_000,
            }
        })
        .collect()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
