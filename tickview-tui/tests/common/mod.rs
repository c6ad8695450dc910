//! Counting stub provider and app builder for TUI integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tickview_core::data::{DataError, MarketDataProvider};
use tickview_core::domain::{InstrumentInfo, Interval, PriceRecord, Symbol};
use tickview_core::{ViewController, ViewerConfig};
use tickview_tui::AppState;

pub struct CountingProvider {
    pub rows: usize,
    pub calls: Arc<AtomicUsize>,
}

impl MarketDataProvider for CountingProvider {
    fn name(&self) -> &str {
        "counting"
    }

    fn instrument_info(&self, _symbol: &Symbol) -> Result<InstrumentInfo, DataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(InstrumentInfo {
            exchange_name: Some("NMS".into()),
            full_exchange_name: Some("NasdaqGS".into()),
            currency: Some("USD".into()),
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
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((0..self.rows as u64)
            .map(|i| PriceRecord {
                date: start + chrono::Days::new(i),
                open: 150.0,
                high: 153.0,
                low: 149.5,
                close: 152.35,
                volume: 1_200_000,
            })
            .collect())
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
}

pub fn app(rows: usize) -> (AppState, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = CountingProvider {
        rows,
        calls: Arc::clone(&calls),
    };
    let controller = ViewController::new(Box::new(provider));
    (AppState::new(controller, &ViewerConfig::default(), today()), calls)
}
