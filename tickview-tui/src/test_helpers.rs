//! Test helpers: a stub provider and a ready-made `AppState`.

use chrono::NaiveDate;

use tickview_core::data::{DataError, MarketDataProvider};
use tickview_core::domain::{InstrumentInfo, Interval, PriceRecord, Symbol};
use tickview_core::{ViewController, ViewerConfig};

use crate::app::AppState;

#[derive(Debug, Clone, Copy)]
pub enum StubScript {
    /// Return this many consecutive daily rows from the start date.
    Rows(usize),
    /// Fail the metadata lookup with an unknown symbol.
    Fail,
    /// Fail the metadata lookup with a network error.
    Offline,
}

pub struct StubProvider(pub StubScript);

impl MarketDataProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    fn instrument_info(&self, symbol: &Symbol) -> Result<InstrumentInfo, DataError> {
        match self.0 {
            StubScript::Fail => Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            }),
            StubScript::Offline => Err(DataError::NetworkUnreachable(
                "connection refused".into(),
            )),
            StubScript::Rows(_) => Ok(InstrumentInfo {
                exchange_name: Some("NMS".into()),
                full_exchange_name: Some("NasdaqGS".into()),
                currency: Some("USD".into()),
                instrument_type: Some("EQUITY".into()),
                long_name: Some("Apple Inc.".into()),
                timezone: Some("America/New_York".into()),
                ..Default::default()
            }),
        }
    }

    fn price_history(
        &self,
        _symbol: &Symbol,
        start: NaiveDate,
        _end: NaiveDate,
        _interval: Interval,
    ) -> Result<Vec<PriceRecord>, DataError> {
        let StubScript::Rows(n) = self.0 else {
            return Ok(Vec::new());
        };
        Ok((0..n as u64)
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

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// App with default config, "today" fixed at 2024-01-31.
pub fn app_with(script: StubScript) -> AppState {
    let controller = ViewController::new(Box::new(StubProvider(script)));
    AppState::new(controller, &ViewerConfig::default(), date(2024, 1, 31))
}
