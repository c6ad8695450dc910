//! Data fetcher: one metadata lookup plus one range lookup, normalized into
//! a [`FetchOutcome`].

use chrono::NaiveDate;
use tracing::{info, warn};

use super::provider::{DataError, MarketDataProvider};
use crate::domain::{InstrumentInfo, Interval, Symbol, TimeSeriesDataset};

/// Message shown when the provider returned a valid but empty window.
pub const EMPTY_RESULT_MESSAGE: &str = "No data available for the selected date range.";

/// Prefix of every provider failure message.
pub const FETCH_ERROR_PREFIX: &str = "Error fetching data";

/// Result of a fetch. Provider faults never escape as panics or `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success {
        dataset: TimeSeriesDataset,
        info: InstrumentInfo,
    },
    EmptyResult,
    Error {
        message: String,
        /// The provider was unreachable rather than answering badly.
        network: bool,
    },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }
}

/// Fetch metadata and price history for `symbol` over `[start, end)`.
///
/// Date ordering is not re-checked here; any pair is passed through to the
/// provider.
pub fn fetch(
    provider: &dyn MarketDataProvider,
    symbol: &Symbol,
    start: NaiveDate,
    end: NaiveDate,
    interval: Interval,
) -> FetchOutcome {
    let info = match provider.instrument_info(symbol) {
        Ok(info) => info,
        Err(e) => {
            warn!(provider = provider.name(), %symbol, error = %e, "metadata lookup failed");
            return failure(&e);
        }
    };

    let records = match provider.price_history(symbol, start, end, interval) {
        Ok(records) => records,
        Err(e) => {
            warn!(provider = provider.name(), %symbol, error = %e, "range lookup failed");
            return failure(&e);
        }
    };

    match TimeSeriesDataset::new(symbol.clone(), interval, records) {
        Ok(dataset) => {
            info!(
                %symbol,
                rows = dataset.len(),
                first = %dataset.first_date(),
                last = %dataset.last_date(),
                "fetch complete"
            );
            FetchOutcome::Success { dataset, info }
        }
        Err(_) => {
            info!(%symbol, %start, %end, %interval, "provider returned no rows");
            FetchOutcome::EmptyResult
        }
    }
}

fn failure(e: &DataError) -> FetchOutcome {
    FetchOutcome::Error {
        message: format!("{FETCH_ERROR_PREFIX}: {e}"),
        network: e.is_network(),
    }
}
