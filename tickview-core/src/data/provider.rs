//! Market data provider trait and structured error types.
//!
//! The `MarketDataProvider` trait abstracts over the remote source so the
//! fetcher can be exercised against a stub in tests.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{InstrumentInfo, Interval, PriceRecord, Symbol};

/// Structured error types for provider calls.
///
/// The `Display` text ends up in the user-facing "Error fetching data" message.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("HTTP {status} for {symbol}")]
    Http { status: u16, symbol: String },

    #[error("data error: {0}")]
    Other(String),
}

impl DataError {
    /// Whether the request never produced a usable answer (transport,
    /// throttling, access). Unknown symbols and malformed payloads are not.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            DataError::NetworkUnreachable(_)
                | DataError::RateLimited { .. }
                | DataError::AuthenticationRequired(_)
                | DataError::Http { .. }
        )
    }
}

/// Remote source of instrument metadata and price history.
///
/// Each call is one remote round trip, with no retries and no caching.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Look up descriptive metadata for a symbol.
    fn instrument_info(&self, symbol: &Symbol) -> Result<InstrumentInfo, DataError>;

    /// Fetch OHLCV records for `[start, end)` at the given interval.
    ///
    /// An empty vector means the query was valid but matched no rows.
    fn price_history(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<PriceRecord>, DataError>;
}
