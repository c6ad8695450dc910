//! Domain types: symbols, intervals, query parameters, price records, instrument info.

pub mod instrument;
pub mod interval;
pub mod query;
pub mod record;
pub mod symbol;

pub use instrument::{InstrumentInfo, NOT_AVAILABLE};
pub use interval::Interval;
pub use query::QueryParameters;
pub use record::{PriceRecord, TimeSeriesDataset};
pub use symbol::{Symbol, MAX_SYMBOL_LEN};

use chrono::NaiveDate;
use thiserror::Error;

/// Rejections raised while building domain values from user input.
///
/// The `Display` text is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Ticker symbol must not be empty.")]
    EmptySymbol,

    #[error("Ticker symbol is {len} characters long (max {max}).")]
    SymbolTooLong { len: usize, max: usize },

    #[error("Ticker symbol contains invalid character '{ch}' at position {index}.")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("End date must be after start date.")]
    DateOrder { start: NaiveDate, end: NaiveDate },

    #[error("dataset for {symbol} has no records")]
    EmptyDataset { symbol: String },
}
