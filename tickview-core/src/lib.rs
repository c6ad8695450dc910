//! tickview core: fetch, present and export historical stock prices.
//!
//! This crate holds everything except the terminal:
//! - Domain types (symbols, intervals, query parameters, records, instrument info)
//! - Market data provider trait and the Yahoo chart API implementation
//! - Data fetcher normalizing provider results into a `FetchOutcome`
//! - Metrics presenter and number formatting
//! - Session store and the view controller state machine
//! - CSV export and viewer configuration

pub mod config;
pub mod controller;
pub mod data;
pub mod domain;
pub mod export;
pub mod metrics;
pub mod session;

pub use config::{ConfigError, ViewerConfig};
pub use controller::{
    DataView, ErrorKind, PendingFetch, QueryInput, TableRow, ViewController, ViewError, ViewModel,
    ViewState, FETCHING_MESSAGE, LOADED_MESSAGE,
};
pub use data::{DataError, FetchOutcome, MarketDataProvider, YahooProvider};
pub use domain::{
    InstrumentInfo, Interval, PriceRecord, QueryParameters, Symbol, TimeSeriesDataset,
    ValidationError,
};
pub use export::{ExportArtifact, ExportError};
pub use session::SessionStore;
