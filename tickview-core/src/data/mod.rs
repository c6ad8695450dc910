//! Remote data acquisition: provider trait, Yahoo implementation, fetcher.

pub mod fetcher;
pub mod provider;
pub mod yahoo;

pub use fetcher::{fetch, FetchOutcome, EMPTY_RESULT_MESSAGE, FETCH_ERROR_PREFIX};
pub use provider::{DataError, MarketDataProvider};
pub use yahoo::YahooProvider;
