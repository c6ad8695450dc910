//! OHLCV records and the ordered dataset returned by a successful fetch.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Interval, Symbol, ValidationError};

/// One OHLCV row, indexed by its session date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Price history for one symbol, sorted ascending by date and never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesDataset {
    symbol: Symbol,
    interval: Interval,
    records: Vec<PriceRecord>,
}

impl TimeSeriesDataset {
    /// Build a dataset, sorting records ascending by date.
    pub fn new(
        symbol: Symbol,
        interval: Interval,
        mut records: Vec<PriceRecord>,
    ) -> Result<Self, ValidationError> {
        if records.is_empty() {
            return Err(ValidationError::EmptyDataset {
                symbol: symbol.to_string(),
            });
        }
        records.sort_by_key(|r| r.date);
        Ok(Self {
            symbol,
            interval,
            records,
        })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Records in ascending (fetch) order.
    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    /// Records newest first, as shown in the table.
    pub fn descending(&self) -> impl Iterator<Item = &PriceRecord> + '_ {
        self.records.iter().rev()
    }

    /// The chronologically last record.
    pub fn latest(&self) -> &PriceRecord {
        // Non-empty by construction.
        &self.records[self.records.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.records[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.latest().date
    }
}
