use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Interval, Symbol, ValidationError};

/// A validated history request: symbol, date range and interval.
///
/// `start_date` is always strictly before `end_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParameters {
    symbol: Symbol,
    start_date: NaiveDate,
    end_date: NaiveDate,
    interval: Interval,
}

impl QueryParameters {
    /// Validate raw input. The symbol is checked before the date range.
    pub fn new(
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        interval: Interval,
    ) -> Result<Self, ValidationError> {
        let symbol = Symbol::parse(symbol)?;
        if start_date >= end_date {
            return Err(ValidationError::DateOrder {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            symbol,
            start_date,
            end_date,
            interval,
        })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }
}
