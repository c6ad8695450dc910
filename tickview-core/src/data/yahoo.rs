//! Yahoo Finance data provider.
//!
//! Both lookups go through Yahoo's v8 chart API: the metadata lookup reads the
//! `meta` block of a one-day chart, the range lookup reads the OHLCV arrays
//! for the requested window. Yahoo Finance has no official API and is subject
//! to unannounced format changes; those surface as
//! [`DataError::ResponseFormatChanged`].

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;
use tracing::{debug, warn};

use super::provider::{DataError, MarketDataProvider};
use crate::domain::{InstrumentInfo, Interval, PriceRecord, Symbol};

pub const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    currency: Option<String>,
    exchange_name: Option<String>,
    full_exchange_name: Option<String>,
    instrument_type: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
    timezone: Option<String>,
    exchange_timezone_name: Option<String>,
    #[serde(rename = "gmtoffset")]
    gmt_offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooProvider {
    /// Provider against the public Yahoo endpoint.
    pub fn new() -> Result<Self, DataError> {
        Self::with_settings(DEFAULT_BASE_URL, DEFAULT_USER_AGENT)
    }

    /// Provider with a custom base URL and user agent. The HTTP client keeps
    /// reqwest's default timeout.
    pub fn with_settings(base_url: &str, user_agent: &str) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn chart_url(&self, symbol: &Symbol, query: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}?{query}",
            self.base_url,
            urlencoding::encode(symbol.as_str())
        )
    }

    /// Build the chart API URL for a symbol, date range and interval.
    ///
    /// The UTC window is padded by a day on each side: exchanges east of UTC
    /// stamp a session's bar on the previous UTC day. [`clip_to_window`]
    /// trims the parsed records back to `[start, end)` in exchange time.
    fn history_url(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> String {
        let padded_start = start.pred_opt().unwrap_or(start);
        let padded_end = end.succ_opt().unwrap_or(end);
        let start_ts = padded_start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let end_ts = padded_end.and_time(NaiveTime::MIN).and_utc().timestamp();
        self.chart_url(
            symbol,
            &format!(
                "period1={start_ts}&period2={end_ts}&interval={}&includePrePost=false",
                interval.provider_code()
            ),
        )
    }

    fn meta_url(&self, symbol: &Symbol) -> String {
        self.chart_url(symbol, "range=1d&interval=1d")
    }

    /// Execute one GET and decode the chart envelope.
    ///
    /// Non-2xx bodies are still decoded when possible, because Yahoo reports
    /// unknown symbols as a 404 carrying a `chart.error` object.
    fn get_chart(&self, symbol: &Symbol, url: &str) -> Result<ChartResponse, DataError> {
        debug!(%symbol, url, "requesting Yahoo chart");

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;
        let status = resp.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(DataError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(DataError::AuthenticationRequired(
                "Yahoo Finance requires authentication".into(),
            ));
        }

        let body = resp
            .text()
            .map_err(|e| DataError::NetworkUnreachable(format!("failed to read body: {e}")))?;

        match serde_json::from_str::<ChartResponse>(&body) {
            Ok(chart) => Ok(chart),
            Err(e) if status.is_success() => Err(DataError::ResponseFormatChanged(format!(
                "failed to parse response for {symbol}: {e}"
            ))),
            Err(_) => Err(DataError::Http {
                status: status.as_u16(),
                symbol: symbol.to_string(),
            }),
        }
    }

    /// Unwrap the first chart result, translating Yahoo's error object.
    fn first_result(symbol: &Symbol, resp: ChartResponse) -> Result<ChartData, DataError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    DataError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                DataError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))
    }

    /// Parse the `meta` block into instrument info.
    fn parse_meta(symbol: &Symbol, resp: ChartResponse) -> Result<InstrumentInfo, DataError> {
        let meta = Self::first_result(symbol, resp)?
            .meta
            .ok_or_else(|| DataError::ResponseFormatChanged("no meta block".into()))?;

        Ok(InstrumentInfo {
            exchange_name: meta.exchange_name,
            full_exchange_name: meta.full_exchange_name,
            currency: meta.currency,
            instrument_type: meta.instrument_type,
            long_name: meta.long_name,
            short_name: meta.short_name,
            timezone: meta.exchange_timezone_name.or(meta.timezone),
        })
    }

    /// Parse the OHLCV arrays into records.
    ///
    /// A result without timestamps is a valid empty window, not an error.
    fn parse_history(symbol: &Symbol, resp: ChartResponse) -> Result<Vec<PriceRecord>, DataError> {
        let data = Self::first_result(symbol, resp)?;

        let Some(timestamps) = data.timestamp else {
            return Ok(Vec::new());
        };

        let quote = data
            .indicators
            .and_then(|i| i.quote.into_iter().next())
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        // Bars are stamped at the exchange's open; shift to local time so the
        // date matches the trading session.
        let offset = data.meta.and_then(|m| m.gmt_offset).unwrap_or(0);

        let mut records = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = DateTime::from_timestamp(ts + offset, 0)
                .map(|dt| dt.date_naive())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            let volume = quote.volume.get(i).copied().flatten();

            // Skip bars where all OHLCV are None (holidays/non-trading days)
            if open.is_none()
                && high.is_none()
                && low.is_none()
                && close.is_none()
                && volume.is_none()
            {
                continue;
            }

            records.push(PriceRecord {
                date,
                open: open.unwrap_or(f64::NAN),
                high: high.unwrap_or(f64::NAN),
                low: low.unwrap_or(f64::NAN),
                close: close.unwrap_or(f64::NAN),
                volume: volume.map(|v| v.max(0.0).round() as u64).unwrap_or(0),
            });
        }

        Ok(records)
    }
}

impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn instrument_info(&self, symbol: &Symbol) -> Result<InstrumentInfo, DataError> {
        let chart = self.get_chart(symbol, &self.meta_url(symbol))?;
        Self::parse_meta(symbol, chart)
    }

    fn price_history(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<PriceRecord>, DataError> {
        if start >= end {
            warn!(%symbol, %start, %end, "empty date window, skipping range lookup");
            return Ok(Vec::new());
        }
        let chart = self.get_chart(symbol, &self.history_url(symbol, start, end, interval))?;
        let records = Self::parse_history(symbol, chart)?;
        Ok(clip_to_window(records, start, end))
    }
}

/// Keep records whose exchange-local date falls in `[start, end)`.
fn clip_to_window(
    mut records: Vec<PriceRecord>,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<PriceRecord> {
    records.retain(|r| start <= r.date && r.date < end);
    records
}
