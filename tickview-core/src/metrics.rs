//! Metrics presenter: scalar display values derived from the latest record,
//! plus the number formatters shared with the table view.

use crate::domain::{TimeSeriesDataset, NOT_AVAILABLE};

/// Open/Close/High/Low/Volume of the chronologically last record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSummary {
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
}

/// One labelled metric, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDisplay {
    pub label: &'static str,
    pub value: String,
}

/// Summarize the latest record. Returns `None` when there is no dataset.
pub fn summarize(dataset: Option<&TimeSeriesDataset>) -> Option<MetricsSummary> {
    let latest = dataset?.latest();
    Some(MetricsSummary {
        open: latest.open,
        close: latest.close,
        high: latest.high,
        low: latest.low,
        volume: latest.volume,
    })
}

impl MetricsSummary {
    /// Display strings in the order Open, Close, High, Low, Volume.
    pub fn display(&self) -> [MetricDisplay; 5] {
        [
            MetricDisplay {
                label: "Open",
                value: format_price(self.open),
            },
            MetricDisplay {
                label: "Close",
                value: format_price(self.close),
            },
            MetricDisplay {
                label: "High",
                value: format_price(self.high),
            },
            MetricDisplay {
                label: "Low",
                value: format_price(self.low),
            },
            MetricDisplay {
                label: "Volume",
                value: format_volume(self.volume),
            },
        ]
    }
}

/// Two decimals with thousands separators: `1234.5` → `"1,234.50"`.
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    // Values that round to zero print without a sign.
    let negative = value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let sign = if negative { "-" } else { "" };
    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

/// Integer with thousands separators: `1200000` → `"1,200,000"`.
pub fn format_volume(value: u64) -> String {
    group_thousands(&value.to_string())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
