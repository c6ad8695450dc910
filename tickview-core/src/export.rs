//! CSV export of a fetched dataset.
//!
//! Rows are written in ascending date order regardless of how the table
//! displays them.

use thiserror::Error;

use crate::domain::{Symbol, TimeSeriesDataset};

/// MIME type handed to the download trigger.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

const HEADER: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No data to export. Fetch stock data first.")]
    NoData,

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to finish CSV buffer: {0}")]
    Buffer(String),
}

/// A downloadable file: name, content type and bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub payload: Vec<u8>,
}

/// `{SYMBOL}_stock_data.csv`
pub fn export_file_name(symbol: &Symbol) -> String {
    format!("{symbol}_stock_data.csv")
}

/// Serialize the dataset as UTF-8 CSV with a `Date` index column.
pub fn to_csv(dataset: &TimeSeriesDataset) -> Result<ExportArtifact, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(HEADER)?;

    for r in dataset.records() {
        wtr.write_record([
            &r.date.format("%Y-%m-%d").to_string(),
            &price_field(r.open),
            &price_field(r.high),
            &price_field(r.low),
            &price_field(r.close),
            &r.volume.to_string(),
        ])?;
    }

    let payload = wtr
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.error().to_string()))?;

    Ok(ExportArtifact {
        file_name: export_file_name(dataset.symbol()),
        content_type: CSV_CONTENT_TYPE,
        payload,
    })
}

/// Missing prices are written as empty fields.
fn price_field(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}
