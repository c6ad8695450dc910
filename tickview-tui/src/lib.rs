//! tickview TUI: terminal front end for the stock data viewer.
//!
//! Provides:
//! - Input sidebar (ticker, end/start date, interval, submit)
//! - Metrics row and reverse-chronological history table
//! - CSV export to the configured directory
//! - Help, error history and instrument detail overlays

pub mod app;
pub mod download;
pub mod input;
pub mod logging;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use input::handle_key;
pub use theme::Theme;

#[cfg(test)]
mod test_helpers;
