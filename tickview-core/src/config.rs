//! Viewer configuration, read from a TOML file.
//!
//! Every field has a default, so a missing file or a partial one is fine.
//!
//! ```toml
//! default_symbol = "RELIANCE.NS"
//! lookback_days = 90
//! default_interval = "weekly"
//! export_dir = "/home/me/exports"
//! log_level = "tickview_core=debug"
//! log_file = "/tmp/tickview.log"
//! ```

use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::yahoo::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::domain::Interval;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Ticker prefilled in the input field.
    pub default_symbol: String,
    /// Days between the default start date and today.
    pub lookback_days: u32,
    pub default_interval: Interval,
    /// Directory that exported CSV files are written to.
    pub export_dir: PathBuf,
    pub base_url: String,
    pub user_agent: String,
    /// `tracing` filter directive, e.g. `info` or `tickview_core=debug`.
    pub log_level: String,
    /// Logging is disabled unless this is set.
    pub log_file: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            default_symbol: "AAPL".to_string(),
            lookback_days: 30,
            default_interval: Interval::Daily,
            export_dir: PathBuf::from("."),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl ViewerConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Default `(start, end)` pair: `today - lookback_days` to `today`.
    ///
    /// A lookback of zero is treated as one day so the pair stays ordered.
    pub fn default_range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let days = u64::from(self.lookback_days.max(1));
        let start = today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        (start, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("tickview-config-does-not-exist.toml");
        let cfg = ViewerConfig::load(&path).unwrap();
        assert_eq!(cfg, ViewerConfig::default());
        assert_eq!(cfg.default_symbol, "AAPL");
        assert_eq!(cfg.lookback_days, 30);
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg = ViewerConfig::from_toml(
            r#"
            default_symbol = "7203.T"
            default_interval = "1wk"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.default_symbol, "7203.T");
        assert_eq!(cfg.default_interval, Interval::Weekly);
        assert_eq!(cfg.lookback_days, 30);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn invalid_toml_is_error() {
        assert!(matches!(
            ViewerConfig::from_toml("lookback_days = \"many\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(ViewerConfig::from_toml("colour = \"blue\"").is_err());
    }

    #[test]
    fn default_range_spans_lookback() {
        let cfg = ViewerConfig::default();
        assert_eq!(cfg.default_range(d(2024, 3, 31)), (d(2024, 3, 1), d(2024, 3, 31)));

        let zero = ViewerConfig {
            lookback_days: 0,
            ..ViewerConfig::default()
        };
        let (start, end) = zero.default_range(d(2024, 1, 1));
        assert!(start < end);
    }
}
