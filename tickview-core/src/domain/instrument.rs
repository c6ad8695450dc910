//! Descriptive instrument metadata returned by the provider's metadata lookup.

use serde::{Deserialize, Serialize};

/// Placeholder shown for any field the provider did not report.
pub const NOT_AVAILABLE: &str = "N/A";

/// Instrument metadata. Every field is optional; accessors substitute
/// [`NOT_AVAILABLE`] so callers never handle absence themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentInfo {
    pub exchange_name: Option<String>,
    pub full_exchange_name: Option<String>,
    pub currency: Option<String>,
    pub instrument_type: Option<String>,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    pub timezone: Option<String>,
}

impl InstrumentInfo {
    /// Market name for the header: full exchange name, then exchange code.
    pub fn market_name(&self) -> &str {
        non_blank(self.full_exchange_name.as_ref())
            .or_else(|| non_blank(self.exchange_name.as_ref()))
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Look up a field by its provider key (`exchangeName`, `currency`, ...).
    pub fn field(&self, key: &str) -> &str {
        let value = match key {
            "exchangeName" => self.exchange_name.as_ref(),
            "fullExchangeName" => self.full_exchange_name.as_ref(),
            "currency" => self.currency.as_ref(),
            "instrumentType" => self.instrument_type.as_ref(),
            "longName" => self.long_name.as_ref(),
            "shortName" => self.short_name.as_ref(),
            "timezone" | "exchangeTimezoneName" => self.timezone.as_ref(),
            _ => None,
        };
        display_or_na(value)
    }

    /// Labelled fields in display order, absent values as `N/A`.
    pub fn display_fields(&self) -> [(&'static str, &str); 7] {
        [
            ("Name", display_or_na(self.long_name.as_ref().or(self.short_name.as_ref()))),
            ("Market", self.market_name()),
            ("Exchange code", display_or_na(&self.exchange_name)),
            ("Currency", display_or_na(&self.currency)),
            ("Type", display_or_na(&self.instrument_type)),
            ("Timezone", display_or_na(&self.timezone)),
            ("Short name", display_or_na(&self.short_name)),
        ]
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn display_or_na<'a>(value: impl Into<Option<&'a String>>) -> &'a str {
    non_blank(value.into()).unwrap_or(NOT_AVAILABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_info_reports_not_available() {
        let info = InstrumentInfo::default();
        assert_eq!(info.market_name(), "N/A");
        assert_eq!(info.field("currency"), "N/A");
        assert!(info.display_fields().iter().all(|(_, v)| *v == NOT_AVAILABLE));
    }

    #[test]
    fn market_name_prefers_full_exchange_name() {
        let mut info = InstrumentInfo {
            exchange_name: Some("NMS".into()),
            ..Default::default()
        };
        assert_eq!(info.market_name(), "NMS");
        info.full_exchange_name = Some("NasdaqGS".into());
        assert_eq!(info.market_name(), "NasdaqGS");
    }

    #[test]
    fn blank_values_count_as_missing() {
        let mut info = InstrumentInfo {
            full_exchange_name: Some("  ".into()),
            currency: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(info.market_name(), "N/A");
        info.exchange_name = Some("LSE".into());
        assert_eq!(info.market_name(), "LSE");
        assert_eq!(info.field("currency"), "N/A");
        assert_eq!(info.field("unknownKey"), "N/A");
    }
}
