use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sampling granularity of a price history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    #[default]
    #[serde(alias = "1d")]
    Daily,
    #[serde(alias = "1wk")]
    Weekly,
    #[serde(alias = "1mo")]
    Monthly,
}

impl Interval {
    pub const ALL: [Interval; 3] = [Interval::Daily, Interval::Weekly, Interval::Monthly];

    /// Interval code understood by the Yahoo chart API.
    pub const fn provider_code(self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Interval::Daily => "Daily",
            Interval::Weekly => "Weekly",
            Interval::Monthly => "Monthly",
        }
    }

    pub fn next(self) -> Interval {
        match self {
            Interval::Daily => Interval::Weekly,
            Interval::Weekly => Interval::Monthly,
            Interval::Monthly => Interval::Daily,
        }
    }

    pub fn prev(self) -> Interval {
        match self {
            Interval::Daily => Interval::Monthly,
            Interval::Weekly => Interval::Daily,
            Interval::Monthly => Interval::Weekly,
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.provider_code())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1d" | "daily" => Ok(Interval::Daily),
            "1wk" | "weekly" => Ok(Interval::Weekly),
            "1mo" | "monthly" => Ok(Interval::Monthly),
            other => Err(format!("unknown interval '{other}' (expected 1d, 1wk or 1mo)")),
        }
    }
}
