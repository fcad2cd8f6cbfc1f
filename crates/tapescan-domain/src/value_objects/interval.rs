use serde::{Deserialize, Serialize};

/// Bar granularity supported by the quote providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarInterval {
    Daily,
    Hourly,
}

impl BarInterval {
    /// Length of one bar period in seconds. A bar is closed once
    /// `timestamp + period_seconds` is in the past.
    pub fn period_seconds(self) -> i64 {
        match self {
            BarInterval::Daily => 86_400,
            BarInterval::Hourly => 3_600,
        }
    }
}

impl std::fmt::Display for BarInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BarInterval::Daily => write!(f, "1d"),
            BarInterval::Hourly => write!(f, "1h"),
        }
    }
}
