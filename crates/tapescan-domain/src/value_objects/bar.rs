use serde::{Deserialize, Serialize};

/// One OHLCV bar. `timestamp` is the bar's open time in epoch seconds (UTC).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Bar {
    pub symbol: String,
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}
