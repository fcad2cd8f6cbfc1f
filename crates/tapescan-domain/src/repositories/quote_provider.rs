use crate::value_objects::bar::Bar;
use crate::value_objects::interval::BarInterval;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct HistoryQuery {
    pub symbol: String,
    pub lookback_days: u32,
    pub interval: BarInterval,
}

impl HistoryQuery {
    pub fn new(symbol: &str, lookback_days: u32, interval: BarInterval) -> Self {
        Self {
            symbol: symbol.to_string(),
            lookback_days,
            interval,
        }
    }
}

/// Port for historical quote retrieval. An empty `Ok` means the provider
/// has no data for the query; `Err` is any retrieval failure. Both are
/// handled at the per-ticker boundary by the screeners.
pub trait QuoteProvider {
    fn history(&self, query: &HistoryQuery) -> Result<Vec<Bar>, String>;
}

/// In-memory provider keyed by (symbol, interval). Used by tests and dry
/// runs; `fail` entries simulate retrieval errors for a symbol.
#[derive(Debug, Default)]
pub struct FixedQuoteProvider {
    series: HashMap<(String, BarInterval), Vec<Bar>>,
    failures: HashMap<String, String>,
}

impl FixedQuoteProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: &str, interval: BarInterval, bars: Vec<Bar>) -> Self {
        self.series.insert((symbol.to_string(), interval), bars);
        self
    }

    pub fn with_failure(mut self, symbol: &str, message: &str) -> Self {
        self.failures.insert(symbol.to_string(), message.to_string());
        self
    }
}

impl QuoteProvider for FixedQuoteProvider {
    fn history(&self, query: &HistoryQuery) -> Result<Vec<Bar>, String> {
        if let Some(message) = self.failures.get(&query.symbol) {
            return Err(message.clone());
        }
        Ok(self
            .series
            .get(&(query.symbol.clone(), query.interval))
            .cloned()
            .unwrap_or_default())
    }
}
