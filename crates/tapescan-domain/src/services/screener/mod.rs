pub mod breakout;
pub mod liquidity;
pub mod volume;

use crate::value_objects::bar::Bar;
use serde::Serialize;

/// Output of one screening run: the text report, in evaluation order, plus
/// the symbols that passed. The lines are the baseline observable behavior;
/// callers print them as-is.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ScreenReport {
    pub lines: Vec<String>,
    pub passed: Vec<String>,
}

impl ScreenReport {
    pub fn note(&mut self, line: String) {
        self.lines.push(line);
    }

    pub fn record_pass(&mut self, symbol: &str) {
        self.passed.push(symbol.to_string());
    }

    pub fn opportunity_count(&self) -> usize {
        self.passed.len()
    }
}

/// Index of the most recent bar that has fully closed by `now_ts`, i.e.
/// whose period end is not in the future. The provider's trailing bar is
/// often still forming, so screeners must not assume a fixed offset from
/// the end of the series.
pub fn latest_closed_index(bars: &[Bar], period_seconds: i64, now_ts: i64) -> Option<usize> {
    bars.iter()
        .rposition(|bar| bar.timestamp + period_seconds <= now_ts)
}

#[cfg(test)]
mod tests {
    use super::latest_closed_index;
    use crate::value_objects::bar::Bar;

    fn bar(ts: i64) -> Bar {
        Bar {
            symbol: "AAPL".to_string(),
            timestamp: ts,
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
            volume: 1.0,
        }
    }

    #[test]
    fn skips_the_partially_formed_trailing_bar() {
        let bars: Vec<Bar> = (0..5).map(|i| bar(i * 3_600)).collect();
        // now falls inside the last bar's period
        let idx = latest_closed_index(&bars, 3_600, 4 * 3_600 + 1_800);
        assert_eq!(idx, Some(3));
    }

    #[test]
    fn uses_the_last_bar_once_its_period_ends() {
        let bars: Vec<Bar> = (0..5).map(|i| bar(i * 3_600)).collect();
        let idx = latest_closed_index(&bars, 3_600, 5 * 3_600);
        assert_eq!(idx, Some(4));
    }

    #[test]
    fn no_closed_bar_yields_none() {
        let bars = vec![bar(1_000)];
        assert_eq!(latest_closed_index(&bars, 3_600, 1_200), None);
    }

    #[test]
    fn empty_series_yields_none() {
        assert_eq!(latest_closed_index(&[], 3_600, 0), None);
    }
}
