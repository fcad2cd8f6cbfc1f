mod rolling;

pub use rolling::{RollingRsi, RollingSma};

/// Trailing simple moving average over `values`. The output has the same
/// length as the input; index i averages the window ending at (and
/// including) index i, and is `None` until the window has filled.
pub fn sma_series(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut sma = RollingSma::new(window);
    values.iter().map(|value| sma.update(*value)).collect()
}

/// RSI series over closing prices, same length as the input. Index i is
/// `None` until `window` price changes are available.
pub fn rsi_series(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut rsi = RollingRsi::new(window);
    closes.iter().map(|close| rsi.update(*close)).collect()
}

/// Ratio of a bar's volume to a trailing average. An undefined average
/// stays undefined; a zero average reads as infinite relative volume, so
/// "greater than" thresholds are satisfied without a division error.
pub fn relative_volume(volume: f64, average: Option<f64>) -> Option<f64> {
    let average = average?;
    if average == 0.0 {
        return Some(f64::INFINITY);
    }
    Some(volume / average)
}
