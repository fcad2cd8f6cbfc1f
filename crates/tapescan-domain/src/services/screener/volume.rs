use super::ScreenReport;
use crate::repositories::quote_provider::{HistoryQuery, QuoteProvider};
use crate::services::indicators::sma_series;
use crate::value_objects::bar::Bar;
use crate::value_objects::interval::BarInterval;

#[derive(Debug, Clone)]
pub struct VolumeScreenParams {
    pub lookback_days: u32,
    pub short_window: usize,
    pub long_window: usize,
    pub volume_multiple: f64,
}

impl Default for VolumeScreenParams {
    fn default() -> Self {
        Self {
            lookback_days: 60,
            short_window: 10,
            long_window: 30,
            volume_multiple: 2.0,
        }
    }
}

/// Metrics behind one ticker's pass/fail call. The trailing averages are
/// taken over windows that include the evaluated bar, matching the
/// original screen; an average is `None` when history is too short, and an
/// undefined average never triggers its condition.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeDecision {
    pub close: f64,
    pub volume: f64,
    pub short_avg: Option<f64>,
    pub long_avg: Option<f64>,
    pub short_hit: bool,
    pub long_hit: bool,
}

impl VolumeDecision {
    pub fn passed(&self) -> bool {
        self.short_hit || self.long_hit
    }
}

pub fn evaluate_daily_volume(bars: &[Bar], params: &VolumeScreenParams) -> Option<VolumeDecision> {
    let latest = bars.last()?;
    let volumes: Vec<f64> = bars.iter().map(|bar| bar.volume).collect();
    let short_avg = sma_series(&volumes, params.short_window)
        .last()
        .copied()
        .flatten();
    let long_avg = sma_series(&volumes, params.long_window)
        .last()
        .copied()
        .flatten();

    // boundary is inclusive: exactly N x average qualifies
    let hit = |avg: Option<f64>| {
        avg.map(|avg| latest.volume >= params.volume_multiple * avg)
            .unwrap_or(false)
    };

    Some(VolumeDecision {
        close: latest.close,
        volume: latest.volume,
        short_hit: hit(short_avg),
        long_hit: hit(long_avg),
        short_avg,
        long_avg,
    })
}

/// Mode A: flag tickers whose latest daily volume is at least
/// `volume_multiple` times a trailing average. One ticker's failure never
/// stops the run.
pub fn screen_daily_volume(
    provider: &dyn QuoteProvider,
    symbols: &[String],
    params: &VolumeScreenParams,
) -> ScreenReport {
    let mut report = ScreenReport::default();

    for symbol in symbols {
        let query = HistoryQuery::new(symbol, params.lookback_days, BarInterval::Daily);
        let bars = match provider.history(&query) {
            Ok(bars) => bars,
            Err(err) => {
                report.note(format!("could not process {symbol}: {err}"));
                continue;
            }
        };

        let Some(decision) = evaluate_daily_volume(&bars, params) else {
            report.note(format!("no data found for {symbol}, skipping"));
            continue;
        };

        if decision.passed() {
            report.note(format!("--- POTENTIAL OPPORTUNITY: {symbol} ---"));
            report.note(format!("  last close: {:.2}", decision.close));
            report.note(format!("  latest volume: {:.0}", decision.volume));
            if decision.short_hit {
                if let Some(avg) = decision.short_avg {
                    report.note(format!(
                        "  {}-day avg volume: {:.0} (volume is {:.2}x average)",
                        params.short_window,
                        avg,
                        decision.volume / avg
                    ));
                }
            }
            if decision.long_hit {
                if let Some(avg) = decision.long_avg {
                    report.note(format!(
                        "  {}-day avg volume: {:.0} (volume is {:.2}x average)",
                        params.long_window,
                        avg,
                        decision.volume / avg
                    ));
                }
            }
            report.record_pass(symbol);
        } else {
            report.note(format!(
                "{symbol}: volume {:.0} within normal range ({}d avg {}, {}d avg {})",
                decision.volume,
                params.short_window,
                format_avg(decision.short_avg),
                params.long_window,
                format_avg(decision.long_avg),
            ));
        }
    }

    if report.passed.is_empty() {
        report.note("no tickers met the screening criteria".to_string());
    } else {
        let names = report.passed.join(", ");
        report.note(format!(
            "screening complete: {} potential opportunities: {names}",
            report.passed.len()
        ));
    }

    report
}

fn format_avg(avg: Option<f64>) -> String {
    match avg {
        Some(avg) => format!("{avg:.0}"),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{evaluate_daily_volume, screen_daily_volume, VolumeScreenParams};
    use crate::repositories::quote_provider::FixedQuoteProvider;
    use crate::value_objects::bar::Bar;
    use crate::value_objects::interval::BarInterval;

    fn daily_bars(volumes: &[f64]) -> Vec<Bar> {
        volumes
            .iter()
            .enumerate()
            .map(|(i, volume)| Bar {
                symbol: "X".to_string(),
                timestamp: i as i64 * 86_400,
                open: 10.0,
                high: 10.0,
                low: 10.0,
                close: 10.0,
                volume: *volume,
            })
            .collect()
    }

    fn symbols(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn spike_over_constant_volume_triggers_both_windows() {
        let mut volumes = vec![100.0; 59];
        volumes.push(250.0);
        let decision =
            evaluate_daily_volume(&daily_bars(&volumes), &VolumeScreenParams::default())
                .expect("decision");
        // inclusive windows: avg10 = 115, avg30 = 105
        assert!(decision.short_hit);
        assert!(decision.long_hit);
        assert_eq!(decision.short_avg, Some(115.0));
        assert_eq!(decision.close, 10.0);
    }

    #[test]
    fn boundary_exactly_twice_the_average_passes() {
        // nine bars of 100 then v: avg10 = (900 + v) / 10; v = 225 gives
        // v == 2 * avg10 exactly
        let mut volumes = vec![100.0; 9];
        volumes.push(225.0);
        let decision =
            evaluate_daily_volume(&daily_bars(&volumes), &VolumeScreenParams::default())
                .expect("decision");
        assert_eq!(decision.short_avg, Some(112.5));
        assert!(decision.short_hit);
        assert!(!decision.long_hit);
    }

    #[test]
    fn short_history_never_satisfies_the_long_window() {
        let mut volumes = vec![1.0; 28];
        volumes.push(1_000_000.0);
        let decision =
            evaluate_daily_volume(&daily_bars(&volumes), &VolumeScreenParams::default())
                .expect("decision");
        assert_eq!(decision.long_avg, None);
        assert!(!decision.long_hit);
        assert!(decision.short_hit);
    }

    #[test]
    fn empty_series_is_skipped_not_failed() {
        let provider = FixedQuoteProvider::new();
        let report = screen_daily_volume(
            &provider,
            &symbols(&["GHOST"]),
            &VolumeScreenParams::default(),
        );
        assert!(report.passed.is_empty());
        assert!(report
            .lines
            .iter()
            .any(|line| line == "no data found for GHOST, skipping"));
        assert!(!report.lines.iter().any(|line| line.contains("could not process")));
    }

    #[test]
    fn one_failing_ticker_does_not_stop_the_run() {
        let mut volumes = vec![100.0; 59];
        volumes.push(250.0);
        let mut provider = FixedQuoteProvider::new().with_failure("Y", "boom");
        for name in ["A", "B", "C", "D"] {
            provider = provider.with_series(name, BarInterval::Daily, daily_bars(&volumes));
        }

        let report = screen_daily_volume(
            &provider,
            &symbols(&["A", "B", "Y", "C", "D"]),
            &VolumeScreenParams::default(),
        );
        assert_eq!(report.passed, symbols(&["A", "B", "C", "D"]));
        assert!(report
            .lines
            .iter()
            .any(|line| line == "could not process Y: boom"));
    }

    #[test]
    fn identical_inputs_yield_identical_reports() {
        let mut volumes = vec![100.0; 59];
        volumes.push(250.0);
        let provider = FixedQuoteProvider::new().with_series(
            "AAPL",
            BarInterval::Daily,
            daily_bars(&volumes),
        );

        let first = screen_daily_volume(&provider, &symbols(&["AAPL"]), &VolumeScreenParams::default());
        let second = screen_daily_volume(&provider, &symbols(&["AAPL"]), &VolumeScreenParams::default());
        assert_eq!(first.lines, second.lines);
        assert_eq!(first.passed, second.passed);
    }

    #[test]
    fn quiet_ticker_gets_a_diagnostic_line_and_summary_notes_no_hits() {
        let volumes = vec![100.0; 60];
        let provider = FixedQuoteProvider::new().with_series(
            "MSFT",
            BarInterval::Daily,
            daily_bars(&volumes),
        );
        let report = screen_daily_volume(&provider, &symbols(&["MSFT"]), &VolumeScreenParams::default());
        assert!(report.passed.is_empty());
        assert!(report
            .lines
            .iter()
            .any(|line| line.starts_with("MSFT: volume 100 within normal range")));
        assert_eq!(
            report.lines.last().map(String::as_str),
            Some("no tickers met the screening criteria")
        );
    }
}
