use super::liquidity::LiquidityRules;
use super::{latest_closed_index, ScreenReport};
use crate::repositories::quote_provider::{HistoryQuery, QuoteProvider};
use crate::services::indicators::{relative_volume, rsi_series, sma_series};
use crate::value_objects::bar::Bar;
use crate::value_objects::interval::BarInterval;
use crate::value_objects::market::ScreenRequest;

#[derive(Debug, Clone)]
pub struct BreakoutScreenParams {
    pub gate_lookback_days: u32,
    pub hourly_lookback_days: u32,
    pub rsi_window: usize,
    pub rsi_ceiling: f64,
    pub volume_window: usize,
    pub rvol_floor: f64,
    pub liquidity: LiquidityRules,
}

impl Default for BreakoutScreenParams {
    fn default() -> Self {
        Self {
            gate_lookback_days: 5,
            hourly_lookback_days: 7,
            rsi_window: 14,
            rsi_ceiling: 60.0,
            volume_window: 20,
            rvol_floor: 2.0,
            liquidity: LiquidityRules::default(),
        }
    }
}

/// Indicator readings at the latest closed hourly bar. Undefined values
/// (insufficient history) make their condition false, never true.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakoutDecision {
    pub index: usize,
    pub close: f64,
    pub volume: f64,
    pub rsi: Option<f64>,
    pub avg_volume: Option<f64>,
    pub rvol: Option<f64>,
}

impl BreakoutDecision {
    pub fn passed(&self, params: &BreakoutScreenParams) -> bool {
        let rsi_ok = self
            .rsi
            .map(|rsi| rsi < params.rsi_ceiling)
            .unwrap_or(false);
        let rvol_ok = self
            .rvol
            .map(|rvol| rvol > params.rvol_floor)
            .unwrap_or(false);
        rsi_ok && rvol_ok
    }
}

/// Read RSI and relative volume at the latest closed bar of an hourly
/// series. `None` when the series is empty or no bar has closed yet.
pub fn evaluate_breakout(
    hourly: &[Bar],
    params: &BreakoutScreenParams,
    now_ts: i64,
) -> Option<BreakoutDecision> {
    let index = latest_closed_index(hourly, BarInterval::Hourly.period_seconds(), now_ts)?;
    let closes: Vec<f64> = hourly.iter().map(|bar| bar.close).collect();
    let volumes: Vec<f64> = hourly.iter().map(|bar| bar.volume).collect();

    let rsi = rsi_series(&closes, params.rsi_window)[index];
    let avg_volume = sma_series(&volumes, params.volume_window)[index];
    let rvol = relative_volume(volumes[index], avg_volume);

    Some(BreakoutDecision {
        index,
        close: closes[index],
        volume: volumes[index],
        rsi,
        avg_volume,
        rvol,
    })
}

/// Mode B: liquidity-gate each request on daily volume, then look for a
/// calm-RSI / elevated-RVOL setup on the hourly series. The report's pass
/// count is the number of opportunities found.
pub fn screen_consolidation_breakout(
    provider: &dyn QuoteProvider,
    requests: &[ScreenRequest],
    params: &BreakoutScreenParams,
    now_ts: i64,
) -> ScreenReport {
    let mut report = ScreenReport::default();

    for request in requests {
        let symbol = &request.symbol;

        let gate_query = HistoryQuery::new(symbol, params.gate_lookback_days, BarInterval::Daily);
        let daily = match provider.history(&gate_query) {
            Ok(bars) => bars,
            Err(err) => {
                report.note(format!("could not process {symbol}: {err}"));
                continue;
            }
        };
        let Some(latest_daily) = daily.last() else {
            report.note(format!("no daily data for {symbol}, skipping"));
            continue;
        };

        let floor = params.liquidity.floor(request.market);
        if latest_daily.volume < floor {
            report.note(format!(
                "{symbol}: below liquidity floor for {} (volume {:.0} < {floor:.0}), skipping",
                request.market, latest_daily.volume
            ));
            continue;
        }

        let hourly_query =
            HistoryQuery::new(symbol, params.hourly_lookback_days, BarInterval::Hourly);
        let hourly = match provider.history(&hourly_query) {
            Ok(bars) => bars,
            Err(err) => {
                report.note(format!("could not process {symbol}: {err}"));
                continue;
            }
        };
        if hourly.is_empty() {
            report.note(format!("no hourly data for {symbol}, skipping"));
            continue;
        }

        let Some(decision) = evaluate_breakout(&hourly, params, now_ts) else {
            report.note(format!("{symbol}: no closed hourly bar yet, skipping"));
            continue;
        };

        report.note(format!(
            "{symbol}: close={:.2} rsi{}={} volume={:.0} avg{}h_volume={} rvol={}",
            decision.close,
            params.rsi_window,
            format_metric(decision.rsi),
            decision.volume,
            params.volume_window,
            format_metric(decision.avg_volume),
            format_metric(decision.rvol),
        ));

        if decision.passed(params) {
            report.note(format!(
                "{symbol}: PASS (rsi < {:.0}, rvol > {:.1})",
                params.rsi_ceiling, params.rvol_floor
            ));
            report.record_pass(symbol);
        } else {
            report.note(format!("{symbol}: no setup"));
        }
    }

    report.note(format!(
        "breakout scan complete: {} opportunities{}",
        report.passed.len(),
        if report.passed.is_empty() {
            String::new()
        } else {
            format!(": {}", report.passed.join(", "))
        }
    ));

    report
}

fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_infinite() => "inf".to_string(),
        Some(value) => format!("{value:.2}"),
        None => "n/a".to_string(),
    }
}
