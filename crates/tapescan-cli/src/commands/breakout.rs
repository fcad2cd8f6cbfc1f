use chrono::Utc;
use std::path::PathBuf;
use tapescan_domain::services::screener::breakout::screen_consolidation_breakout;

pub(super) fn run_breakout(config_path: PathBuf, json: bool) -> Result<(), String> {
    let config = crate::config::load_config(&config_path)?;
    let breakout = config
        .breakout
        .as_ref()
        .ok_or("config has no [breakout] section")?;
    if breakout.requests.is_empty() {
        return Err("no tickers to screen".to_string());
    }

    let params = breakout.params();
    let provider = crate::infra::build_quote_provider(&config.provider)?;

    tracing::info!(
        tickers = breakout.requests.len(),
        rsi_ceiling = params.rsi_ceiling,
        rvol_floor = params.rvol_floor,
        "starting breakout screen"
    );
    println!(
        "screening {} tickers for consolidation breakouts",
        breakout.requests.len()
    );

    let report = screen_consolidation_breakout(
        provider.as_ref(),
        &breakout.requests,
        &params,
        Utc::now().timestamp(),
    );
    super::print_report(&report, json)
}
