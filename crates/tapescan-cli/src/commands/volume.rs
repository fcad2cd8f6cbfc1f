use std::path::PathBuf;
use tapescan_domain::services::screener::volume::screen_daily_volume;

pub(super) fn run_volume(
    config_path: PathBuf,
    ticker_override: Vec<String>,
    json: bool,
) -> Result<(), String> {
    let config = crate::config::load_config(&config_path)?;
    let volume = config
        .volume
        .as_ref()
        .ok_or("config has no [volume] section")?;

    let tickers = if ticker_override.is_empty() {
        volume.tickers.clone()
    } else {
        ticker_override
    };
    if tickers.is_empty() {
        return Err("no tickers to screen".to_string());
    }

    let params = volume.params();
    let provider = crate::infra::build_quote_provider(&config.provider)?;

    tracing::info!(
        tickers = tickers.len(),
        lookback_days = params.lookback_days,
        "starting daily volume screen"
    );
    println!("screening {} tickers for volume spikes", tickers.len());

    let report = screen_daily_volume(provider.as_ref(), &tickers, &params);
    super::print_report(&report, json)
}
