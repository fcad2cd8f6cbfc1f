use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tapescan_domain::services::screener::breakout::BreakoutScreenParams;
use tapescan_domain::services::screener::liquidity::LiquidityRules;
use tapescan_domain::services::screener::volume::VolumeScreenParams;
use tapescan_domain::value_objects::market::ScreenRequest;

#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Yahoo,
    Csv,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub provider: ProviderConfig,
    pub volume: Option<VolumeConfig>,
    pub breakout: Option<BreakoutConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub base_url: Option<String>,
    pub csv_dir: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct VolumeConfig {
    pub tickers: Vec<String>,
    pub lookback_days: Option<u32>,
    pub short_window: Option<usize>,
    pub long_window: Option<usize>,
    pub volume_multiple: Option<f64>,
}

impl VolumeConfig {
    pub fn params(&self) -> VolumeScreenParams {
        let defaults = VolumeScreenParams::default();
        VolumeScreenParams {
            lookback_days: self.lookback_days.unwrap_or(defaults.lookback_days),
            short_window: self.short_window.unwrap_or(defaults.short_window),
            long_window: self.long_window.unwrap_or(defaults.long_window),
            volume_multiple: self.volume_multiple.unwrap_or(defaults.volume_multiple),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct BreakoutConfig {
    pub requests: Vec<ScreenRequest>,
    pub gate_lookback_days: Option<u32>,
    pub hourly_lookback_days: Option<u32>,
    pub rsi_window: Option<usize>,
    pub rsi_ceiling: Option<f64>,
    pub volume_window: Option<usize>,
    pub rvol_floor: Option<f64>,
    pub liquidity: Option<LiquidityRules>,
}

impl BreakoutConfig {
    pub fn params(&self) -> BreakoutScreenParams {
        let defaults = BreakoutScreenParams::default();
        BreakoutScreenParams {
            gate_lookback_days: self.gate_lookback_days.unwrap_or(defaults.gate_lookback_days),
            hourly_lookback_days: self
                .hourly_lookback_days
                .unwrap_or(defaults.hourly_lookback_days),
            rsi_window: self.rsi_window.unwrap_or(defaults.rsi_window),
            rsi_ceiling: self.rsi_ceiling.unwrap_or(defaults.rsi_ceiling),
            volume_window: self.volume_window.unwrap_or(defaults.volume_window),
            rvol_floor: self.rvol_floor.unwrap_or(defaults.rvol_floor),
            liquidity: self.liquidity.clone().unwrap_or_default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
    toml::from_str(&contents)
        .map_err(|err| format!("failed to parse TOML {}: {}", path.display(), err))
}
