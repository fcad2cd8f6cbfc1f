use crate::config::{ProviderConfig, ProviderKind};
use std::path::PathBuf;
use tapescan_domain::repositories::quote_provider::QuoteProvider;
use tapescan_infrastructure::market_data::{yahoo, CsvQuoteProvider, YahooQuoteProvider};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub fn build_quote_provider(config: &ProviderConfig) -> Result<Box<dyn QuoteProvider>, String> {
    match config.kind {
        ProviderKind::Yahoo => {
            let base_url = config
                .base_url
                .as_deref()
                .unwrap_or(yahoo::DEFAULT_BASE_URL);
            let timeout = config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
            let provider = YahooQuoteProvider::new(base_url, timeout)?;
            Ok(Box::new(provider))
        }
        ProviderKind::Csv => {
            let dir = config
                .csv_dir
                .as_deref()
                .ok_or("provider.kind = \"csv\" requires provider.csv_dir")?;
            Ok(Box::new(CsvQuoteProvider::new(PathBuf::from(dir))))
        }
    }
}
