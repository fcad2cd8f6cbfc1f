use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tapescan_domain::repositories::quote_provider::{HistoryQuery, QuoteProvider};
use tapescan_domain::value_objects::bar::Bar;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

const MAX_RETRIES: u32 = 5;

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

// Yahoo pads rows it has no trade data for with nulls.
#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Historical bars from the Yahoo Finance chart API. Blocking client, one
/// request per query; 429 responses are retried with linear backoff, an
/// HTTP 404 reads as "no data for this symbol".
pub struct YahooQuoteProvider {
    client: Client,
    base_url: String,
}

impl YahooQuoteProvider {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("tapescan/0.1")
            .build()
            .map_err(|err| format!("failed to build http client: {err}"))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn fetch(&self, query: &HistoryQuery) -> Result<Vec<Bar>, String> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, query.symbol);
        let range = format!("{}d", query.lookback_days);
        let interval = query.interval.to_string();

        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let response = self
                .client
                .get(&url)
                .query(&[("range", range.as_str()), ("interval", interval.as_str())])
                .send()
                .map_err(|err| format!("chart request failed: {err}"))?;

            if response.status().as_u16() == 429 && attempts <= MAX_RETRIES {
                let backoff = 500u64 * attempts as u64;
                tracing::debug!(symbol = %query.symbol, attempts, "rate limited, backing off");
                std::thread::sleep(Duration::from_millis(backoff));
                continue;
            }

            if response.status().as_u16() == 404 {
                return Ok(Vec::new());
            }

            if !response.status().is_success() {
                return Err(format!(
                    "chart request failed with status {}",
                    response.status()
                ));
            }

            let payload: ChartEnvelope = response
                .json()
                .map_err(|err| format!("chart response parse failed: {err}"))?;
            return parse_chart_payload(&query.symbol, payload);
        }
    }
}

impl QuoteProvider for YahooQuoteProvider {
    fn history(&self, query: &HistoryQuery) -> Result<Vec<Bar>, String> {
        self.fetch(query)
    }
}

fn parse_chart_payload(symbol: &str, payload: ChartEnvelope) -> Result<Vec<Bar>, String> {
    if let Some(error) = payload.chart.error {
        return Err(format!(
            "chart response error: {} ({})",
            error.description.unwrap_or_default(),
            error.code.unwrap_or_default()
        ));
    }

    let Some(result) = payload.chart.result.and_then(|mut r| {
        if r.is_empty() {
            None
        } else {
            Some(r.remove(0))
        }
    }) else {
        return Ok(Vec::new());
    };

    let Some(quote) = result.indicators.quote.into_iter().next() else {
        return Ok(Vec::new());
    };

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (idx, timestamp) in result.timestamp.iter().copied().enumerate() {
        // a bar needs at least close and volume; null-padded rows are dropped
        let Some(close) = quote.close.get(idx).copied().flatten() else {
            continue;
        };
        let Some(volume) = quote.volume.get(idx).copied().flatten() else {
            continue;
        };
        let open = quote.open.get(idx).copied().flatten().unwrap_or(close);
        let high = quote.high.get(idx).copied().flatten().unwrap_or(close);
        let low = quote.low.get(idx).copied().flatten().unwrap_or(close);

        bars.push(Bar {
            symbol: symbol.to_string(),
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    bars.sort_by_key(|bar| bar.timestamp);
    Ok(bars)
}
