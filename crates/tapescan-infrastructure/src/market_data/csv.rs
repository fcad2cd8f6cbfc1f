use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::PathBuf;
use tapescan_domain::repositories::quote_provider::{HistoryQuery, QuoteProvider};
use tapescan_domain::value_objects::bar::Bar;

#[derive(Debug, Deserialize)]
struct BarRecord {
    timestamp_utc: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

/// Offline provider reading `{dir}/{SYMBOL}_{interval}.csv` files
/// (`timestamp_utc,open,high,low,close,volume`). Rows are canonicalized by
/// timestamp (later duplicates win) and truncated to the query's lookback,
/// measured back from the newest row so scans over a fixed file are
/// reproducible. A missing file is "no data", not an error.
pub struct CsvQuoteProvider {
    dir: PathBuf,
}

impl CsvQuoteProvider {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn series_path(&self, query: &HistoryQuery) -> PathBuf {
        self.dir
            .join(format!("{}_{}.csv", query.symbol, query.interval))
    }
}

impl QuoteProvider for CsvQuoteProvider {
    fn history(&self, query: &HistoryQuery) -> Result<Vec<Bar>, String> {
        let path = self.series_path(query);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&path)
            .map_err(|err| format!("failed to open bar CSV {}: {}", path.display(), err))?;
        let mut reader = csv::Reader::from_reader(file);

        let mut bars_by_ts: BTreeMap<i64, Bar> = BTreeMap::new();
        for result in reader.deserialize::<BarRecord>() {
            let record = result.map_err(|err| format!("failed to parse CSV row: {err}"))?;
            let timestamp = parse_timestamp(&record.timestamp_utc)?;
            bars_by_ts.insert(
                timestamp,
                Bar {
                    symbol: query.symbol.clone(),
                    timestamp,
                    open: record.open,
                    high: record.high,
                    low: record.low,
                    close: record.close,
                    volume: record.volume,
                },
            );
        }

        let Some(newest) = bars_by_ts.keys().next_back().copied() else {
            return Ok(Vec::new());
        };
        let horizon = newest - i64::from(query.lookback_days) * 86_400;

        Ok(bars_by_ts
            .into_values()
            .filter(|bar| bar.timestamp > horizon)
            .collect())
    }
}

fn parse_timestamp(value: &str) -> Result<i64, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.timestamp());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive).timestamp());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0).ok_or("invalid date")?;
        return Ok(Utc.from_utc_datetime(&naive).timestamp());
    }

    Err(format!("unsupported timestamp format: {value}"))
}
