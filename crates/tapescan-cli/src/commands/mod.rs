mod breakout;
mod volume;

use std::path::PathBuf;
use tapescan_domain::services::screener::ScreenReport;

pub enum Command {
    Volume {
        config: PathBuf,
        tickers: Vec<String>,
        json: bool,
    },
    Breakout {
        config: PathBuf,
        json: bool,
    },
}

pub fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Volume {
            config,
            tickers,
            json,
        } => volume::run_volume(config, tickers, json),
        Command::Breakout { config, json } => breakout::run_breakout(config, json),
    }
}

pub(super) fn print_report(report: &ScreenReport, json: bool) -> Result<(), String> {
    for line in &report.lines {
        println!("{line}");
    }
    if json {
        let rendered = serde_json::to_string(report)
            .map_err(|err| format!("failed to serialize report: {err}"))?;
        println!("{rendered}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{run, Command};
    use chrono::{Duration, TimeZone, Utc};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_tmp_dir(name: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let dir = std::env::temp_dir().join(format!(
            "tapescan_cli_{name}_{}_{}",
            std::process::id(),
            now
        ));
        fs::create_dir_all(&dir).expect("create tmp dir");
        dir
    }

    fn write_daily_csv(dir: &PathBuf, symbol: &str) {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("start");
        let mut csv_data = String::from("timestamp_utc,open,high,low,close,volume\n");
        for day in 0..60 {
            let ts = start + Duration::days(day);
            let volume = if day == 59 { 250 } else { 100 };
            csv_data.push_str(&format!("{},10,10,10,10,{volume}\n", ts.to_rfc3339()));
        }
        fs::write(dir.join(format!("{symbol}_1d.csv")), csv_data).expect("write csv");
    }

    fn sample_config(dir: &PathBuf) -> PathBuf {
        let config_path = dir.join("config.toml");
        let toml_contents = format!(
            "\
[provider]\n\
kind = \"csv\"\n\
csv_dir = \"{}\"\n\
\n\
[volume]\n\
tickers = [\"AAPL\"]\n\
lookback_days = 90\n",
            dir.display()
        );
        fs::write(&config_path, toml_contents).expect("write config");
        config_path
    }

    #[test]
    fn run_volume_screens_a_csv_directory() {
        let dir = unique_tmp_dir("volume");
        write_daily_csv(&dir, "AAPL");
        let config_path = sample_config(&dir);
        run(Command::Volume {
            config: config_path,
            tickers: Vec::new(),
            json: true,
        })
        .expect("volume run");
    }

    #[test]
    fn run_breakout_requires_its_config_section() {
        let dir = unique_tmp_dir("breakout_missing");
        let config_path = sample_config(&dir);
        let err = run(Command::Breakout {
            config: config_path,
            json: false,
        })
        .expect_err("missing section");
        assert!(err.contains("[breakout]"));
    }
}
