mod commands;
mod config;
mod infra;
mod obs;

use clap::{Parser, Subcommand};
use commands::Command;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tapescan")]
#[command(about = "Tapescan equity screener", version, arg_required_else_help = true)]
#[command(
    after_help = "Examples:\n  tapescan volume --config configs/sample.toml\n  tapescan volume --config configs/sample.toml --ticker AAPL --ticker MSFT\n  tapescan breakout --config configs/sample.toml --json\n"
)]
struct Cli {
    /// Log filter (overridden by TAPESCAN_LOG).
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
    /// Log format: text or json.
    #[arg(long, default_value = "text", global = true)]
    log_format: String,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Daily volume-spike screen over a flat ticker list.
    Volume {
        #[arg(long)]
        config: PathBuf,
        /// Override the configured ticker list (repeatable).
        #[arg(long = "ticker")]
        tickers: Vec<String>,
        /// Print a JSON summary after the text report.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Liquidity-gated hourly RSI/RVOL breakout screen.
    Breakout {
        #[arg(long)]
        config: PathBuf,
        /// Print a JSON summary after the text report.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = obs::init_tracing(&cli.log_level, &cli.log_format) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }

    let command = match cli.command {
        CliCommand::Volume {
            config,
            tickers,
            json,
        } => Command::Volume {
            config,
            tickers,
            json,
        },
        CliCommand::Breakout { config, json } => Command::Breakout { config, json },
    };

    if let Err(err) = commands::run(command) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
