//! MarketSense CLI — indicator snapshot and trend forecast for a saved daily series.
//!
//! Commands:
//! - `analyze` — print the full report (series, indicators, predictions) as JSON
//! - `indicators` — print only the indicator snapshot
//! - `forecast` — print only the forecast
//! - `quote` — print the latest quote joined with the company overview
//!
//! Input is either a provider `TIME_SERIES_DAILY` JSON payload (`.json`) or a
//! `Date,Open,High,Low,Close,Volume` CSV file (anything else). `quote` reads
//! saved `GLOBAL_QUOTE` and `OVERVIEW` payloads. Logs go to
//! stderr (`RUST_LOG` controls the level) so stdout is always plain JSON.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use marketsense_core::data::{load_csv, load_daily, load_quote};
use marketsense_core::forecast::predict_next_days_with;
use marketsense_core::snapshot::compute_indicators_with;
use marketsense_core::{analyze, AnalysisConfig, PricePoint};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "marketsense",
    about = "MarketSense CLI — technical indicators and short-horizon forecast"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full analysis report as JSON.
    Analyze(InputArgs),
    /// Print the indicator snapshot for the last day as JSON.
    Indicators(InputArgs),
    /// Print the forecast as JSON.
    Forecast(InputArgs),
    /// Print the latest quote and company overview as JSON.
    Quote(QuoteArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Daily series: provider JSON payload (.json) or CSV.
    #[arg(long, short)]
    input: PathBuf,

    /// Symbol for the report. Defaults to the payload's symbol or the file stem.
    #[arg(long)]
    symbol: Option<String>,

    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Forecast horizon in days (overrides the config).
    #[arg(long)]
    days: Option<usize>,

    /// Pretty-print the JSON output.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Args)]
struct QuoteArgs {
    /// Saved `GLOBAL_QUOTE` payload.
    #[arg(long, short)]
    input: PathBuf,

    /// Saved `OVERVIEW` payload for the company name and market cap.
    #[arg(long)]
    overview: Option<PathBuf>,

    /// Symbol for the output. Defaults to the payload's symbol.
    #[arg(long)]
    symbol: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

/// A loaded series and the symbol it belongs to.
struct LoadedSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => run_analyze(&args),
        Commands::Indicators(args) => run_indicators(&args),
        Commands::Forecast(args) => run_forecast(&args),
        Commands::Quote(args) => run_quote(&args),
    }
}

fn run_analyze(args: &InputArgs) -> Result<()> {
    let config = load_config(args)?;
    let series = load_series(args)?;
    let report = analyze(&series.symbol, series.points, &config)
        .with_context(|| format!("analyze {}", series.symbol))?;
    print_json(&report, args.pretty)
}

fn run_indicators(args: &InputArgs) -> Result<()> {
    let config = load_config(args)?;
    let series = load_series(args)?;
    let snapshot = compute_indicators_with(&series.points, &config.indicators)
        .with_context(|| format!("compute indicators for {}", series.symbol))?;
    print_json(&snapshot, args.pretty)
}

fn run_forecast(args: &InputArgs) -> Result<()> {
    let config = load_config(args)?;
    let series = load_series(args)?;
    let forecast =
        predict_next_days_with(&series.points, config.forecast.horizon, &config.forecast)
            .with_context(|| format!("forecast {}", series.symbol))?;
    print_json(&forecast, args.pretty)
}

fn run_quote(args: &QuoteArgs) -> Result<()> {
    let mut quote = load_quote(&args.input, args.overview.as_deref())
        .with_context(|| format!("load quote {}", args.input.display()))?;
    if let Some(symbol) = &args.symbol {
        quote.symbol = symbol.clone();
    }
    info!(symbol = %quote.symbol, price = quote.current_price, "loaded quote");
    print_json(&quote, args.pretty)
}

/// Load the config file (or defaults) and apply `--days`.
fn load_config(args: &InputArgs) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(days) = args.days {
        if days == 0 {
            bail!("--days must be at least 1");
        }
        config.forecast.horizon = days;
    }
    debug!(?config, "effective config");
    Ok(config)
}

fn load_series(args: &InputArgs) -> Result<LoadedSeries> {
    let path = &args.input;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let (payload_symbol, points) = if is_json {
        let daily = load_daily(path).with_context(|| format!("load {}", path.display()))?;
        (daily.symbol, daily.points)
    } else {
        let points = load_csv(path).with_context(|| format!("load {}", path.display()))?;
        (None, points)
    };

    let symbol = args
        .symbol
        .clone()
        .or(payload_symbol)
        .unwrap_or_else(|| symbol_from_path(path));
    info!(%symbol, points = points.len(), input = %path.display(), "loaded series");

    Ok(LoadedSeries { symbol, points })
}

fn symbol_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_uppercase())
        .unwrap_or_else(|| "UNKNOWN".to_string())
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
