//! GoldenCross CLI - run, fetch and show commands.
//!
//! Commands:
//! - `run` - backtest one symbol from a TOML config and/or flags
//! - `fetch` - download a series and save it as a `Date,Close` CSV
//! - `show` - print (or chart) a saved run directory

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use crossterm::style::Stylize;
use tracing_subscriber::prelude::*;

use goldencross_core::data::PriceField;
use goldencross_core::TracingObserver;
use goldencross_runner::export::export_price_csv;
use goldencross_runner::report::format_dollars;
use goldencross_runner::{
    build_provider, load_series, render_trade_log, run_backtest, save_artifacts, BacktestConfig,
    BacktestResult, DataSourceKind, PerformanceSummary, Tone,
};

#[derive(Parser)]
#[command(
    name = "goldencross",
    about = "GoldenCross CLI - moving-average crossover backtester"
)]
struct Cli {
    /// More log output (-v for debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only warnings and errors.
    #[arg(short, long, global = true, default_value_t = false)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a backtest from a TOML config file, flags, or both (flags win).
    Run(RunArgs),
    /// Download a price series and write it as a Date,Close CSV.
    Fetch {
        /// Ticker symbol (e.g., AMZN).
        symbol: String,

        /// Start date (YYYY-MM-DD). Defaults to 2018-01-01.
        #[arg(long)]
        start: Option<NaiveDate>,

        /// End date (YYYY-MM-DD), inclusive. Defaults to 2023-12-31.
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Data source: yahoo or synthetic.
        #[arg(long, default_value = "yahoo")]
        source: DataSourceKind,

        /// Output file. Defaults to <SYMBOL>.csv.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a saved run; --chart opens the terminal viewer.
    Show {
        /// Run directory containing manifest.json.
        dir: PathBuf,

        #[arg(long, default_value_t = false)]
        chart: bool,
    },
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ticker symbol (required without --config).
    #[arg(long)]
    symbol: Option<String>,

    /// Start date (YYYY-MM-DD).
    #[arg(long)]
    start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD), inclusive.
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Starting cash.
    #[arg(long)]
    budget: Option<f64>,

    /// Fast moving-average window.
    #[arg(long)]
    fast: Option<usize>,

    /// Slow moving-average window.
    #[arg(long)]
    slow: Option<usize>,

    /// Data source: yahoo, csv or synthetic.
    #[arg(long)]
    source: Option<DataSourceKind>,

    /// CSV file for --source csv (implies it).
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Output directory for run artifacts.
    #[arg(long, default_value = "results")]
    output_dir: PathBuf,

    /// Skip writing manifest.json / trades.csv / series.csv.
    #[arg(long, default_value_t = false)]
    no_artifacts: bool,

    /// Open the terminal chart after the run.
    #[arg(long, default_value_t = false)]
    chart: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Run(args) => run_backtest_cmd(args),
        Commands::Fetch {
            symbol,
            start,
            end,
            source,
            output,
        } => run_fetch(symbol, start, end, source, output),
        Commands::Show { dir, chart } => run_show(dir, chart),
    }
}

fn log_level(verbose: u8, quiet: bool) -> tracing::Level {
    match (quiet, verbose) {
        (true, _) => tracing::Level::WARN,
        (false, 0) => tracing::Level::INFO,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(
            tracing_subscriber::filter::Targets::new()
                .with_target("reqwest", tracing::Level::WARN)
                .with_default(log_level(verbose, quiet)),
        );
    tracing_subscriber::registry().with(fmt_layer).init();
}

/// Start from the config file (or defaults) and let flags override it.
fn resolve_config(args: &RunArgs) -> Result<BacktestConfig> {
    let mut config = match (&args.config, &args.symbol) {
        (Some(path), _) => BacktestConfig::from_file(path)?,
        (None, Some(symbol)) => BacktestConfig::new(symbol.clone()),
        (None, None) => anyhow::bail!("one of --config or --symbol is required"),
    };

    if let Some(symbol) = &args.symbol {
        config.backtest.symbol = symbol.clone();
    }
    if let Some(start) = args.start {
        config.backtest.start_date = start;
    }
    if let Some(end) = args.end {
        config.backtest.end_date = end;
    }
    if let Some(budget) = args.budget {
        config.backtest.initial_budget = budget;
    }
    if let Some(fast) = args.fast {
        config.strategy.fast_window = fast;
    }
    if let Some(slow) = args.slow {
        config.strategy.slow_window = slow;
    }
    if let Some(path) = &args.csv {
        config.data.csv_path = Some(path.clone());
        config.data.source = DataSourceKind::Csv;
    }
    if let Some(source) = args.source {
        config.data.source = source;
    }

    config.validate()?;
    Ok(config)
}

/// Label for failures that happen before a config (and its symbol) exists.
fn run_label(args: &RunArgs) -> String {
    match (&args.symbol, &args.config) {
        (Some(symbol), _) => symbol.clone(),
        (None, Some(path)) => path.display().to_string(),
        (None, None) => "<no symbol>".to_string(),
    }
}

fn failure_message(symbol: &str, err: &anyhow::Error) -> String {
    format!("could not run backtest for {symbol}: {err}")
}

/// Resolve, load and simulate. Errors carry the symbol they belong to.
fn execute_backtest(
    args: &RunArgs,
) -> std::result::Result<BacktestResult, (String, anyhow::Error)> {
    let config = resolve_config(args).map_err(|err| (run_label(args), err))?;
    let symbol = config.symbol().to_string();
    let provider = build_provider(&config.data).map_err(|err| (symbol.clone(), err.into()))?;
    run_backtest(&config, provider.as_ref(), Arc::new(TracingObserver))
        .map_err(|err| (symbol, err.into()))
}

fn run_backtest_cmd(args: RunArgs) -> Result<()> {
    let result = match execute_backtest(&args) {
        Ok(result) => result,
        Err((symbol, err)) => {
            tracing::error!(symbol = %symbol, error = %err, "backtest failed");
            eprintln!("{}", failure_message(&symbol, &err));
            std::process::exit(1);
        }
    };

    print_report(&result);

    if !args.no_artifacts {
        let run_dir = save_artifacts(&result, &args.output_dir)?;
        println!("Artifacts saved to: {}", run_dir.display());
    }

    if args.chart {
        goldencross_tui::run_viewer(&result)?;
    }
    Ok(())
}

fn run_fetch(
    symbol: String,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    source: DataSourceKind,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut config = BacktestConfig::new(symbol);
    config.data.source = source;
    if let Some(start) = start {
        config.backtest.start_date = start;
    }
    if let Some(end) = end {
        config.backtest.end_date = end;
    }
    config.validate()?;

    let provider = build_provider(&config.data)?;
    let loaded = load_series(
        provider.as_ref(),
        config.symbol(),
        config.backtest.start_date,
        config.backtest.end_date,
        PriceField::AdjClose,
    )
    .with_context(|| format!("could not fetch {}", config.symbol()))?;

    let path = output.unwrap_or_else(|| PathBuf::from(format!("{}.csv", config.symbol())));
    std::fs::write(&path, export_price_csv(&loaded.observations)?)
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!(
        "Saved {} rows for {} ({}) to {}",
        loaded.observations.len(),
        loaded.symbol,
        loaded.source,
        path.display()
    );
    Ok(())
}

fn run_show(dir: PathBuf, chart: bool) -> Result<()> {
    let result = goldencross_runner::load_artifacts(&dir)?;
    if chart {
        goldencross_tui::run_viewer(&result)
    } else {
        print_report(&result);
        Ok(())
    }
}

fn print_report(result: &BacktestResult) {
    let summary = PerformanceSummary::from_result(&result.simulation);
    let pnl = summary.profit_loss_text();
    let pnl = match summary.tone() {
        Tone::Gain => pnl.green().bold(),
        Tone::Loss => pnl.red().bold(),
    };

    println!();
    println!("{}", "Trading Strategy Evaluation".bold());
    println!(
        "Symbol:         {} ({} to {}, {}/{} MA)",
        result.symbol,
        result.start_date,
        result.end_date,
        result.fast_window,
        result.slow_window
    );
    println!("Initial Budget: {}", format_dollars(summary.initial_budget));
    println!("Final Budget:   {}", format_dollars(summary.final_budget));
    println!("Profit/Loss:    {pnl}");
    if result.is_synthetic() {
        println!();
        println!("{}", "WARNING: Results based on SYNTHETIC data".yellow());
    }
    println!();
    print!("{}", render_trade_log(&result.simulation.trades));
    println!();
}
