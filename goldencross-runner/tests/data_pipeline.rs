//! End-to-end pipeline tests: CSV file → clean → indicators → simulate.

use std::io::Write;
use std::sync::Arc;

use chrono::NaiveDate;
use goldencross_core::data::{CsvProvider, DataProvider, DataSource, PriceField};
use goldencross_core::{NoopObserver, TradeAction};
use goldencross_runner::config::DataSourceKind;
use goldencross_runner::export::export_price_csv;
use goldencross_runner::{
    build_provider, load_series, render_summary, render_trade_log, run_backtest,
    BacktestConfig, LoadError, PerformanceSummary, RunError,
};

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 1, 1).unwrap()
}

/// Flat at 30, dip to 9, recover to 20, end at 22: one golden cross at row 338.
fn recovery_csv() -> String {
    let closes = std::iter::repeat(30.0)
        .take(200)
        .chain(std::iter::repeat(9.0).take(100))
        .chain(std::iter::repeat(20.0).take(150))
        .chain(std::iter::repeat(22.0).take(10));
    let mut out = String::from("Date,Close\n");
    for (i, close) in closes.enumerate() {
        let date = base() + chrono::Duration::days(i as i64);
        out.push_str(&format!("{date},{close}\n"));
    }
    out
}

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn csv_config(path: &std::path::Path, budget: f64) -> BacktestConfig {
    let toml = format!(
        r#"
        [backtest]
        symbol = "TEST"
        start_date = "2015-01-01"
        end_date = "2016-12-31"
        initial_budget = {budget:.1}

        [data]
        source = "csv"
        csv_path = "{}"
        "#,
        path.display()
    );
    BacktestConfig::from_toml(&toml).unwrap()
}

#[test]
fn csv_backtest_buys_at_golden_cross_and_force_sells() {
    let file = write_temp(&recovery_csv());
    let config = csv_config(file.path(), 1000.0);
    let provider = build_provider(&config.data).unwrap();

    let result = run_backtest(&config, provider.as_ref(), Arc::new(NoopObserver)).unwrap();

    assert_eq!(result.source, DataSource::CsvImport);
    assert_eq!(result.series.len(), 460);
    let actions: Vec<_> = result.simulation.trades.iter().map(|t| t.action).collect();
    assert_eq!(actions, vec![TradeAction::Buy, TradeAction::ForceSell]);
    assert_eq!(
        result.simulation.trades[0].date,
        base() + chrono::Duration::days(338)
    );
    assert_eq!(result.simulation.trades[0].shares, 50);
    assert_eq!(result.simulation.final_cash, 1100.0);

    let summary = PerformanceSummary::from_result(&result.simulation);
    assert!(render_summary(&summary).contains("Profit/Loss:    +$100.00 (+10.00%)"));
    assert!(render_trade_log(&result.simulation.trades).contains("FORCE SELL"));
}

#[test]
fn unaffordable_cross_gives_empty_trade_log() {
    let file = write_temp(&recovery_csv());
    let config = csv_config(file.path(), 5.0);
    let provider = build_provider(&config.data).unwrap();

    let result = run_backtest(&config, provider.as_ref(), Arc::new(NoopObserver)).unwrap();

    assert!(result.simulation.trades.is_empty());
    assert_eq!(result.simulation.final_cash, 5.0);
    assert_eq!(
        render_trade_log(&result.simulation.trades),
        "No trades were executed during this period.\n"
    );
}

#[test]
fn range_outside_file_is_an_empty_series() {
    let file = write_temp(&recovery_csv());
    let mut config = csv_config(file.path(), 1000.0);
    config.backtest.start_date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    config.backtest.end_date = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
    let provider = build_provider(&config.data).unwrap();

    let err = run_backtest(&config, provider.as_ref(), Arc::new(NoopObserver)).unwrap_err();
    assert!(matches!(err, RunError::Data(LoadError::Data(_))));
    assert_eq!(
        err.to_string(),
        "no data for 'TEST' between 2020-01-01 and 2020-12-31"
    );
}

#[test]
fn messy_csv_is_cleaned_before_simulation() {
    // Duplicate and blank rows are repaired; the run still sees 460 clean rows.
    let mut csv = recovery_csv();
    csv.push_str("2015-01-05,999\n");
    csv.push_str(&format!("{},\n", base() + chrono::Duration::days(460)));
    let file = write_temp(&csv);
    let config = csv_config(file.path(), 1000.0);
    let provider = build_provider(&config.data).unwrap();

    let result = run_backtest(&config, provider.as_ref(), Arc::new(NoopObserver)).unwrap();
    assert_eq!(result.cleaning.duplicates_removed, 1);
    assert_eq!(result.cleaning.forward_filled, 1);
    assert_eq!(result.series.len(), 461);
    assert!(result.series.iter().all(|r| r.close != 999.0));
}

#[test]
fn price_csv_export_reads_back_through_csv_provider() {
    let config = {
        let mut c = BacktestConfig::new("SPY");
        c.data.source = DataSourceKind::Synthetic;
        c
    };
    let synthetic = build_provider(&config.data).unwrap();
    let loaded = load_series(
        synthetic.as_ref(),
        "SPY",
        config.backtest.start_date,
        config.backtest.end_date,
        PriceField::AdjClose,
    )
    .unwrap();

    let file = write_temp(&export_price_csv(&loaded.observations).unwrap());
    let reread = CsvProvider::new(file.path())
        .fetch("SPY", config.backtest.start_date, config.backtest.end_date)
        .unwrap();

    assert_eq!(reread.bars.len(), loaded.observations.len());
    for (bar, obs) in reread.bars.iter().zip(&loaded.observations) {
        assert_eq!(bar.date, obs.date);
        assert_eq!(bar.close, obs.close);
    }
}
