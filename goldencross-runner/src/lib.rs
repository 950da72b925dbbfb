//! GoldenCross Runner - backtest orchestration, reports, chart model, artifacts.
//!
//! This crate builds on `goldencross-core` to provide:
//! - TOML configuration with validation
//! - Data loading: provider selection, cleaning, dataset fingerprint
//! - Single and batch backtest runners
//! - Text summary and trade-log rendering
//! - A renderer-agnostic chart model
//! - JSON/CSV artifact export with schema versioning

pub mod chart;
pub mod config;
pub mod data_loader;
pub mod export;
pub mod report;
pub mod runner;

pub use chart::{ChartModel, Marker};
pub use config::{BacktestConfig, ConfigError, DataSourceKind};
pub use data_loader::{build_provider, load_series, LoadError, LoadedSeries};
pub use export::{load_artifacts, save_artifacts};
pub use report::{render_summary, render_trade_log, PerformanceSummary, Tone};
pub use runner::{run_backtest, run_backtest_from_series, run_batch, BacktestResult, RunError};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn backtest_result_is_send_sync() {
        assert_send::<BacktestResult>();
        assert_sync::<BacktestResult>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<BacktestConfig>();
        assert_sync::<BacktestConfig>();
    }

    #[test]
    fn loaded_series_is_send_sync() {
        assert_send::<LoadedSeries>();
        assert_sync::<LoadedSeries>();
    }

    #[test]
    fn errors_are_send_sync() {
        assert_send::<RunError>();
        assert_sync::<RunError>();
    }

    #[test]
    fn chart_model_is_send_sync() {
        assert_send::<ChartModel>();
        assert_sync::<ChartModel>();
    }
}
