//! Backtest runner - wires together data loading, indicators and the simulator.
//!
//! Entry points:
//! - `run_backtest()`: fetch → clean → indicators → simulate. Used by the CLI.
//! - `run_backtest_from_series()`: takes an already loaded series, no I/O.
//! - `run_batch()`: independent configs in parallel on the rayon pool.

use std::sync::Arc;

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use goldencross_core::data::{CleaningReport, DataProvider, DataSource};
use goldencross_core::engine::validate_series;
use goldencross_core::indicators::FrameRow;
use goldencross_core::{
    IndicatorFrame, SimulationError, SimulationObserver, SimulationResult, Simulator,
};

use crate::config::{BacktestConfig, ConfigError};
use crate::data_loader::{load_series, LoadError, LoadedSeries};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Data(#[from] LoadError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete result of a single backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub symbol: String,
    /// Requested range (inclusive).
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub source: DataSource,
    pub dataset_hash: String,
    pub cleaning: CleaningReport,
    pub fast_window: usize,
    pub slow_window: usize,
    pub simulation: SimulationResult,
    /// Every cleaned observation with both averages, for charts and CSV export.
    pub series: Vec<FrameRow>,
}

/// Default schema version for serde deserialization of older JSON without the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl BacktestResult {
    /// Rebuild the indicator frame the simulation ran on.
    pub fn frame(&self) -> IndicatorFrame {
        IndicatorFrame::from_rows(self.fast_window, self.slow_window, self.series.clone())
    }

    pub fn is_synthetic(&self) -> bool {
        self.source == DataSource::Synthetic
    }
}

/// Run one backtest end to end.
pub fn run_backtest(
    config: &BacktestConfig,
    provider: &dyn DataProvider,
    observer: Arc<dyn SimulationObserver>,
) -> Result<BacktestResult, RunError> {
    config.validate()?;
    let b = &config.backtest;
    let loaded = load_series(
        provider,
        &b.symbol,
        b.start_date,
        b.end_date,
        config.data.price_field,
    )?;
    run_backtest_from_series(config, &loaded, observer)
}

/// Run a backtest over an already loaded series - no I/O.
pub fn run_backtest_from_series(
    config: &BacktestConfig,
    loaded: &LoadedSeries,
    observer: Arc<dyn SimulationObserver>,
) -> Result<BacktestResult, RunError> {
    let sim_config = config.to_simulation_config();
    validate_series(&loaded.observations, &sim_config).map_err(SimulationError::from)?;

    tracing::info!(
        symbol = %loaded.symbol,
        fast = sim_config.fast_window,
        slow = sim_config.slow_window,
        "calculating moving averages"
    );
    let frame = IndicatorFrame::compute(
        &loaded.observations,
        sim_config.fast_window,
        sim_config.slow_window,
    )
    .map_err(SimulationError::from)?;

    let simulation = Simulator::new(sim_config)
        .with_observer(observer)
        .run_frame(&frame)?;

    Ok(BacktestResult {
        schema_version: SCHEMA_VERSION,
        symbol: loaded.symbol.clone(),
        start_date: config.backtest.start_date,
        end_date: config.backtest.end_date,
        source: loaded.source,
        dataset_hash: loaded.dataset_hash.clone(),
        cleaning: loaded.cleaning.clone(),
        fast_window: frame.fast_window,
        slow_window: frame.slow_window,
        simulation,
        series: frame.rows,
    })
}

/// Run independent configs in parallel. Results keep the input order.
///
/// Each run owns its own ledger; the provider and observer are shared.
pub fn run_batch(
    configs: &[BacktestConfig],
    provider: &dyn DataProvider,
    observer: Arc<dyn SimulationObserver>,
) -> Vec<Result<BacktestResult, RunError>> {
    configs
        .par_iter()
        .map(|config| run_backtest(config, provider, observer.clone()))
        .collect()
}
