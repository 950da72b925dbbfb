//! Serializable backtest configuration (TOML).
//!
//! ```toml
//! [backtest]
//! symbol = "AMZN"
//! start_date = "2018-01-01"
//! end_date = "2023-12-31"
//! initial_budget = 5000.0
//!
//! [strategy]
//! fast_window = 50
//! slow_window = 200
//!
//! [data]
//! source = "yahoo"        # yahoo | csv | synthetic
//! csv_path = "prices.csv" # required when source = "csv"
//! ```
//!
//! Only `backtest.symbol` is required; everything else has a default.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use goldencross_core::data::PriceField;
use goldencross_core::engine::config::{
    DEFAULT_FAST_WINDOW, DEFAULT_INITIAL_BUDGET, DEFAULT_SLOW_WINDOW,
};
use goldencross_core::SimulationConfig;

/// Errors from loading or validating a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Full configuration of one backtest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BacktestConfig {
    pub backtest: BacktestSection,
    #[serde(default)]
    pub strategy: StrategySection,
    #[serde(default)]
    pub data: DataSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BacktestSection {
    pub symbol: String,
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    #[serde(default = "default_end_date")]
    pub end_date: NaiveDate,
    #[serde(default = "default_initial_budget")]
    pub initial_budget: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategySection {
    #[serde(default = "default_fast_window")]
    pub fast_window: usize,
    #[serde(default = "default_slow_window")]
    pub slow_window: usize,
}

impl Default for StrategySection {
    fn default() -> Self {
        Self {
            fast_window: DEFAULT_FAST_WINDOW,
            slow_window: DEFAULT_SLOW_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataSection {
    #[serde(default)]
    pub source: DataSourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv_path: Option<PathBuf>,
    #[serde(default)]
    pub price_field: PriceField,
}

/// Which provider feeds the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    #[default]
    Yahoo,
    Csv,
    Synthetic,
}

impl fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceKind::Yahoo => f.write_str("yahoo"),
            DataSourceKind::Csv => f.write_str("csv"),
            DataSourceKind::Synthetic => f.write_str("synthetic"),
        }
    }
}

impl FromStr for DataSourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(DataSourceKind::Yahoo),
            "csv" => Ok(DataSourceKind::Csv),
            "synthetic" => Ok(DataSourceKind::Synthetic),
            other => Err(ConfigError::Invalid(format!(
                "unknown data source '{other}' (expected yahoo, csv or synthetic)"
            ))),
        }
    }
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or_default()
}

fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 12, 31).unwrap_or_default()
}

fn default_initial_budget() -> f64 {
    DEFAULT_INITIAL_BUDGET
}

fn default_fast_window() -> usize {
    DEFAULT_FAST_WINDOW
}

fn default_slow_window() -> usize {
    DEFAULT_SLOW_WINDOW
}

impl BacktestConfig {
    /// Defaults for everything but the symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            backtest: BacktestSection {
                symbol: symbol.into(),
                start_date: default_start_date(),
                end_date: default_end_date(),
                initial_budget: DEFAULT_INITIAL_BUDGET,
            },
            strategy: StrategySection::default(),
            data: DataSection::default(),
        }
    }

    /// Parse and validate TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn symbol(&self) -> &str {
        &self.backtest.symbol
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.backtest;
        if b.symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("symbol must not be empty".into()));
        }
        if b.start_date > b.end_date {
            return Err(ConfigError::Invalid(format!(
                "start_date {} is after end_date {}",
                b.start_date, b.end_date
            )));
        }
        self.to_simulation_config()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.data.source == DataSourceKind::Csv && self.data.csv_path.is_none() {
            return Err(ConfigError::Invalid(
                "data.csv_path is required when data.source = \"csv\"".into(),
            ));
        }
        Ok(())
    }

    pub fn to_simulation_config(&self) -> SimulationConfig {
        SimulationConfig::new(
            self.backtest.initial_budget,
            self.strategy.fast_window,
            self.strategy.slow_window,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
        [backtest]
        symbol = "AMZN"
        start_date = "2018-01-01"
        end_date = "2023-12-31"
        initial_budget = 5000.0

        [strategy]
        fast_window = 50
        slow_window = 200

        [data]
        source = "csv"
        csv_path = "prices.csv"
    "#;

    #[test]
    fn parses_full_config() {
        let config = BacktestConfig::from_toml(FULL).unwrap();
        assert_eq!(config.symbol(), "AMZN");
        assert_eq!(
            config.backtest.end_date,
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
        assert_eq!(config.data.source, DataSourceKind::Csv);
        assert_eq!(config.data.csv_path, Some(PathBuf::from("prices.csv")));
        assert_eq!(config.data.price_field, PriceField::AdjClose);
    }

    #[test]
    fn symbol_alone_gets_defaults() {
        let config = BacktestConfig::from_toml("[backtest]\nsymbol = \"SPY\"\n").unwrap();
        assert_eq!(config, BacktestConfig::new("SPY"));
        assert_eq!(config.to_simulation_config(), SimulationConfig::default());
        assert_eq!(config.data.source, DataSourceKind::Yahoo);
    }

    #[test]
    fn missing_symbol_is_a_parse_error() {
        let err = BacktestConfig::from_toml("[backtest]\ninitial_budget = 10.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = BacktestConfig::from_toml("[backtest]\nsymbol = \"SPY\"\nbudget = 1.0\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn inverted_dates_are_invalid() {
        let mut config = BacktestConfig::new("SPY");
        config.backtest.start_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        config.backtest.end_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn window_order_is_checked() {
        let mut config = BacktestConfig::new("SPY");
        config.strategy.fast_window = 200;
        config.strategy.slow_window = 50;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must be shorter"), "{err}");
    }

    #[test]
    fn non_positive_budget_is_invalid() {
        let mut config = BacktestConfig::new("SPY");
        config.backtest.initial_budget = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn csv_source_needs_a_path() {
        let mut config = BacktestConfig::new("SPY");
        config.data.source = DataSourceKind::Csv;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("csv_path"));
    }

    #[test]
    fn blank_symbol_is_invalid() {
        assert!(BacktestConfig::new("  ").validate().is_err());
    }

    #[test]
    fn source_kind_parses_case_insensitively() {
        assert_eq!("Synthetic".parse::<DataSourceKind>().unwrap(), DataSourceKind::Synthetic);
        assert!("parquet".parse::<DataSourceKind>().is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = BacktestConfig::from_file(Path::new("/no/such/config.toml")).unwrap_err();
        assert!(err.to_string().contains("/no/such/config.toml"));
    }
}
