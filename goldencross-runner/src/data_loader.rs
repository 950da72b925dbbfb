//! Series loading for the runner: fetch, clean, fingerprint.
//!
//! The pipeline for one symbol:
//! 1. Ask the configured provider for raw bars over the inclusive range
//! 2. Fail with `DataError::EmptySeries` if the provider returned nothing
//! 3. Clean (sort, dedupe, forward-fill)
//! 4. Fail with `LoadError::EmptyAfterCleaning` if nothing usable is left
//! 5. Hash the cleaned series (BLAKE3) so artifacts record exactly what ran

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use goldencross_core::data::{
    clean_bars, CircuitBreaker, CleaningReport, CsvProvider, DataError, DataProvider, DataSource,
    PriceField, SyntheticProvider, YahooProvider,
};
use goldencross_core::PriceObservation;

use crate::config::{DataSection, DataSourceKind};

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("all {bars} bars for '{symbol}' were unusable after cleaning")]
    EmptyAfterCleaning { symbol: String, bars: usize },

    #[error("data source 'csv' needs a file path")]
    MissingCsvPath,
}

/// A cleaned series plus its provenance.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub symbol: String,
    pub observations: Vec<PriceObservation>,
    pub source: DataSource,
    pub cleaning: CleaningReport,
    /// BLAKE3 over the cleaned dates and closes.
    pub dataset_hash: String,
}

/// Build the provider a config asks for.
pub fn build_provider(data: &DataSection) -> Result<Box<dyn DataProvider>, LoadError> {
    let provider: Box<dyn DataProvider> = match data.source {
        DataSourceKind::Yahoo => Box::new(YahooProvider::new(Arc::new(
            CircuitBreaker::default_provider(),
        ))?),
        DataSourceKind::Csv => {
            let path = data.csv_path.as_ref().ok_or(LoadError::MissingCsvPath)?;
            Box::new(CsvProvider::new(path))
        }
        DataSourceKind::Synthetic => Box::new(SyntheticProvider::default()),
    };
    Ok(provider)
}

/// Fetch and clean one symbol's series.
pub fn load_series(
    provider: &dyn DataProvider,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    field: PriceField,
) -> Result<LoadedSeries, LoadError> {
    if !provider.is_available() {
        return Err(DataError::CircuitBreakerTripped.into());
    }

    let fetched = provider.fetch(symbol, start, end)?;
    if fetched.bars.is_empty() {
        return Err(DataError::EmptySeries {
            symbol: symbol.to_string(),
            start,
            end,
        }
        .into());
    }

    let raw_count = fetched.bars.len();
    let cleaned = clean_bars(fetched.bars, field);
    if cleaned.observations.is_empty() {
        return Err(LoadError::EmptyAfterCleaning {
            symbol: symbol.to_string(),
            bars: raw_count,
        });
    }

    tracing::info!(
        symbol,
        source = %fetched.source,
        bars = raw_count,
        observations = cleaned.observations.len(),
        "data fetched and cleaned"
    );

    let dataset_hash = compute_dataset_hash(symbol, &cleaned.observations);
    Ok(LoadedSeries {
        symbol: symbol.to_string(),
        observations: cleaned.observations,
        source: fetched.source,
        cleaning: cleaned.report,
        dataset_hash,
    })
}

/// Deterministic BLAKE3 hash of a cleaned series.
pub fn compute_dataset_hash(symbol: &str, observations: &[PriceObservation]) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(symbol.as_bytes());
    for obs in observations {
        hasher.update(obs.date.to_string().as_bytes());
        hasher.update(&obs.close.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
