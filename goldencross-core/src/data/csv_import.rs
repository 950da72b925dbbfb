//! CSV import provider - the offline fallback when Yahoo is unavailable.
//!
//! Expects a header row with a `Date` column (`YYYY-MM-DD`, anything after the
//! first ten characters is ignored) and a `Close` column. `Adj Close` /
//! `adj_close` and the other OHLCV columns are picked up when present. Empty
//! or unparsable prices become NaN and are left for cleaning to fill.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::provider::{DataError, DataProvider, DataSource, FetchResult, RawBar};

/// Reads one symbol's daily series from a local CSV file.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    path: PathBuf,
}

/// Column positions resolved from the header row.
#[derive(Debug, Default)]
struct Columns {
    date: usize,
    close: usize,
    adj_close: Option<usize>,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    volume: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, DataError> {
        let find = |names: &[&str]| {
            headers.iter().position(|h| {
                let h = h.trim().to_ascii_lowercase();
                names.iter().any(|n| h == *n)
            })
        };

        Ok(Self {
            date: find(&["date", "timestamp"])
                .ok_or_else(|| DataError::Csv("missing 'Date' column".into()))?,
            close: find(&["close"])
                .ok_or_else(|| DataError::Csv("missing 'Close' column".into()))?,
            adj_close: find(&["adj close", "adj_close", "adjclose"]),
            open: find(&["open"]),
            high: find(&["high"]),
            low: find(&["low"]),
            volume: find(&["volume"]),
        })
    }
}

fn price_at(record: &csv::StringRecord, idx: Option<usize>) -> f64 {
    idx.and_then(|i| record.get(i))
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

fn parse_date(raw: &str, line: u64) -> Result<NaiveDate, DataError> {
    let raw = raw.trim();
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .map_err(|e| DataError::Csv(format!("line {line}: invalid date '{raw}': {e}")))
}

impl CsvProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every bar in the file, unfiltered.
    pub fn read_all(&self) -> Result<Vec<RawBar>, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)?;
        let columns = Columns::resolve(reader.headers()?)?;

        let mut bars = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());
            let date = parse_date(record.get(columns.date).unwrap_or(""), line)?;
            let close = price_at(&record, Some(columns.close));
            let volume = columns
                .volume
                .and_then(|i| record.get(i))
                .and_then(|v| v.trim().parse::<f64>().ok())
                .map_or(0, |v| v.max(0.0) as u64);

            bars.push(RawBar {
                date,
                open: price_at(&record, columns.open),
                high: price_at(&record, columns.high),
                low: price_at(&record, columns.low),
                close,
                volume,
                adj_close: price_at(&record, columns.adj_close),
            });
        }
        Ok(bars)
    }
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        tracing::info!(symbol, path = %self.path.display(), "importing CSV data");
        let bars = self
            .read_all()?
            .into_iter()
            .filter(|b| b.date >= start && b.date <= end)
            .collect();
        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::CsvImport,
        })
    }
}
