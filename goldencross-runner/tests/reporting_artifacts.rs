//! Artifact persistence: save, reload, schema checks.

use std::sync::Arc;

use goldencross_core::data::SyntheticProvider;
use goldencross_core::NoopObserver;
use goldencross_runner::config::DataSourceKind;
use goldencross_runner::export::{export_json, import_json};
use goldencross_runner::{load_artifacts, run_backtest, save_artifacts, BacktestConfig, BacktestResult};

fn synthetic_result() -> BacktestResult {
    let mut config = BacktestConfig::new("QQQ");
    config.data.source = DataSourceKind::Synthetic;
    run_backtest(&config, &SyntheticProvider::default(), Arc::new(NoopObserver)).unwrap()
}

#[test]
fn artifacts_round_trip_through_directory() {
    let result = synthetic_result();
    let dir = tempfile::tempdir().unwrap();

    let run_dir = save_artifacts(&result, dir.path()).unwrap();
    assert!(run_dir
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("QQQ_"));
    for name in ["manifest.json", "trades.csv", "series.csv"] {
        assert!(run_dir.join(name).is_file(), "missing {name}");
    }

    let reloaded = load_artifacts(&run_dir).unwrap();
    assert_eq!(reloaded, result);
}

#[test]
fn series_csv_has_one_line_per_row() {
    let result = synthetic_result();
    let dir = tempfile::tempdir().unwrap();
    let run_dir = save_artifacts(&result, dir.path()).unwrap();

    let series = std::fs::read_to_string(run_dir.join("series.csv")).unwrap();
    assert_eq!(series.lines().count(), result.series.len() + 1);
    let trades = std::fs::read_to_string(run_dir.join("trades.csv")).unwrap();
    assert_eq!(trades.lines().count(), result.simulation.trades.len() + 1);
}

#[test]
fn newer_schema_is_rejected() {
    let mut result = synthetic_result();
    result.schema_version = 99;
    let json = export_json(&result).unwrap();
    let err = import_json(&json).unwrap_err();
    assert!(err.to_string().contains("unsupported schema version 99"));
}

#[test]
fn missing_schema_version_defaults_to_current() {
    let result = synthetic_result();
    let mut value: serde_json::Value = serde_json::from_str(&export_json(&result).unwrap()).unwrap();
    value.as_object_mut().unwrap().remove("schema_version");
    let reloaded = import_json(&value.to_string()).unwrap();
    assert_eq!(reloaded.schema_version, goldencross_runner::runner::SCHEMA_VERSION);
}

#[test]
fn missing_manifest_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_artifacts(dir.path()).unwrap_err();
    assert!(err.to_string().contains("manifest.json"));
}
