//! GoldenCross viewer - opens a saved run directory in the terminal.
//!
//! Usage: `goldencross-tui <run-dir>`, where `<run-dir>` holds the
//! `manifest.json` written by `goldencross run`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use goldencross_runner::load_artifacts;
use goldencross_tui::run_viewer;

fn main() -> Result<()> {
    let Some(dir) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("usage: goldencross-tui <run-dir>");
    };

    let result = load_artifacts(&dir)
        .with_context(|| format!("failed to load run from {}", dir.display()))?;
    run_viewer(&result)
}
