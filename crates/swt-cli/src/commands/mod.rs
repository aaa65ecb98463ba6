pub mod check;
pub mod grade;
pub mod init;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// The summary from `--summary` or `--summary-file`.
pub fn read_summary(summary: Option<String>, summary_file: Option<PathBuf>) -> Result<String> {
    match (summary, summary_file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .map(|text| text.trim_end_matches(['\n', '\r']).to_string())
            .with_context(|| format!("failed to read summary file: {}", path.display())),
        (None, None) => anyhow::bail!("provide --summary or --summary-file"),
    }
}

/// Trait values print without a trailing `.0`.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
