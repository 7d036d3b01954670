// File I/O: tabular ingestion and correction-file export

pub mod csv;
pub mod json;
pub mod report;
pub mod xlsx;

use std::path::Path;

use addrsync_recon::{CorrectionTable, ParsedTable, ReconError};
use chrono::{DateTime, Utc};
use tracing::info;

/// How a file is read, decided from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// CSV/TSV or other delimited text (delimiter sniffed).
    Delimited,
    /// Excel/ODS workbook; only the first sheet is read.
    Workbook,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Self::Workbook,
            _ => Self::Delimited,
        }
    }
}

/// Read a tabular file into a header row plus data rows.
pub fn import(path: &Path) -> Result<ParsedTable, ReconError> {
    let table = match InputFormat::from_path(path) {
        InputFormat::Workbook => xlsx::import(path)?,
        InputFormat::Delimited => csv::import(path)?,
    };
    info!(
        path = %path.display(),
        columns = table.headers().len(),
        rows = table.len(),
        "imported table"
    );
    Ok(table)
}

/// Write the correction table. `.xlsx` gets a workbook, anything else a BOM-prefixed CSV.
pub fn export(table: &CorrectionTable, path: &Path) -> Result<(), ReconError> {
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
    if is_xlsx {
        xlsx::export(table, path)?;
    } else {
        csv::export(table, path)?;
    }
    info!(path = %path.display(), rows = table.len(), "wrote correction file");
    Ok(())
}

/// Default correction file name, e.g. `住所修正データ_2026-10-19T08-30-00.csv`.
pub fn default_output_name(now: DateTime<Utc>) -> String {
    format!("住所修正データ_{}.csv", now.format("%Y-%m-%dT%H-%M-%S"))
}
