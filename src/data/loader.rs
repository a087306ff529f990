//! CSV Data Loader Module
//! Reads the daily price file into a Polars DataFrame, newest rows first.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Column every input file must carry.
pub const DATE_COLUMN: &str = "Date";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Data file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("Failed to parse CSV: {0}")]
    Parse(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Invalid value in column {column} at row {row}: {reason}")]
    InvalidValue {
        column: String,
        row: usize,
        reason: String,
    },
}

impl LoadError {
    /// True when the file was absent rather than unreadable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }
}

/// Load a delimited file with a header row, sorted by `Date` descending.
pub fn load_table(path: &Path) -> Result<DataFrame, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(10000))
        .with_try_parse_dates(true)
        .finish()?
        .collect()?;

    if df.column(DATE_COLUMN).is_err() {
        return Err(LoadError::MissingColumn(DATE_COLUMN.to_string()));
    }

    let sorted = df.sort(
        [DATE_COLUMN],
        SortMultipleOptions::default()
            .with_order_descending(true)
            .with_maintain_order(true),
    )?;

    Ok(sorted)
}
