//! Application context shared by every request handler.

use crate::data::{Dataset, LoadError};
use std::path::{Path, PathBuf};

/// Immutable state built once at startup.
pub struct AppContext {
    data_file: PathBuf,
    dataset: Result<Dataset, LoadError>,
}

impl AppContext {
    pub fn new(data_file: PathBuf, dataset: Result<Dataset, LoadError>) -> Self {
        Self { data_file, dataset }
    }

    /// Load the data file and log the outcome. A failed load still yields a
    /// context; handlers answer 500 for it.
    pub fn load(data_file: PathBuf) -> Self {
        let dataset = Dataset::open(&data_file);
        match &dataset {
            Ok(ds) => {
                log::info!(
                    "Loaded {} rows from {}",
                    ds.table.len(),
                    data_file.display()
                );
                if ds.table.is_empty() {
                    log::warn!("{} has a header but no rows", data_file.display());
                }
                for p in &ds.partitions {
                    log::info!("Period {}: {} rows", p.name(), p.records.len());
                }
            }
            Err(e) if e.is_not_found() => {
                log::error!("Data file missing, serving errors: {}", e);
            }
            Err(e) => {
                log::error!(
                    "Data file {} could not be parsed, serving errors: {}",
                    data_file.display(),
                    e
                );
            }
        }
        Self::new(data_file, dataset)
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref().ok()
    }
}
