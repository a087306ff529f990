//! Data module - CSV loading and preprocessing

mod loader;
mod processor;

pub use loader::{load_table, LoadError, DATE_COLUMN};
pub use processor::{
    partition, periods, preprocess, Partition, Period, Record, Table, OPEN_INT_COLUMN,
};

use std::path::Path;

/// Clean table plus its fixed-period partitions, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub table: Table,
    pub partitions: [Partition; 3],
}

impl Dataset {
    /// Load and preprocess a data file.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let df = load_table(path)?;
        let (table, partitions) = preprocess(&df)?;
        Ok(Self { table, partitions })
    }
}
