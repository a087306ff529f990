//! Data Processor Module
//! Cleans the loaded frame into typed records and splits it into the fixed
//! historical periods.

use super::loader::{LoadError, DATE_COLUMN};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Serialize, Serializer};

/// Legacy column carried by some exports; always zero.
pub const OPEN_INT_COLUMN: &str = "OpenInt";

/// Text date layouts tried in order when the CSV reader left `Date` as strings.
/// Only these are recognised; ambiguous day-first forms are not.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// One trading day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(rename = "Date", serialize_with = "serialize_iso_midnight")]
    pub date: NaiveDate,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "Volume")]
    pub volume: i64,
}

fn serialize_iso_midnight<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&date.format("%Y-%m-%dT00:00:00.000"))
}

/// Cleaned table, sorted by date descending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    /// Build a table from records in any order.
    pub fn from_records(mut records: Vec<Record>) -> Self {
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Leading rows, with head semantics for negative counts: `-n` keeps all
    /// but the last `n` rows.
    pub fn head(&self, n: i64) -> &[Record] {
        let len = self.records.len();
        let end = if n >= 0 {
            usize::try_from(n).unwrap_or(usize::MAX).min(len)
        } else {
            let skip = usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX);
            len.saturating_sub(skip)
        };
        &self.records[..end]
    }
}

/// A fixed, inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub name: &'static str,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The three historical periods, oldest first.
pub fn periods() -> [Period; 3] {
    [
        Period {
            name: "1991-1999",
            start: ymd(1991, 12, 16),
            end: ymd(1999, 12, 31),
        },
        Period {
            name: "2000-2009",
            start: ymd(2000, 1, 1),
            end: ymd(2009, 12, 31),
        },
        Period {
            name: "2010-2017",
            start: ymd(2010, 1, 1),
            end: ymd(2017, 11, 10),
        },
    ]
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Records of the clean table that fall inside one period.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub period: Period,
    pub records: Vec<Record>,
}

impl Partition {
    pub fn name(&self) -> &'static str {
        self.period.name
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Split a table into the fixed periods. Records outside every period are
/// dropped; each partition keeps the table's descending order.
pub fn partition(table: &Table) -> [Partition; 3] {
    periods().map(|period| Partition {
        period,
        records: table
            .records()
            .iter()
            .filter(|r| period.contains(r.date))
            .cloned()
            .collect(),
    })
}

/// Drop `OpenInt`, coerce `Date`, re-sort newest first and partition.
pub fn preprocess(df: &DataFrame) -> Result<(Table, [Partition; 3]), LoadError> {
    let df = if df.column(OPEN_INT_COLUMN).is_ok() {
        df.drop(OPEN_INT_COLUMN)?
    } else {
        df.clone()
    };

    let dates = date_values(&df)?;
    let open = float_values(&df, "Open")?;
    let high = float_values(&df, "High")?;
    let low = float_values(&df, "Low")?;
    let close = float_values(&df, "Close")?;
    let volume = int_values(&df, "Volume")?;

    let records: Vec<Record> = (0..df.height())
        .map(|i| Record {
            date: dates[i],
            open: open[i],
            high: high[i],
            low: low[i],
            close: close[i],
            volume: volume[i],
        })
        .collect();

    let table = Table::from_records(records);
    let partitions = partition(&table);
    Ok((table, partitions))
}

fn required_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, LoadError> {
    df.column(name)
        .map_err(|_| LoadError::MissingColumn(name.to_string()))
}

fn null_at(column: &str, row: usize) -> LoadError {
    LoadError::InvalidValue {
        column: column.to_string(),
        row,
        reason: "missing value".to_string(),
    }
}

/// Accepts a parsed date/datetime column, or strings in one of `DATE_FORMATS`.
fn date_values(df: &DataFrame) -> Result<Vec<NaiveDate>, LoadError> {
    let column = required_column(df, DATE_COLUMN)?;

    if column.dtype() == &DataType::String {
        let strings = column.str()?;
        return strings
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                let value = value.ok_or_else(|| null_at(DATE_COLUMN, row))?;
                parse_date_text(value.trim()).ok_or_else(|| LoadError::InvalidValue {
                    column: DATE_COLUMN.to_string(),
                    row,
                    reason: format!("unrecognised date {:?}", value),
                })
            })
            .collect();
    }

    let days = column.cast(&DataType::Date)?.cast(&DataType::Int32)?;
    let days = days.i32()?;
    days.into_iter()
        .enumerate()
        .map(|(row, value)| {
            let value = value.ok_or_else(|| null_at(DATE_COLUMN, row))?;
            value
                .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
                .and_then(NaiveDate::from_num_days_from_ce_opt)
                .ok_or_else(|| LoadError::InvalidValue {
                    column: DATE_COLUMN.to_string(),
                    row,
                    reason: format!("day offset {} out of range", value),
                })
        })
        .collect()
}

fn parse_date_text(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

fn float_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, LoadError> {
    let column = required_column(df, name)?.cast(&DataType::Float64)?;
    let values = column.f64()?;
    values
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| null_at(name, row)))
        .collect()
}

fn int_values(df: &DataFrame, name: &str) -> Result<Vec<i64>, LoadError> {
    let column = required_column(df, name)?.cast(&DataType::Int64)?;
    let values = column.i64()?;
    values
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| null_at(name, row)))
        .collect()
}
