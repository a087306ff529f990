//! Stats module - Monthly aggregation

mod calculator;

pub use calculator::{MonthlyPoint, MonthlySeries, StatsCalculator};
