//! Statistics Calculator Module
//! Monthly volume aggregation over the period partitions.

use crate::data::Partition;
use chrono::{Datelike, NaiveDate};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Mean volume for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyPoint {
    /// First day of the month.
    pub month: NaiveDate,
    pub mean_volume: f64,
}

/// Chronological monthly means for one partition.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySeries {
    pub name: String,
    pub points: Vec<MonthlyPoint>,
}

/// Handles monthly aggregation with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Per-month arithmetic mean of `Volume`. `None` for an empty partition.
    pub fn monthly_mean_volume(partition: &Partition) -> Option<MonthlySeries> {
        if partition.is_empty() {
            return None;
        }

        let mut months: BTreeMap<NaiveDate, (i128, usize)> = BTreeMap::new();
        for record in &partition.records {
            let entry = months.entry(Self::month_start(record.date)).or_insert((0, 0));
            entry.0 += i128::from(record.volume);
            entry.1 += 1;
        }

        let points = months
            .into_iter()
            .map(|(month, (total, count))| MonthlyPoint {
                month,
                mean_volume: total as f64 / count as f64,
            })
            .collect();

        Some(MonthlySeries {
            name: partition.name().to_string(),
            points,
        })
    }

    /// Series for every non-empty partition, in partition order.
    pub fn monthly_mean_volume_all(partitions: &[Partition]) -> Vec<MonthlySeries> {
        partitions
            .par_iter()
            .filter_map(Self::monthly_mean_volume)
            .collect()
    }

    fn month_start(date: NaiveDate) -> NaiveDate {
        date.with_day(1).unwrap_or(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{periods, Record};

    fn record(date: &str, volume: i64) -> Record {
        Record {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            open: 10.0,
            high: 11.0,
            low: 9.0,
            close: 10.5,
            volume,
        }
    }

    fn partition_of(records: Vec<Record>) -> Partition {
        Partition {
            period: periods()[2],
            records,
        }
    }

    #[test]
    fn test_single_month_mean() {
        let p = partition_of(vec![
            record("2012-03-30", 300),
            record("2012-03-02", 100),
            record("2012-03-15", 201),
        ]);
        let series = StatsCalculator::monthly_mean_volume(&p).unwrap();
        assert_eq!(series.name, "2010-2017");
        assert_eq!(series.points.len(), 1);
        assert_eq!(series.points[0].month, NaiveDate::from_ymd_opt(2012, 3, 1).unwrap());
        assert_eq!(series.points[0].mean_volume, 601.0 / 3.0);
    }

    #[test]
    fn test_single_row_month_is_exact() {
        let p = partition_of(vec![record("2014-08-19", 123_456_789)]);
        let series = StatsCalculator::monthly_mean_volume(&p).unwrap();
        assert_eq!(series.points[0].mean_volume, 123_456_789.0);
    }

    #[test]
    fn test_months_are_chronological() {
        let p = partition_of(vec![
            record("2013-02-01", 20),
            record("2012-12-31", 10),
            record("2012-11-05", 5),
            record("2013-02-28", 40),
        ]);
        let series = StatsCalculator::monthly_mean_volume(&p).unwrap();
        let months: Vec<String> = series.points.iter().map(|p| p.month.to_string()).collect();
        assert_eq!(months, vec!["2012-11-01", "2012-12-01", "2013-02-01"]);
        assert_eq!(series.points[2].mean_volume, 30.0);
    }

    #[test]
    fn test_empty_partition_is_absent() {
        assert!(StatsCalculator::monthly_mean_volume(&partition_of(Vec::new())).is_none());
    }

    #[test]
    fn test_all_skips_empty_partitions() {
        let [a, b, c] = periods();
        let partitions = vec![
            Partition {
                period: a,
                records: vec![record("1995-01-03", 1)],
            },
            Partition {
                period: b,
                records: Vec::new(),
            },
            Partition {
                period: c,
                records: vec![record("2011-01-03", 2)],
            },
        ];
        let all = StatsCalculator::monthly_mean_volume_all(&partitions);
        let names: Vec<&str> = all.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["1991-1999", "2010-2017"]);
    }
}
