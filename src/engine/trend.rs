//! Chronological monthly series.

use crate::engine::grouping::{BucketKey, GroupBy, bucket};
use crate::engine::month;
use crate::engine::stats::BucketStats;
use crate::engine::types::{GroupTrendPoint, TrendPoint};
use crate::record::ProcessedRecord;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Fleet-wide mean efficiency per month, oldest first.
pub fn monthly_trend(records: &[ProcessedRecord]) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = bucket(records, GroupBy::Month)
        .into_iter()
        .map(|(key, rows)| {
            let stats = BucketStats::from_records(rows);
            TrendPoint {
                month: key.to_string(),
                mean: stats.mean,
                count: stats.count,
            }
        })
        .collect();

    points.sort_by(|a, b| month::compare(&a.month, &b.month));
    points
}

/// Mean efficiency per group per month, oldest first.
pub fn group_monthly_trend(records: &[ProcessedRecord]) -> Vec<GroupTrendPoint> {
    let mut months: IndexMap<String, BTreeMap<String, f64>> = IndexMap::new();

    for (key, rows) in bucket(records, GroupBy::GroupMonth) {
        if let BucketKey::GroupMonth { group, month } = key {
            let stats = BucketStats::from_records(rows);
            months.entry(month).or_default().insert(group, stats.mean);
        }
    }

    let mut points: Vec<GroupTrendPoint> = months
        .into_iter()
        .map(|(month, groups)| GroupTrendPoint { month, groups })
        .collect();

    points.sort_by(|a, b| month::compare(&a.month, &b.month));
    points
}
