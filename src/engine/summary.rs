use crate::engine::grouping::{GroupBy, bucket};
use crate::engine::stats::{BucketStats, best_record, worst_record};
use crate::engine::types::{FleetSummary, GroupSummary, RecordPick};
use crate::record::ProcessedRecord;
use std::collections::HashSet;

fn pick(record: &ProcessedRecord) -> RecordPick {
    RecordPick {
        vehicle: record.vehicle().to_string(),
        month: record.month().to_string(),
        efficiency: record.efficiency(),
    }
}

/// Headline numbers for any set of records.
pub fn summarize<'a, I>(records: I) -> FleetSummary
where
    I: IntoIterator<Item = &'a ProcessedRecord>,
    I::IntoIter: Clone,
{
    let records = records.into_iter();
    let stats = BucketStats::from_records(records.clone());
    let vehicles: HashSet<&str> = records.clone().map(ProcessedRecord::vehicle).collect();

    FleetSummary {
        vehicle_count: vehicles.len(),
        record_count: stats.count,
        mean_loaded_efficiency: stats.mean,
        total_distance: stats.total_distance,
        total_loaded_distance: stats.total_loaded_distance,
        best_vehicle: best_record(records.clone()).map(pick),
        worst_vehicle: worst_record(records).map(pick),
    }
}

pub fn fleet_summary(records: &[ProcessedRecord]) -> FleetSummary {
    summarize(records)
}

/// One summary per group, groups in alphabetical order.
pub fn group_summaries(records: &[ProcessedRecord]) -> Vec<GroupSummary> {
    let mut groups: Vec<GroupSummary> = bucket(records, GroupBy::Group)
        .into_iter()
        .map(|(key, rows)| GroupSummary {
            group: key.to_string(),
            summary: summarize(rows.iter().copied()),
        })
        .collect();

    groups.sort_by(|a, b| a.group.cmp(&b.group));
    groups
}
