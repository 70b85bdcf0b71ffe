use crate::engine::ranking::vehicle_stats;
use crate::engine::types::ConsistencyEntry;
use crate::record::ProcessedRecord;

/// Per-vehicle dispersion, highest coefficient of variation first.
///
/// Vehicles with equal CV keep their first-seen order.
pub fn consistency(records: &[ProcessedRecord]) -> Vec<ConsistencyEntry> {
    let mut entries: Vec<ConsistencyEntry> = vehicle_stats(records)
        .into_iter()
        .map(|v| ConsistencyEntry {
            is_inconsistent: v.stats.is_inconsistent(),
            vehicle: v.vehicle,
            mean: v.stats.mean,
            standard_deviation: v.stats.standard_deviation,
            coefficient_of_variation: v.stats.coefficient_of_variation,
        })
        .collect();

    entries.sort_by(|a, b| b.coefficient_of_variation.total_cmp(&a.coefficient_of_variation));
    entries
}

/// Only the vehicles flagged inconsistent, in the same order.
pub fn inconsistent(records: &[ProcessedRecord]) -> Vec<ConsistencyEntry> {
    consistency(records)
        .into_iter()
        .filter(|e| e.is_inconsistent)
        .collect()
}
