//! Per-bucket descriptive statistics and best/worst record selection.

use crate::engine::utility::{coefficient_of_variation, mean, std_dev};
use crate::record::ProcessedRecord;
use serde::Serialize;

/// A bucket whose coefficient of variation exceeds this percentage is inconsistent.
pub const INCONSISTENCY_CV_THRESHOLD: f64 = 15.0;

/// Statistics of one bucket of records. All fields are zero for an empty bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BucketStats {
    pub count: usize,
    /// Mean loaded efficiency.
    pub mean: f64,
    pub total_distance: f64,
    pub total_loaded_distance: f64,
    pub standard_deviation: f64,
    pub coefficient_of_variation: f64,
}

impl BucketStats {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ProcessedRecord>,
    {
        let mut efficiencies = Vec::new();
        let mut total_distance = 0.0;
        let mut total_loaded_distance = 0.0;

        for record in records {
            efficiencies.push(record.efficiency());
            total_distance += record.distance();
            total_loaded_distance += record.loaded_distance();
        }

        let avg = mean(&efficiencies);
        let sd = std_dev(&efficiencies, avg);

        BucketStats {
            count: efficiencies.len(),
            mean: avg,
            total_distance,
            total_loaded_distance,
            standard_deviation: sd,
            coefficient_of_variation: coefficient_of_variation(sd, avg),
        }
    }

    pub fn is_inconsistent(&self) -> bool {
        self.coefficient_of_variation > INCONSISTENCY_CV_THRESHOLD
    }
}

/// Record with the highest efficiency; the first one wins a tie.
pub fn best_record<'a, I>(records: I) -> Option<&'a ProcessedRecord>
where
    I: IntoIterator<Item = &'a ProcessedRecord>,
{
    records.into_iter().fold(None, |best, r| match best {
        Some(b) if r.efficiency() <= b.efficiency() => Some(b),
        _ => Some(r),
    })
}

/// Record with the lowest efficiency; the first one wins a tie.
pub fn worst_record<'a, I>(records: I) -> Option<&'a ProcessedRecord>
where
    I: IntoIterator<Item = &'a ProcessedRecord>,
{
    records.into_iter().fold(None, |worst, r| match worst {
        Some(w) if r.efficiency() >= w.efficiency() => Some(w),
        _ => Some(r),
    })
}
