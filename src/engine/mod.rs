//! Fleet aggregation engine.
//!
//! Pure functions over an immutable snapshot of records: normalize, bucket,
//! compute statistics, rank, and build monthly series. Nothing is cached;
//! callers rebuild the report whenever the snapshot changes.

pub mod consistency;
pub mod grouping;
pub mod heatmap;
pub mod leaders;
pub mod month;
pub mod normalize;
pub mod ranking;
pub mod stats;
pub mod summary;
pub mod trend;
pub mod types;
pub mod utility;

use crate::record::{FleetRecord, ProcessedRecord};
use chrono::{DateTime, Utc};
use ranking::Metric;
use tracing::debug;
use types::DashboardReport;

impl DashboardReport {
    /// Normalizes `records` and derives every view, stamped with the current time.
    pub fn build(records: &[FleetRecord]) -> Self {
        Self::from_processed(&normalize::normalize_all(records), Utc::now())
    }

    /// Derives every view from already-normalized records.
    pub fn from_processed(records: &[ProcessedRecord], generated_at: DateTime<Utc>) -> Self {
        let report = DashboardReport {
            generated_at,
            summary: summary::fleet_summary(records),
            vehicle_ranking: ranking::vehicle_ranking(records, Metric::MeanEfficiency),
            model_ranking: ranking::model_ranking(records, Metric::MeanEfficiency),
            group_stats: ranking::group_stats(records, Metric::MeanEfficiency),
            group_summaries: summary::group_summaries(records),
            monthly_trend: trend::monthly_trend(records),
            group_trend: trend::group_monthly_trend(records),
            monthly_leaders: leaders::monthly_leaders(records),
            consistency: consistency::consistency(records),
            heatmap: heatmap::heatmap(records),
        };

        debug!(
            records = report.summary.record_count,
            vehicles = report.summary.vehicle_count,
            months = report.monthly_trend.len(),
            "Dashboard report built"
        );

        report
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::normalize::normalize;
    use crate::record::{FleetRecord, Measure, ProcessedRecord};

    pub fn processed(vehicle: &str, group: &str, month: &str, efficiency: f64) -> ProcessedRecord {
        normalize(FleetRecord {
            vehicle: vehicle.to_string(),
            group: group.to_string(),
            month: month.to_string(),
            loaded_average: Some(Measure::Number(efficiency)),
            ..Default::default()
        })
    }

    pub fn with_distances(record: ProcessedRecord, distance: f64, loaded: f64) -> ProcessedRecord {
        let mut raw = record.record().clone();
        raw.distance = Some(Measure::Number(distance));
        raw.loaded_distance = Some(Measure::Number(loaded));
        normalize(raw)
    }

    pub fn set_model(record: &mut ProcessedRecord, model: &str, brand: &str) {
        let mut raw = record.record().clone();
        raw.model = model.to_string();
        raw.brand = brand.to_string();
        *record = normalize(raw);
    }
}
