//! Output shapes handed to the presentation layer.

use crate::engine::stats::BucketStats;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// A single record picked out of a data set (best or worst).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordPick {
    pub vehicle: String,
    pub month: String,
    pub efficiency: f64,
}

/// Fleet-wide (or group-wide) headline numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FleetSummary {
    pub vehicle_count: usize,
    pub record_count: usize,
    pub mean_loaded_efficiency: f64,
    pub total_distance: f64,
    pub total_loaded_distance: f64,
    pub best_vehicle: Option<RecordPick>,
    pub worst_vehicle: Option<RecordPick>,
}

/// Summary restricted to the records of one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub group: String,
    #[serde(flatten)]
    pub summary: FleetSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleStats {
    pub vehicle: String,
    pub model: String,
    pub brand: String,
    pub group: String,
    #[serde(flatten)]
    pub stats: BucketStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelStats {
    pub model: String,
    pub brand: String,
    #[serde(flatten)]
    pub stats: BucketStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub group: String,
    #[serde(flatten)]
    pub stats: BucketStats,
}

/// Mean efficiency of one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: String,
    pub mean: f64,
    pub count: usize,
}

/// Mean efficiency per group for one month. Groups without records that month
/// are absent rather than zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTrendPoint {
    pub month: String,
    pub groups: BTreeMap<String, f64>,
}

/// A vehicle and its mean efficiency within some bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leader {
    pub vehicle: String,
    pub mean: f64,
}

/// Top and bottom vehicles of a month, populated by sample size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyLeaders {
    pub month: String,
    pub vehicle_count: usize,
    pub best: Option<Leader>,
    pub second_best: Option<Leader>,
    pub worst: Option<Leader>,
    pub second_worst: Option<Leader>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyEntry {
    pub vehicle: String,
    pub mean: f64,
    pub standard_deviation: f64,
    pub coefficient_of_variation: f64,
    pub is_inconsistent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub month: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapRow {
    pub vehicle: String,
    pub cells: Vec<HeatmapCell>,
}

/// Vehicle × month matrix of mean efficiency. Only months in which a vehicle
/// has records appear among its cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Heatmap {
    pub months: Vec<String>,
    pub rows: Vec<HeatmapRow>,
}

/// Every derived view of one data snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub summary: FleetSummary,
    pub vehicle_ranking: Vec<VehicleStats>,
    pub model_ranking: Vec<ModelStats>,
    pub group_stats: Vec<GroupStats>,
    pub group_summaries: Vec<GroupSummary>,
    pub monthly_trend: Vec<TrendPoint>,
    pub group_trend: Vec<GroupTrendPoint>,
    pub monthly_leaders: Vec<MonthlyLeaders>,
    pub consistency: Vec<ConsistencyEntry>,
    pub heatmap: Heatmap,
}
