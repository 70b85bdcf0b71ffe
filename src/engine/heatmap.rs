//! Vehicle × month efficiency matrix.
//!
//! The engine only supplies numbers; tier colouring happens in
//! [`crate::tier`].

use crate::engine::grouping::{GroupBy, bucket};
use crate::engine::month;
use crate::engine::stats::BucketStats;
use crate::engine::types::{Heatmap, HeatmapCell, HeatmapRow};
use crate::record::ProcessedRecord;

/// Builds the matrix. Rows are in first-seen vehicle order, months and cells
/// in chronological order.
pub fn heatmap(records: &[ProcessedRecord]) -> Heatmap {
    let mut months: Vec<String> = bucket(records, GroupBy::Month)
        .into_keys()
        .map(|key| key.to_string())
        .collect();
    months.sort_by(|a, b| month::compare(a, b));

    let rows = bucket(records, GroupBy::Vehicle)
        .into_iter()
        .map(|(key, rows)| {
            let mut cells: Vec<HeatmapCell> = bucket(rows, GroupBy::Month)
                .into_iter()
                .map(|(month_key, rows)| HeatmapCell {
                    month: month_key.to_string(),
                    value: BucketStats::from_records(rows).mean,
                })
                .collect();
            cells.sort_by(|a, b| month::compare(&a.month, &b.month));

            HeatmapRow {
                vehicle: key.to_string(),
                cells,
            }
        })
        .collect();

    Heatmap { months, rows }
}

impl Heatmap {
    /// Restricts the matrix to the last `months` months, drops vehicles with no
    /// positive value in that window, and keeps at most `vehicles` rows.
    pub fn recent(&self, months: usize, vehicles: usize) -> Heatmap {
        let start = self.months.len() - months.min(self.months.len());
        let window = &self.months[start..];

        let rows = self
            .rows
            .iter()
            .map(|row| HeatmapRow {
                vehicle: row.vehicle.clone(),
                cells: row
                    .cells
                    .iter()
                    .filter(|c| window.contains(&c.month))
                    .cloned()
                    .collect(),
            })
            .filter(|row| row.cells.iter().any(|c| c.value > 0.0))
            .take(vehicles)
            .collect();

        Heatmap {
            months: window.to_vec(),
            rows,
        }
    }

    /// Value for a vehicle and month, `None` when the vehicle has no records that month.
    pub fn value(&self, vehicle: &str, month: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.vehicle == vehicle)?
            .cells
            .iter()
            .find(|c| c.month == month)
            .map(|c| c.value)
    }
}
