//! Best and worst vehicles of each month.
//!
//! Sparse months do not get a full top-2/bottom-2. Which slots are filled is
//! decided by [`SLOT_LAYOUTS`], keyed by how many vehicles ran that month:
//!
//! | Vehicles | best | second best | worst | second worst |
//! |----------|------|-------------|-------|--------------|
//! | 1        | yes  |             |       |              |
//! | 2        | yes  |             | yes   |              |
//! | 3        | yes  |             | yes   |              |
//! | 4+       | yes  | yes         | yes   | yes          |

use crate::engine::grouping::{GroupBy, bucket};
use crate::engine::month;
use crate::engine::ranking::{Metric, rank_by, vehicle_stats};
use crate::engine::types::{Leader, MonthlyLeaders, VehicleStats};
use crate::record::ProcessedRecord;

/// Which leader slots a month populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLayout {
    pub best: bool,
    pub second_best: bool,
    pub worst: bool,
    pub second_worst: bool,
}

const fn layout(best: bool, second_best: bool, worst: bool, second_worst: bool) -> SlotLayout {
    SlotLayout {
        best,
        second_best,
        worst,
        second_worst,
    }
}

/// Indexed by `min(vehicles, 4) - 1`.
pub static SLOT_LAYOUTS: [SlotLayout; 4] = [
    layout(true, false, false, false),
    layout(true, false, true, false),
    layout(true, false, true, false),
    layout(true, true, true, true),
];

/// Slot layout for a month with `vehicles` distinct vehicles; `None` for zero.
pub fn slot_layout(vehicles: usize) -> Option<SlotLayout> {
    if vehicles == 0 {
        return None;
    }
    Some(SLOT_LAYOUTS[vehicles.min(SLOT_LAYOUTS.len()) - 1])
}

fn leader(ranked: &[VehicleStats], index: usize, filled: bool) -> Option<Leader> {
    if !filled {
        return None;
    }
    ranked.get(index).map(|v| Leader {
        vehicle: v.vehicle.clone(),
        mean: v.stats.mean,
    })
}

/// Leaders for a single month's records.
pub fn leaders_for_month<'a, I>(month: &str, records: I) -> MonthlyLeaders
where
    I: IntoIterator<Item = &'a ProcessedRecord>,
{
    let ranked = rank_by(vehicle_stats(records), Metric::MeanEfficiency);

    let n = ranked.len();
    let mut leaders = MonthlyLeaders {
        month: month.to_string(),
        vehicle_count: n,
        best: None,
        second_best: None,
        worst: None,
        second_worst: None,
    };

    if let Some(slots) = slot_layout(n) {
        leaders.best = leader(&ranked, 0, slots.best);
        leaders.second_best = leader(&ranked, 1, slots.second_best);
        leaders.worst = leader(&ranked, n - 1, slots.worst);
        leaders.second_worst = leader(&ranked, n.saturating_sub(2), slots.second_worst);
    }

    leaders
}

/// Leaders of every month, oldest first.
pub fn monthly_leaders(records: &[ProcessedRecord]) -> Vec<MonthlyLeaders> {
    let mut months: Vec<MonthlyLeaders> = bucket(records, GroupBy::Month)
        .into_iter()
        .map(|(key, rows)| leaders_for_month(&key.to_string(), rows))
        .collect();

    months.sort_by(|a, b| month::compare(&a.month, &b.month));
    months
}
