//! Stable descending rankings with top/bottom slicing.

use crate::engine::grouping::{GroupBy, bucket};
use crate::engine::stats::BucketStats;
use crate::engine::types::{GroupStats, ModelStats, VehicleStats};
use crate::record::ProcessedRecord;
use tracing::debug;

/// What a ranking is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    #[default]
    MeanEfficiency,
    TotalDistance,
}

impl Metric {
    pub fn value(self, stats: &BucketStats) -> f64 {
        match self {
            Metric::MeanEfficiency => stats.mean,
            Metric::TotalDistance => stats.total_distance,
        }
    }
}

/// A bucket that can take part in a ranking.
pub trait Ranked {
    fn label(&self) -> String;
    fn stats(&self) -> &BucketStats;
}

impl Ranked for VehicleStats {
    fn label(&self) -> String {
        self.vehicle.clone()
    }

    fn stats(&self) -> &BucketStats {
        &self.stats
    }
}

impl Ranked for ModelStats {
    fn label(&self) -> String {
        if self.brand.is_empty() {
            self.model.clone()
        } else {
            format!("{} ({})", self.model, self.brand)
        }
    }

    fn stats(&self) -> &BucketStats {
        &self.stats
    }
}

impl Ranked for GroupStats {
    fn label(&self) -> String {
        self.group.clone()
    }

    fn stats(&self) -> &BucketStats {
        &self.stats
    }
}

/// Sorts descending by `metric`. Equal values keep their input order and
/// empty buckets are dropped.
pub fn rank_by<T: Ranked>(mut items: Vec<T>, metric: Metric) -> Vec<T> {
    items.retain(|item| item.stats().count > 0);
    // sort_by is stable
    items.sort_by(|a, b| metric.value(b.stats()).total_cmp(&metric.value(a.stats())));
    items
}

/// First `n` entries of a ranking, or all of it when `n` is larger.
pub fn top_n<T>(ranked: &[T], n: usize) -> &[T] {
    &ranked[..n.min(ranked.len())]
}

/// Last `n` entries of a ranking in reverse, worst first.
pub fn bottom_n<T>(ranked: &[T], n: usize) -> Vec<&T> {
    let start = ranked.len() - n.min(ranked.len());
    ranked[start..].iter().rev().collect()
}

/// Per-vehicle statistics in first-seen order. Model, brand and group come
/// from the vehicle's first record.
pub fn vehicle_stats<'a, I>(records: I) -> Vec<VehicleStats>
where
    I: IntoIterator<Item = &'a ProcessedRecord>,
{
    bucket(records, GroupBy::Vehicle)
        .into_values()
        .map(|rows| {
            let first = rows[0];
            VehicleStats {
                vehicle: first.vehicle().to_string(),
                model: first.model().to_string(),
                brand: first.brand().to_string(),
                group: first.group().to_string(),
                stats: BucketStats::from_records(rows),
            }
        })
        .collect()
}

pub fn vehicle_ranking(records: &[ProcessedRecord], metric: Metric) -> Vec<VehicleStats> {
    let ranked = rank_by(vehicle_stats(records), metric);
    debug!(vehicles = ranked.len(), ?metric, "Vehicle ranking built");
    ranked
}

pub fn model_ranking(records: &[ProcessedRecord], metric: Metric) -> Vec<ModelStats> {
    let models = bucket(records, GroupBy::ModelBrand)
        .into_values()
        .map(|rows| ModelStats {
            model: rows[0].model().to_string(),
            brand: rows[0].brand().to_string(),
            stats: BucketStats::from_records(rows),
        })
        .collect();

    rank_by(models, metric)
}

pub fn group_stats(records: &[ProcessedRecord], metric: Metric) -> Vec<GroupStats> {
    let groups = bucket(records, GroupBy::Group)
        .into_values()
        .map(|rows| GroupStats {
            group: rows[0].group().to_string(),
            stats: BucketStats::from_records(rows),
        })
        .collect();

    rank_by(groups, metric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::{processed, with_distances};

    fn group(name: &str, mean: f64, count: usize) -> GroupStats {
        GroupStats {
            group: name.to_string(),
            stats: BucketStats {
                count,
                mean,
                ..Default::default()
            },
        }
    }

    fn labels<T: Ranked>(items: &[T]) -> Vec<String> {
        items.iter().map(Ranked::label).collect()
    }

    #[test]
    fn test_descending_by_mean() {
        let records = vec![
            processed("A", "G1", "01/2024", 7.5),
            processed("A", "G1", "02/2024", 8.0),
            processed("B", "G1", "01/2024", 6.0),
        ];

        let ranking = vehicle_ranking(&records, Metric::MeanEfficiency);
        assert_eq!(labels(&ranking), vec!["A", "B"]);
        assert_eq!(ranking[0].stats.mean, 7.75);
        assert_eq!(ranking[1].stats.mean, 6.0);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let items = vec![
            group("x", 5.0, 1),
            group("y", 9.0, 1),
            group("z", 5.0, 1),
            group("w", 9.0, 1),
        ];

        let ranked = rank_by(items, Metric::MeanEfficiency);
        assert_eq!(labels(&ranked), vec!["y", "w", "x", "z"]);
    }

    #[test]
    fn test_empty_buckets_are_omitted() {
        let ranked = rank_by(vec![group("x", 0.0, 0), group("y", 1.0, 1)], Metric::MeanEfficiency);
        assert_eq!(labels(&ranked), vec!["y"]);
    }

    #[test]
    fn test_by_total_distance() {
        let records = vec![
            with_distances(processed("A", "G1", "01/2024", 9.0), 100.0, 50.0),
            with_distances(processed("B", "G1", "01/2024", 1.0), 900.0, 50.0),
        ];

        let ranking = vehicle_ranking(&records, Metric::TotalDistance);
        assert_eq!(labels(&ranking), vec!["B", "A"]);
    }

    #[test]
    fn test_top_n_larger_than_len() {
        let ranked = vec![1, 2, 3];
        assert_eq!(top_n(&ranked, 10), &[1, 2, 3]);
        assert_eq!(top_n(&ranked, 2), &[1, 2]);
        assert!(top_n(&ranked, 0).is_empty());
    }

    #[test]
    fn test_bottom_n_is_reversed_tail() {
        let ranked = rank_by(
            vec![
                group("a", 9.0, 1),
                group("b", 7.0, 1),
                group("c", 7.0, 1),
                group("d", 3.0, 1),
            ],
            Metric::MeanEfficiency,
        );

        for n in 0..=ranked.len() {
            let expected: Vec<&GroupStats> = ranked[ranked.len() - n..].iter().rev().collect();
            assert_eq!(bottom_n(&ranked, n), expected);
        }
        let bottom: Vec<&str> = bottom_n(&ranked, 2).iter().map(|g| g.group.as_str()).collect();
        assert_eq!(bottom, vec!["d", "c"]);
        assert_eq!(bottom_n(&ranked, 99).len(), 4);
    }

    #[test]
    fn test_model_ranking_keys_on_model_and_brand() {
        let mut volvo = processed("A", "G1", "01/2024", 3.0);
        let mut scania = processed("B", "G1", "01/2024", 2.0);
        let mut volvo2 = processed("C", "G1", "01/2024", 2.0);
        crate::engine::test_support::set_model(&mut volvo, "FH", "Volvo");
        crate::engine::test_support::set_model(&mut scania, "FH", "Scania");
        crate::engine::test_support::set_model(&mut volvo2, "FH", "Volvo");

        let ranking = model_ranking(&[volvo, scania, volvo2], Metric::MeanEfficiency);
        assert_eq!(labels(&ranking), vec!["FH (Volvo)", "FH (Scania)"]);
        assert_eq!(ranking[0].stats.count, 2);
        assert_eq!(ranking[0].stats.mean, 2.5);
    }

    #[test]
    fn test_group_stats() {
        let records = vec![
            processed("A", "G1", "01/2024", 4.0),
            processed("B", "G2", "01/2024", 6.0),
            processed("C", "G1", "01/2024", 2.0),
        ];

        let groups = group_stats(&records, Metric::MeanEfficiency);
        assert_eq!(labels(&groups), vec!["G2", "G1"]);
        assert_eq!(groups[1].stats.mean, 3.0);
    }
}
