use std::fmt::Debug;

use crate::dataset::Dataset;
use crate::distance::DistanceMetric;

/// The variant-specific half of a k-centroid algorithm.
///
/// The engine owns assignment and the convergence loop; a strategy only says
/// how far a cluster is from its representative and how to recompute that
/// representative from the cluster's members.
pub trait CentroidStrategy: Debug + Send + Sync {
    /// Divergence of `members` from `representative`. Must be `>= 0`.
    fn cost(
        &self,
        data: &Dataset,
        members: &[usize],
        representative: &[f64],
        metric: &dyn DistanceMetric,
    ) -> f64;

    /// Recompute the representative of a cluster. `members` is never empty and
    /// is sorted by record index. The result must have `data.n_columns()`
    /// finite entries.
    fn update(&self, data: &Dataset, members: &[usize], metric: &dyn DistanceMetric) -> Vec<f64>;

    fn name(&self) -> &'static str {
        "custom"
    }
}

/// k-means: the representative is the componentwise mean of the members and
/// the cost is the sum of squared distances to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanStrategy;

impl CentroidStrategy for MeanStrategy {
    fn cost(
        &self,
        data: &Dataset,
        members: &[usize],
        representative: &[f64],
        metric: &dyn DistanceMetric,
    ) -> f64 {
        members
            .iter()
            .map(|&idx| {
                let distance = metric.distance(data.row(idx), representative);
                distance * distance
            })
            .sum()
    }

    fn update(&self, data: &Dataset, members: &[usize], _metric: &dyn DistanceMetric) -> Vec<f64> {
        let mut centroid = vec![0.0; data.n_columns()];
        for &idx in members {
            for (c, &x) in centroid.iter_mut().zip(data.row(idx)) {
                *c += x;
            }
        }

        let count = members.len() as f64;
        for c in centroid.iter_mut() {
            *c /= count;
        }
        centroid
    }

    fn name(&self) -> &'static str {
        "k-means"
    }
}

/// k-medoids: the representative is the member with the smallest summed
/// distance to the rest of its cluster, and the cost is the sum of distances.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedoidStrategy;

impl CentroidStrategy for MedoidStrategy {
    fn cost(
        &self,
        data: &Dataset,
        members: &[usize],
        representative: &[f64],
        metric: &dyn DistanceMetric,
    ) -> f64 {
        members
            .iter()
            .map(|&idx| metric.distance(data.row(idx), representative))
            .sum()
    }

    fn update(&self, data: &Dataset, members: &[usize], metric: &dyn DistanceMetric) -> Vec<f64> {
        let mut best = members[0];
        let mut best_cost = f64::INFINITY;

        for &candidate in members {
            let medoid = data.row(candidate);
            let cost: f64 = members
                .iter()
                .map(|&idx| metric.distance(data.row(idx), medoid))
                .sum();
            // Strict comparison keeps the lowest record index on ties.
            if cost < best_cost {
                best_cost = cost;
                best = candidate;
            }
        }

        data.row(best).to_vec()
    }

    fn name(&self) -> &'static str {
        "k-medoids"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{Euclidean, Manhattan};

    fn data() -> Dataset {
        Dataset::from_rows(&[
            vec![0.0, 0.0],
            vec![2.0, 0.0],
            vec![4.0, 0.0],
            vec![0.0, 6.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_mean_update() {
        let centroid = MeanStrategy.update(&data(), &[0, 1, 2], &Euclidean);
        assert_eq!(centroid, vec![2.0, 0.0]);
    }

    #[test]
    fn test_mean_cost_is_sum_of_squares() {
        let cost = MeanStrategy.cost(&data(), &[0, 1, 2], &[2.0, 0.0], &Euclidean);
        assert_eq!(cost, 8.0);
    }

    #[test]
    fn test_medoid_update_picks_central_member() {
        let medoid = MedoidStrategy.update(&data(), &[0, 1, 2], &Euclidean);
        assert_eq!(medoid, vec![2.0, 0.0]);
    }

    #[test]
    fn test_medoid_tie_goes_to_lowest_record() {
        // Both members are equally central.
        let medoid = MedoidStrategy.update(&data(), &[0, 1], &Manhattan);
        assert_eq!(medoid, vec![0.0, 0.0]);
    }

    #[test]
    fn test_medoid_cost_is_sum_of_distances() {
        let cost = MedoidStrategy.cost(&data(), &[0, 1, 2], &[2.0, 0.0], &Euclidean);
        assert_eq!(cost, 4.0);
    }

    #[test]
    fn test_singleton_cluster_has_zero_cost() {
        let d = data();
        for strategy in [&MeanStrategy as &dyn CentroidStrategy, &MedoidStrategy] {
            let rep = strategy.update(&d, &[3], &Euclidean);
            assert_eq!(rep, vec![0.0, 6.0]);
            assert_eq!(strategy.cost(&d, &[3], &rep, &Euclidean), 0.0);
        }
    }
}
