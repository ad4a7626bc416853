use rayon::prelude::*;

use crate::assignment::Partition;
use crate::centroid::CentroidStrategy;
use crate::dataset::Dataset;
use crate::distance::DistanceMetric;

/// Divergence of every cluster from the centroid that produced the partition.
/// Empty clusters cost 0.
pub fn cluster_costs<S: CentroidStrategy + ?Sized>(
    data: &Dataset,
    partition: &Partition,
    centroids: &[Vec<f64>],
    strategy: &S,
    metric: &dyn DistanceMetric,
    parallel: bool,
) -> Vec<f64> {
    let cost_of = |label: usize| -> f64 {
        let members = partition.members(label);
        if members.is_empty() {
            0.0
        } else {
            strategy.cost(data, members, &centroids[label], metric)
        }
    };

    if parallel {
        (0..partition.k()).into_par_iter().map(cost_of).collect()
    } else {
        (0..partition.k()).map(cost_of).collect()
    }
}

/// Total cost of the system. Summed in label order so that serial and
/// parallel runs agree bit for bit.
pub fn calculate_inertia(costs: &[f64]) -> f64 {
    costs.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centroid::{MeanStrategy, MedoidStrategy};
    use crate::distance::Euclidean;

    #[test]
    fn test_costs_per_cluster() {
        let data = Dataset::from_rows(&[vec![0.0], vec![2.0], vec![10.0]]).unwrap();
        let partition = Partition::from_labels(&[0, 0, 1], 3);
        let centroids = vec![vec![1.0], vec![10.0], vec![50.0]];

        let mean = cluster_costs(&data, &partition, &centroids, &MeanStrategy, &Euclidean, false);
        assert_eq!(mean, vec![2.0, 0.0, 0.0]);
        assert_eq!(calculate_inertia(&mean), 2.0);

        let medoid = cluster_costs(&data, &partition, &centroids, &MedoidStrategy, &Euclidean, true);
        assert_eq!(medoid, vec![2.0, 0.0, 0.0]);
    }
}
