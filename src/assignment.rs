use rayon::prelude::*;

use crate::dataset::Dataset;
use crate::distance::DistanceMetric;

/// Members of every cluster, indexed by label. Each record index in
/// `0..n_records` appears in exactly one member list, and every list is sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    clusters: Vec<Vec<usize>>,
}

impl Partition {
    /// Group record indices by label. Rebuilt from scratch on every call.
    pub fn from_labels(labels: &[usize], k: usize) -> Self {
        let mut clusters = vec![Vec::new(); k];
        for (idx, &label) in labels.iter().enumerate() {
            clusters[label].push(idx);
        }
        Self { clusters }
    }

    pub fn k(&self) -> usize {
        self.clusters.len()
    }

    pub fn members(&self, cluster: usize) -> &[usize] {
        &self.clusters[cluster]
    }

    pub fn clusters(&self) -> &[Vec<usize>] {
        &self.clusters
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(Vec::len).collect()
    }

    /// Labels of clusters without members, ascending.
    pub fn empty_clusters(&self) -> Vec<usize> {
        self.clusters
            .iter()
            .enumerate()
            .filter(|(_, members)| members.is_empty())
            .map(|(label, _)| label)
            .collect()
    }
}

/// Output of one assignment pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub labels: Vec<usize>,
    pub partition: Partition,
}

/// Index of the centroid closest to `point`.
///
/// Scans left to right and only replaces the best on a strictly smaller
/// distance, so ties resolve to the lowest index.
#[inline]
pub fn nearest_centroid(
    point: &[f64],
    centroids: &[Vec<f64>],
    metric: &dyn DistanceMetric,
) -> usize {
    let mut best_idx = 0;
    let mut best_distance = f64::INFINITY;
    for (centroid_idx, centroid) in centroids.iter().enumerate() {
        let distance = metric.distance(point, centroid);
        if distance < best_distance {
            best_distance = distance;
            best_idx = centroid_idx;
        }
    }
    best_idx
}

/// Label every record with its nearest centroid and group the labels.
///
/// In parallel mode each record writes only its own slot, so the result is
/// identical to the serial pass.
pub fn assign(
    data: &Dataset,
    centroids: &[Vec<f64>],
    metric: &dyn DistanceMetric,
    parallel: bool,
) -> Assignment {
    let labels: Vec<usize> = if parallel {
        (0..data.n_records())
            .into_par_iter()
            .map(|idx| nearest_centroid(data.row(idx), centroids, metric))
            .collect()
    } else {
        (0..data.n_records())
            .map(|idx| nearest_centroid(data.row(idx), centroids, metric))
            .collect()
    };

    let partition = Partition::from_labels(&labels, centroids.len());
    Assignment { labels, partition }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Euclidean;

    #[test]
    fn test_tie_goes_to_lower_index() {
        let centroids = vec![vec![-1.0, 0.0], vec![1.0, 0.0]];
        assert_eq!(nearest_centroid(&[0.0, 0.0], &centroids, &Euclidean), 0);

        let reversed = vec![vec![1.0, 0.0], vec![-1.0, 0.0]];
        assert_eq!(nearest_centroid(&[0.0, 0.0], &reversed, &Euclidean), 0);
    }

    #[test]
    fn test_duplicate_centroids_keep_first() {
        let centroids = vec![vec![5.0], vec![1.0], vec![1.0]];
        assert_eq!(nearest_centroid(&[1.0], &centroids, &Euclidean), 1);
    }

    #[test]
    fn test_partition_matches_labels() {
        let data = Dataset::from_rows(&[
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![10.0, 0.0],
            vec![10.0, 1.0],
        ])
        .unwrap();
        let centroids = vec![vec![0.0, 0.0], vec![10.0, 0.0]];
        let assignment = assign(&data, &centroids, &Euclidean, false);

        assert_eq!(assignment.labels, vec![0, 0, 1, 1]);
        assert_eq!(assignment.partition.members(0), &[0, 1]);
        assert_eq!(assignment.partition.members(1), &[2, 3]);
        for (idx, &label) in assignment.labels.iter().enumerate() {
            assert!(assignment.partition.members(label).contains(&idx));
        }
    }

    #[test]
    fn test_empty_clusters_reported() {
        let partition = Partition::from_labels(&[0, 0, 2], 4);
        assert_eq!(partition.empty_clusters(), vec![1, 3]);
        assert_eq!(partition.sizes(), vec![2, 0, 1, 0]);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let rows: Vec<Vec<f64>> = (0..500)
            .map(|i| vec![(i % 17) as f64, (i % 5) as f64 * 0.5])
            .collect();
        let data = Dataset::from_rows(&rows).unwrap();
        let centroids = vec![vec![0.0, 0.0], vec![8.0, 1.0], vec![16.0, 2.0]];

        let serial = assign(&data, &centroids, &Euclidean, false);
        let parallel = assign(&data, &centroids, &Euclidean, true);
        assert_eq!(serial, parallel);
    }
}
