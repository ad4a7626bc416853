use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use itertools::Itertools;

use crate::assignment::{nearest_centroid, Partition};
use crate::convergence::Termination;
use crate::dataset::Dataset;
use crate::diagnostics::FitSummary;
use crate::distance::DistanceMetric;
use crate::error::{Error, Result};

/// The trained state of a k-centroid fit, converged or not.
#[derive(Debug, Clone)]
pub struct FittedModel {
    pub(crate) centroids: Vec<Vec<f64>>,
    pub(crate) labels: Vec<usize>,
    pub(crate) partition: Partition,
    pub(crate) cluster_costs: Vec<f64>,
    pub(crate) total_cost: f64,
    pub(crate) termination: Termination,
    pub(crate) iterations: usize,
    pub(crate) initial_indices: Vec<usize>,
    pub(crate) metric: Arc<dyn DistanceMetric>,
    pub(crate) n_columns: usize,
    pub(crate) warnings: Vec<String>,
    pub(crate) notices: Vec<String>,
    pub(crate) summary: FitSummary,
    pub(crate) elapsed: Duration,
}

impl FittedModel {
    /// Copies of the final representatives, indexed by label.
    pub fn centroids(&self) -> Vec<Vec<f64>> {
        self.centroids.clone()
    }

    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn cluster_costs(&self) -> &[f64] {
        &self.cluster_costs
    }

    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    // Passes that missed the threshold; the converging pass is not counted.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn initial_indices(&self) -> &[usize] {
        &self.initial_indices
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn summary(&self) -> &FitSummary {
        &self.summary
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Label of the centroid nearest to `record`, under the metric used for
    /// fitting. `record` must live in the same feature space as the training
    /// matrix, i.e. already normalized if a normalizer was configured.
    pub fn predict(&self, record: &[f64]) -> Result<usize> {
        if record.len() != self.n_columns {
            return Err(Error::DimensionMismatch {
                expected: self.n_columns,
                found: record.len(),
            });
        }

        Ok(nearest_centroid(record, &self.centroids, self.metric.as_ref()))
    }

    pub fn predict_batch(&self, data: &Dataset) -> Result<Vec<usize>> {
        if data.n_columns() != self.n_columns {
            return Err(Error::DimensionMismatch {
                expected: self.n_columns,
                found: data.n_columns(),
            });
        }

        Ok((0..data.n_records())
            .map(|idx| nearest_centroid(data.row(idx), &self.centroids, self.metric.as_ref()))
            .collect())
    }
}

impl fmt::Display for FittedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "k={} cost={} converged={} iterations={}",
            self.k(),
            self.total_cost,
            self.converged(),
            self.iterations
        )?;
        for (label, centroid) in self.centroids.iter().enumerate() {
            writeln!(
                f,
                "centroid {} ({} members): [{}]",
                label,
                self.partition.members(label).len(),
                centroid.iter().join(", ")
            )?;
        }
        Ok(())
    }
}
