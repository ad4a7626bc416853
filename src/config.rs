//! Parameters for a k-centroid fit.

use std::fmt;
use std::sync::Arc;

use crate::dataset::Normalizer;
use crate::distance::{DistanceMetric, Euclidean};
use crate::error::{Error, Result};
use crate::initialization::DEFAULT_SEED;

pub const DEFAULT_MAX_ITER: usize = 100;
pub const DEFAULT_MIN_CHANGE: f64 = 0.005;
/// Parallel execution is only used when rayon reports at least this many threads.
pub const DEFAULT_MIN_PARALLEL_THREADS: usize = 4;

/// What to do with a cluster that ends an assignment pass with no members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyClusterPolicy {
    /// Keep the previous representative unchanged.
    #[default]
    Freeze,
    /// Move the representative onto the record farthest from its own
    /// representative, taken from a cluster that keeps at least one member.
    Reseed,
    /// Abort the fit with [`Error::DegenerateCluster`].
    Fail,
}

#[derive(Debug, Clone)]
pub struct KCentroidParams {
    pub k: usize,
    pub max_iter: usize,
    /// The fit converges once the absolute change in total cost between two
    /// passes drops below this value.
    pub min_change: f64,
    /// Seed for the initial shuffle. Never used after initialization.
    pub seed: u64,
    pub metric: Arc<dyn DistanceMetric>,
    /// Applied once to the whole matrix before fitting. `None` disables
    /// normalization, which is allowed but produces a warning.
    pub normalizer: Option<Arc<dyn Normalizer>>,
    pub parallel: bool,
    pub min_parallel_threads: usize,
    pub empty_cluster_policy: EmptyClusterPolicy,
}

impl KCentroidParams {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            min_change: DEFAULT_MIN_CHANGE,
            seed: DEFAULT_SEED,
            metric: Arc::new(Euclidean),
            normalizer: None,
            parallel: false,
            min_parallel_threads: DEFAULT_MIN_PARALLEL_THREADS,
            empty_cluster_policy: EmptyClusterPolicy::default(),
        }
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_min_change(mut self, min_change: f64) -> Self {
        self.min_change = min_change;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_metric(mut self, metric: impl DistanceMetric + 'static) -> Self {
        self.metric = Arc::new(metric);
        self
    }

    pub fn with_normalizer(mut self, normalizer: impl Normalizer + 'static) -> Self {
        self.normalizer = Some(Arc::new(normalizer));
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_min_parallel_threads(mut self, threads: usize) -> Self {
        self.min_parallel_threads = threads;
        self
    }

    pub fn with_empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster_policy = policy;
        self
    }

    /// Check every bound against a dataset of `n_records` rows.
    pub fn validate(&self, n_records: usize) -> Result<()> {
        if self.k == 0 || self.k > n_records {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_records,
            });
        }

        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be positive, got 0".to_string(),
            });
        }

        if self.min_change.is_nan() || self.min_change <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "min_change",
                message: format!("must be positive, got {}", self.min_change),
            });
        }

        if self.min_parallel_threads == 0 {
            return Err(Error::InvalidParameter {
                name: "min_parallel_threads",
                message: "must be positive, got 0".to_string(),
            });
        }

        Ok(())
    }
}

impl fmt::Display for KCentroidParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let normalizer = self.normalizer.as_ref().map_or("none", |n| n.name());
        writeln!(f, "{:<22}{}", "k", self.k)?;
        writeln!(f, "{:<22}{}", "max_iter", self.max_iter)?;
        writeln!(f, "{:<22}{}", "min_change", self.min_change)?;
        writeln!(f, "{:<22}{}", "seed", self.seed)?;
        writeln!(f, "{:<22}{}", "metric", self.metric.name())?;
        writeln!(f, "{:<22}{}", "normalizer", normalizer)?;
        writeln!(f, "{:<22}{}", "parallel", self.parallel)?;
        writeln!(f, "{:<22}{}", "min_parallel_threads", self.min_parallel_threads)?;
        write!(f, "{:<22}{:?}", "empty_cluster_policy", self.empty_cluster_policy)
    }
}
