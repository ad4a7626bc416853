use std::time::Instant;

use rayon::prelude::*;

use crate::assignment::{assign, Assignment};
use crate::centroid::{CentroidStrategy, MeanStrategy, MedoidStrategy};
use crate::config::{EmptyClusterPolicy, KCentroidParams};
use crate::convergence::{ConvergenceController, Termination};
use crate::dataset::Dataset;
use crate::diagnostics::{Diagnostics, FitSummary, IterationSummary};
use crate::error::{Error, Result};
use crate::inertia::{calculate_inertia, cluster_costs};
use crate::initialization::{initial_centroids, initial_indices};
use crate::model::FittedModel;

/// Lloyd-style k-centroid clustering over a validated dataset.
///
/// Construction validates the parameters, applies the normalizer and draws
/// the initial centroid indices. [`fit`](KCentroid::fit) then runs the
/// assign/update/evaluate loop and can be called any number of times with
/// identical results.
#[derive(Debug, Clone)]
pub struct KCentroid<S: CentroidStrategy> {
    data: Dataset,
    params: KCentroidParams,
    strategy: S,
    initial_indices: Vec<usize>,
    parallel: bool,
    warnings: Vec<String>,
    notices: Vec<String>,
}

pub type KMeans = KCentroid<MeanStrategy>;
pub type KMedoids = KCentroid<MedoidStrategy>;

impl<S: CentroidStrategy + Default> KCentroid<S> {
    pub fn new(data: Dataset, params: KCentroidParams) -> Result<Self> {
        Self::with_strategy(data, params, S::default())
    }
}

impl<S: CentroidStrategy> KCentroid<S> {
    pub fn with_strategy(data: Dataset, params: KCentroidParams, strategy: S) -> Result<Self> {
        params.validate(data.n_records())?;
        log::info!(
            "{} init summary ({} records, {} columns):\n{}",
            strategy.name(),
            data.n_records(),
            data.n_columns(),
            params
        );
        let diagnostics = Diagnostics::new();

        let threads = rayon::current_num_threads();
        let parallel = params.parallel && threads >= params.min_parallel_threads;
        if params.parallel && !parallel {
            diagnostics.notice(format!(
                "min num threads required for parallel: {} (available: {}); running serially",
                params.min_parallel_threads, threads
            ));
        }

        if params.metric.is_expensive() {
            diagnostics.warn(format!(
                "running {} with the {} metric can be an expensive option",
                strategy.name(),
                params.metric.name()
            ));
        }

        if data.is_singular() {
            diagnostics.warn(format!(
                "all elements in input matrix are equal ({})",
                data.row(0)[0]
            ));
        }

        let data = match &params.normalizer {
            Some(normalizer) => {
                log::debug!("normalizing input with {}", normalizer.name());
                data.normalized(normalizer.as_ref())?
            }
            None => {
                diagnostics.warn("feature normalization option is set to false; this is discouraged");
                data
            }
        };

        let initial_indices = initial_indices(data.n_records(), params.k, params.seed)?;
        log::info!(
            "initialized {} with k={} from records {:?}",
            strategy.name(),
            params.k,
            initial_indices
        );

        let (warnings, notices) = diagnostics.into_parts();
        Ok(Self {
            data,
            params,
            strategy,
            initial_indices,
            parallel,
            warnings,
            notices,
        })
    }

    /// The (possibly normalized) matrix the model is fit on.
    pub fn data(&self) -> &Dataset {
        &self.data
    }

    pub fn params(&self) -> &KCentroidParams {
        &self.params
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn initial_indices(&self) -> &[usize] {
        &self.initial_indices
    }

    /// Whether fits run data-parallel. False when parallelism was requested
    /// but the thread pool is smaller than `min_parallel_threads`.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Warnings raised while building the model.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn fit(&self) -> Result<FittedModel> {
        let started = Instant::now();
        let diagnostics = Diagnostics::with_messages(&self.warnings, &self.notices);
        let metric = self.params.metric.as_ref();

        let mut centroids = initial_centroids(&self.data, &self.initial_indices);
        let mut controller = ConvergenceController::new(self.params.max_iter, self.params.min_change);
        let mut summary = FitSummary::default();

        let (assignment, costs, termination) = loop {
            let pass = controller.state().iteration + 1;
            if pass > 1 && pass % 10 == 1 {
                log::info!("Finished iteration {}", pass - 1);
            }

            let assignment = assign(&self.data, &centroids, metric, self.parallel);
            let empty_clusters = assignment.partition.empty_clusters().len();
            let updated = self.update_centroids(&assignment, &centroids, pass, &diagnostics)?;

            // Cost is measured against the centroids that produced this partition.
            let costs = cluster_costs(
                &self.data,
                &assignment.partition,
                &centroids,
                &self.strategy,
                metric,
                self.parallel,
            );
            let cost = calculate_inertia(&costs);
            centroids = updated;

            let step = controller.observe(cost);
            let state = controller.state();
            summary.push(IterationSummary {
                iteration: pass,
                cost,
                delta: state.delta,
                empty_clusters,
            });
            log::debug!(
                "iteration {}: cost={} delta={} empty={}",
                pass,
                cost,
                state.delta,
                empty_clusters
            );

            if let Some(termination) = step {
                break (assignment, costs, termination);
            }
        };

        let iterations = controller.state().iteration;
        match termination {
            Termination::Converged => log::info!("Converged after {} passes", summary.len()),
            Termination::Exhausted => log::info!(
                "Stopped after {} passes without converging (min_change={})",
                summary.len(),
                self.params.min_change
            ),
        }

        let (warnings, notices) = diagnostics.into_parts();
        let Assignment { labels, partition } = assignment;
        Ok(FittedModel {
            centroids,
            labels,
            partition,
            total_cost: calculate_inertia(&costs),
            cluster_costs: costs,
            termination,
            iterations,
            initial_indices: self.initial_indices.clone(),
            metric: self.params.metric.clone(),
            n_columns: self.data.n_columns(),
            warnings,
            notices,
            summary,
            elapsed: started.elapsed(),
        })
    }

    /// Fit and return only the label of every record.
    pub fn fit_predict(&self) -> Result<Vec<usize>> {
        Ok(self.fit()?.labels)
    }

    /// Recompute every centroid from this pass's partition, applying the
    /// empty-cluster policy to clusters without members.
    fn update_centroids(
        &self,
        assignment: &Assignment,
        centroids: &[Vec<f64>],
        pass: usize,
        diagnostics: &Diagnostics,
    ) -> Result<Vec<Vec<f64>>> {
        let partition = &assignment.partition;
        let metric = self.params.metric.as_ref();
        let update = |label: usize| -> Option<Vec<f64>> {
            let members = partition.members(label);
            if members.is_empty() {
                None
            } else {
                Some(self.strategy.update(&self.data, members, metric))
            }
        };

        let updated: Vec<Option<Vec<f64>>> = if self.parallel {
            (0..partition.k()).into_par_iter().map(update).collect()
        } else {
            (0..partition.k()).map(update).collect()
        };

        let empty = partition.empty_clusters();
        for &cluster in &empty {
            diagnostics.warn(format!(
                "cluster {} has no members after iteration {}",
                cluster, pass
            ));
        }

        let replacements = match self.params.empty_cluster_policy {
            EmptyClusterPolicy::Fail if !empty.is_empty() => {
                return Err(Error::DegenerateCluster {
                    cluster: empty[0],
                    iteration: pass,
                });
            }
            EmptyClusterPolicy::Reseed if !empty.is_empty() => {
                self.reseed_records(assignment, centroids, empty.len())
            }
            _ => Vec::new(),
        };
        let mut replacements = empty.iter().copied().zip(replacements);
        let mut next_replacement = replacements.next();

        let next = updated
            .into_iter()
            .enumerate()
            .map(|(label, centroid)| match centroid {
                Some(centroid) => centroid,
                None => match next_replacement.filter(|&(cluster, _)| cluster == label) {
                    Some((_, record)) => {
                        log::trace!("reseeding cluster {} onto record {}", label, record);
                        next_replacement = replacements.next();
                        self.data.row(record).to_vec()
                    }
                    None => centroids[label].clone(),
                },
            })
            .collect();

        Ok(next)
    }

    /// Records to move empty centroids onto: farthest from their own centroid
    /// first, lowest index on ties, never leaving a donor cluster empty.
    fn reseed_records(
        &self,
        assignment: &Assignment,
        centroids: &[Vec<f64>],
        wanted: usize,
    ) -> Vec<usize> {
        let metric = self.params.metric.as_ref();
        let labels = &assignment.labels;
        let mut remaining = assignment.partition.sizes();

        let mut candidates: Vec<(usize, f64)> = (0..self.data.n_records())
            .filter(|&idx| remaining[labels[idx]] >= 2)
            .map(|idx| (idx, metric.distance(self.data.row(idx), &centroids[labels[idx]])))
            .collect();
        candidates.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut picked = Vec::with_capacity(wanted);
        for (idx, _) in candidates {
            if picked.len() == wanted {
                break;
            }
            let label = labels[idx];
            if remaining[label] >= 2 {
                remaining[label] -= 1;
                picked.push(idx);
            }
        }
        picked
    }
}
