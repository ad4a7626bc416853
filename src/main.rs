use std::error::Error;

use kcentroid::initialization::seeded_rng;
use kcentroid::logger::{init_logger, parse_level};
use kcentroid::{Dataset, FittedModel, KCentroidParams, KMeans, KMedoids, StandardScaler};
use ndarray::{array, concatenate, Array2, Axis};
use ndarray_rand::rand_distr::Normal;
use ndarray_rand::RandomExt;

const BASE_SEED: u64 = 20240501;
const POINTS_PER_BLOB: usize = 500;

/// Three well separated Gaussian blobs in the plane.
fn synthetic_blobs() -> Result<Dataset, Box<dyn Error>> {
    let mut rng = seeded_rng(BASE_SEED);
    let noise = Normal::new(0.0, 0.75).map_err(|e| e.to_string())?;
    let centers = [array![0.0, 0.0], array![8.0, 2.0], array![3.0, 9.0]];

    let blobs: Vec<Array2<f64>> = centers
        .iter()
        .map(|center| Array2::random_using((POINTS_PER_BLOB, 2), noise, &mut rng) + center)
        .collect();
    let views: Vec<_> = blobs.iter().map(|blob| blob.view()).collect();

    Ok(Dataset::new(concatenate(Axis(0), &views)?)?)
}

/// Run `num_initializations` seeded fits and keep the one with the lowest cost.
fn kmeans(
    data: &Dataset,
    k: usize,
    max_iter: usize,
    min_change: f64,
    num_initializations: usize,
    medoids: bool,
    parallel: bool,
) -> Result<FittedModel, Box<dyn Error>> {
    let mut best: Option<FittedModel> = None;
    let mut cost_per_initialization = Vec::with_capacity(num_initializations);

    for initialization_index in 0..num_initializations {
        let params = KCentroidParams::new(k)
            .with_max_iter(max_iter)
            .with_min_change(min_change)
            .with_seed(BASE_SEED + initialization_index as u64)
            .with_normalizer(StandardScaler)
            .with_parallel(parallel);

        let fit = if medoids {
            log::info!("Starting k-medoids, initialization #{}", initialization_index);
            KMedoids::new(data.clone(), params)?.fit()?
        } else {
            log::info!("Starting k-means, initialization #{}", initialization_index);
            KMeans::new(data.clone(), params)?.fit()?
        };

        log::info!(
            "Finished initialization #{} - cost: {} (converged: {}, iterations: {}, {:?})",
            initialization_index,
            fit.total_cost(),
            fit.converged(),
            fit.iterations(),
            fit.elapsed()
        );
        cost_per_initialization.push(fit.total_cost());

        if best.as_ref().map_or(true, |b| fit.total_cost() < b.total_cost()) {
            best = Some(fit);
        }
    }

    log::info!("Cost per initialization: {:?}", cost_per_initialization);
    best.ok_or_else(|| "at least one initialization is required".into())
}

fn main() -> Result<(), Box<dyn Error>> {
    let level = std::env::var("KCENTROID_LOG").unwrap_or_else(|_| "info".to_string());
    init_logger(parse_level(&level))?;

    let data = synthetic_blobs()?;
    log::info!(
        "Generated {} records with {} columns",
        data.n_records(),
        data.n_columns()
    );

    let best = kmeans(&data, 3, 300, 1e-4, 5, false, true)?;
    log::info!("Best cost: {}", best.total_cost());
    log::info!("Cluster sizes: {:?}", best.partition().sizes());
    log::info!("Fit summary:\n{}", best.summary());
    for warning in best.warnings() {
        log::info!("warning: {}", warning);
    }

    Ok(())
}
