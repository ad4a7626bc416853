use rand::{seq::SliceRandom, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::dataset::Dataset;
use crate::error::{Error, Result};

// pi * 100_000
pub const DEFAULT_SEED: u64 = 314159;

/// The random source used for initialization. Xoshiro is portable, so the same
/// seed picks the same records on every platform and `rand` release.
pub fn seeded_rng(seed: u64) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}

/// Pick `k` distinct record indices: Fisher-Yates shuffle `0..n_records`
/// under `seed` and keep the first `k` positions, in shuffled order.
pub fn initial_indices(n_records: usize, k: usize, seed: u64) -> Result<Vec<usize>> {
    if k == 0 || k > n_records {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_records,
        });
    }

    let mut rng = seeded_rng(seed);
    let mut indices: Vec<usize> = (0..n_records).collect();
    indices.shuffle(&mut rng);
    indices.truncate(k);

    Ok(indices)
}

/// Copy the rows at `indices` out of `data`.
pub fn initial_centroids(data: &Dataset, indices: &[usize]) -> Vec<Vec<f64>> {
    indices.iter().map(|&idx| data.row(idx).to_vec()).collect()
}
