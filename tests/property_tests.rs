use std::collections::HashSet;

use kcentroid::initialization::initial_indices;
use kcentroid::{Dataset, KCentroidParams, KMeans, KMedoids};
use proptest::prelude::*;

fn dataset_and_k() -> impl Strategy<Value = (Vec<Vec<f64>>, usize)> {
    (1usize..4)
        .prop_flat_map(|dim| prop::collection::vec(prop::collection::vec(-10.0f64..10.0, dim), 1..25))
        .prop_flat_map(|rows| {
            let n = rows.len();
            (Just(rows), 1..=n)
        })
}

proptest! {
    #[test]
    fn prop_partition_covers_every_record_once(
        (rows, k) in dataset_and_k(),
        seed in any::<u64>(),
    ) {
        let data = Dataset::from_rows(&rows).unwrap();
        let fit = KMeans::new(data, KCentroidParams::new(k).with_seed(seed))
            .unwrap()
            .fit()
            .unwrap();

        prop_assert_eq!(fit.labels().len(), rows.len());
        prop_assert_eq!(fit.partition().k(), k);
        prop_assert_eq!(fit.centroids().len(), k);

        let mut seen = HashSet::new();
        for (label, members) in fit.partition().clusters().iter().enumerate() {
            for &idx in members {
                prop_assert!(seen.insert(idx), "record {} assigned twice", idx);
                prop_assert_eq!(fit.labels()[idx], label);
            }
        }
        prop_assert_eq!(seen.len(), rows.len());
    }

    #[test]
    fn prop_fits_are_deterministic(
        (rows, k) in dataset_and_k(),
        seed in any::<u64>(),
    ) {
        let params = KCentroidParams::new(k).with_seed(seed);
        let a = KMedoids::new(Dataset::from_rows(&rows).unwrap(), params.clone()).unwrap();
        let b = KMedoids::new(Dataset::from_rows(&rows).unwrap(), params).unwrap();

        prop_assert_eq!(a.initial_indices(), b.initial_indices());
        let (fit_a, fit_b) = (a.fit().unwrap(), b.fit().unwrap());
        prop_assert_eq!(fit_a.labels(), fit_b.labels());
    }

    #[test]
    fn prop_initial_indices_are_distinct(n in 1usize..200, seed in any::<u64>(), k_frac in 0.0f64..1.0) {
        let k = ((n as f64 * k_frac) as usize).clamp(1, n);
        let indices = initial_indices(n, k, seed).unwrap();
        let unique: HashSet<_> = indices.iter().copied().collect();
        prop_assert_eq!(indices.len(), k);
        prop_assert_eq!(unique.len(), k);
        prop_assert!(indices.iter().all(|&i| i < n));
    }

    #[test]
    fn prop_cost_is_nonnegative_and_finite(
        (rows, k) in dataset_and_k(),
        max_iter in 1usize..20,
    ) {
        let data = Dataset::from_rows(&rows).unwrap();
        let fit = KMeans::new(data, KCentroidParams::new(k).with_max_iter(max_iter))
            .unwrap()
            .fit()
            .unwrap();

        prop_assert!(fit.total_cost() >= 0.0);
        prop_assert!(fit.total_cost().is_finite());
        prop_assert!(fit.iterations() <= max_iter);
        prop_assert!(fit.centroids().iter().flatten().all(|x| x.is_finite()));
    }
}
