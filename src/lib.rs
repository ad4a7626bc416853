//! Iterative k-centroid clustering.
//!
//! `kcentroid` partitions a fixed matrix of feature vectors into `k` groups by
//! alternating two steps until the total cost stops moving or the iteration
//! budget runs out:
//!
//! 1. assign every record to its nearest centroid under a pluggable
//!    [`DistanceMetric`],
//! 2. recompute every centroid from its members.
//!
//! The engine ([`KCentroid`]) owns initialization, assignment and the
//! convergence loop. What a centroid *is* and how a cluster's cost is measured
//! comes from a [`CentroidStrategy`]: [`MeanStrategy`] gives k-means,
//! [`MedoidStrategy`] gives k-medoids.
//!
//! ## Reproducibility
//!
//! Initial centroids are `k` records picked by a seeded Fisher-Yates shuffle.
//! Nothing after initialization is random, ties always go to the lowest
//! centroid index, and the parallel mode produces exactly the serial result.
//!
//! ## Usage
//!
//! ```rust
//! use kcentroid::{Dataset, KCentroidParams, KMeans};
//!
//! let data = Dataset::from_rows(&[
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ])
//! .unwrap();
//!
//! let model = KMeans::new(data, KCentroidParams::new(2).with_seed(7)).unwrap();
//! let fit = model.fit().unwrap();
//!
//! let labels = fit.labels();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//! assert_eq!(fit.predict(&[9.0, 9.5]).unwrap(), labels[2]);
//! ```

#![forbid(unsafe_code)]

pub mod algorithm;
pub mod assignment;
pub mod centroid;
pub mod config;
pub mod convergence;
pub mod dataset;
pub mod diagnostics;
pub mod distance;
pub mod error;
pub mod inertia;
pub mod initialization;
pub mod logger;
pub mod model;

pub use algorithm::{KCentroid, KMeans, KMedoids};
pub use assignment::{Assignment, Partition};
pub use centroid::{CentroidStrategy, MeanStrategy, MedoidStrategy};
pub use config::{EmptyClusterPolicy, KCentroidParams};
pub use convergence::{IterationState, Termination};
pub use dataset::{Dataset, MinMaxScaler, Normalizer, StandardScaler};
pub use diagnostics::{FitSummary, IterationSummary};
pub use distance::{Chebyshev, DistanceMetric, EarthMovers, Euclidean, Manhattan, SquaredEuclidean};
pub use error::{Error, Result};
pub use model::FittedModel;
