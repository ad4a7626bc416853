use std::fmt::Debug;

/// A dissimilarity between two feature vectors of equal length.
///
/// Implementations must be pure and return a value `>= 0`. Symmetry is not
/// required. Callers are responsible for passing vectors of matching length;
/// the engine validates dimensionality before any metric is invoked.
pub trait DistanceMetric: Debug + Send + Sync {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;

    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Whether evaluating this metric is costly enough to warrant a warning
    /// when the engine is constructed with it.
    fn is_expensive(&self) -> bool {
        false
    }
}

/// L2 distance. The default metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl DistanceMetric for Euclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        SquaredEuclidean.distance(a, b).sqrt()
    }

    fn name(&self) -> &'static str {
        "euclidean"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredEuclidean;

impl DistanceMetric for SquaredEuclidean {
    #[inline]
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| {
                let diff = x - y;
                diff * diff
            })
            .sum()
    }

    fn name(&self) -> &'static str {
        "squared_euclidean"
    }
}

/// L1 (taxicab) distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl DistanceMetric for Manhattan {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
    }

    fn name(&self) -> &'static str {
        "manhattan"
    }
}

/// L-infinity distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chebyshev;

impl DistanceMetric for Chebyshev {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max)
    }

    fn name(&self) -> &'static str {
        "chebyshev"
    }
}

/// One-dimensional Earth Mover's Distance between two histograms.
///
/// Both vectors are read as mass over ordered bins; the distance is the sum of
/// absolute differences of their running cumulative sums.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarthMovers;

impl DistanceMetric for EarthMovers {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        let mut cum_a = 0.0;
        let mut cum_b = 0.0;
        let mut emd = 0.0;

        for (&x, &y) in a.iter().zip(b.iter()) {
            cum_a += x;
            cum_b += y;
            emd += (cum_a - cum_b).abs();
        }

        emd
    }

    fn name(&self) -> &'static str {
        "earth_movers"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_345() {
        assert_eq!(Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(SquaredEuclidean.distance(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
    }

    #[test]
    fn test_manhattan_and_chebyshev() {
        let a = [1.0, -2.0, 3.0];
        let b = [4.0, 2.0, 3.0];
        assert_eq!(Manhattan.distance(&a, &b), 7.0);
        assert_eq!(Chebyshev.distance(&a, &b), 4.0);
    }

    #[test]
    fn test_earth_movers_shifted_mass() {
        // Moving one unit of mass by two bins costs 2.
        let a = [1.0, 0.0, 0.0];
        let b = [0.0, 0.0, 1.0];
        assert_eq!(EarthMovers.distance(&a, &b), 2.0);
        assert_eq!(EarthMovers.distance(&a, &a), 0.0);
    }

    #[test]
    fn test_metrics_are_nonnegative_and_zero_on_self() {
        let metrics: Vec<Box<dyn DistanceMetric>> = vec![
            Box::new(Euclidean),
            Box::new(SquaredEuclidean),
            Box::new(Manhattan),
            Box::new(Chebyshev),
            Box::new(EarthMovers),
        ];
        let a = [0.5, -1.5, 2.0];
        let b = [-3.0, 0.25, 1.0];
        for metric in &metrics {
            assert!(metric.distance(&a, &b) >= 0.0, "{}", metric.name());
            assert_eq!(metric.distance(&a, &a), 0.0, "{}", metric.name());
        }
    }
}
