//! Validated feature matrices and the normalization hook applied before fitting.

use std::fmt::Debug;

use ndarray::{Array2, Axis};

use crate::error::{Error, Result};

/// An immutable, rectangular `n_records` x `n_columns` matrix of finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    matrix: Array2<f64>,
}

impl Dataset {
    /// Validate `matrix` and take ownership of it.
    pub fn new(matrix: Array2<f64>) -> Result<Self> {
        if matrix.nrows() == 0 || matrix.ncols() == 0 {
            return Err(Error::EmptyInput);
        }

        let non_finite = matrix.indexed_iter().find(|(_, value)| !value.is_finite());
        if let Some(((row, column), value)) = non_finite {
            return Err(if value.is_nan() {
                Error::NaNInInput { row, column }
            } else {
                Error::NonFiniteInInput { row, column }
            });
        }

        Ok(Self {
            matrix: matrix.as_standard_layout().into_owned(),
        })
    }

    /// Build a dataset from row vectors, rejecting ragged input.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let first = rows.first().ok_or(Error::EmptyInput)?;
        let n_columns = first.len();

        for (row, values) in rows.iter().enumerate() {
            if values.len() != n_columns {
                return Err(Error::RaggedRows {
                    row,
                    expected: n_columns,
                    found: values.len(),
                });
            }
        }

        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let matrix =
            Array2::from_shape_vec((rows.len(), n_columns), flat).map_err(|_| Error::EmptyInput)?;
        Self::new(matrix)
    }

    pub fn n_records(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn n_columns(&self) -> usize {
        self.matrix.ncols()
    }

    /// Row `index` as a contiguous slice.
    ///
    /// # Panics
    ///
    /// Panics if `index >= n_records()`.
    #[inline]
    pub fn row(&self, index: usize) -> &[f64] {
        self.matrix
            .row(index)
            .to_slice()
            .expect("dataset matrix is kept in standard layout")
    }

    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Whether every entry of the matrix holds the same value.
    pub fn is_singular(&self) -> bool {
        let first = self.matrix[[0, 0]];
        self.matrix.iter().all(|&value| value == first)
    }

    /// Apply `normalizer` once and re-validate the result.
    pub fn normalized(&self, normalizer: &dyn Normalizer) -> Result<Self> {
        Self::new(normalizer.normalize(&self.matrix))
    }
}

/// A pure column-wise transform applied to the whole matrix before fitting.
pub trait Normalizer: Debug + Send + Sync {
    fn normalize(&self, matrix: &Array2<f64>) -> Array2<f64>;

    fn name(&self) -> &'static str;
}

/// Centre every column on zero and scale it to unit (population) variance.
/// Columns with zero variance are only centred.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScaler;

impl Normalizer for StandardScaler {
    fn normalize(&self, matrix: &Array2<f64>) -> Array2<f64> {
        let Some(mean) = matrix.mean_axis(Axis(0)) else {
            return matrix.clone();
        };
        let std = matrix
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > 0.0 { s } else { 1.0 });

        (matrix - &mean) / &std
    }

    fn name(&self) -> &'static str {
        "standard_scale"
    }
}

/// Rescale every column onto `[0, 1]`. Constant columns map to 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMaxScaler;

impl Normalizer for MinMaxScaler {
    fn normalize(&self, matrix: &Array2<f64>) -> Array2<f64> {
        let min = matrix.fold_axis(Axis(0), f64::INFINITY, |&acc, &x| acc.min(x));
        let max = matrix.fold_axis(Axis(0), f64::NEG_INFINITY, |&acc, &x| acc.max(x));
        let range = (&max - &min).mapv(|r| if r > 0.0 { r } else { 1.0 });

        (matrix - &min) / &range
    }

    fn name(&self) -> &'static str {
        "min_max_scale"
    }
}
