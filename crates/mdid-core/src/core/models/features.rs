use nalgebra::DMatrix;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Expected 2D array, got {ndim}D array instead")]
    NotTwoDimensional { ndim: usize },
    #[error("Array of shape {shape:?} needs {expected} values, got {found}")]
    ValueCount {
        shape: Vec<usize>,
        expected: usize,
        found: usize,
    },
    #[error("Row {row} has {found} features, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A frames × features matrix: row `i` describes frame `i` in time order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix(DMatrix<f64>);

impl FeatureMatrix {
    pub fn new(matrix: DMatrix<f64>) -> Self {
        Self(matrix)
    }

    /// Builds a matrix from per-frame rows.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::RaggedRow`] if the rows differ in length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, ShapeError> {
        let n_features = rows.first().map_or(0, Vec::len);
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != n_features)
        {
            return Err(ShapeError::RaggedRow {
                row,
                expected: n_features,
                found,
            });
        }
        Ok(Self(DMatrix::from_fn(rows.len(), n_features, |r, c| {
            rows[r][c]
        })))
    }

    pub fn n_frames(&self) -> usize {
        self.0.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.0.ncols()
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.0
    }

    pub fn into_matrix(self) -> DMatrix<f64> {
        self.0
    }

    /// The final `k` frames in time order; the whole matrix if it has fewer than `k` rows.
    pub fn tail(&self, k: usize) -> FeatureMatrix {
        let n = self.n_frames();
        let k = k.min(n);
        Self(self.0.rows(n - k, k).into_owned())
    }
}

impl From<DMatrix<f64>> for FeatureMatrix {
    fn from(matrix: DMatrix<f64>) -> Self {
        Self(matrix)
    }
}

/// A pre-computed feature array of arbitrary rank, stored row-major.
///
/// This is how callers hand in the output of a projection they ran themselves. It only
/// becomes a [`FeatureMatrix`] once its rank has been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFeatures {
    pub shape: Vec<usize>,
    pub values: Vec<f64>,
}

impl RawFeatures {
    pub fn new(shape: Vec<usize>, values: Vec<f64>) -> Self {
        Self { shape, values }
    }

    /// Validates rank and size and converts into a [`FeatureMatrix`].
    pub fn to_matrix(&self) -> Result<FeatureMatrix, ShapeError> {
        let &[n_frames, n_features] = self.shape.as_slice() else {
            return Err(ShapeError::NotTwoDimensional {
                ndim: self.shape.len(),
            });
        };
        match n_frames.checked_mul(n_features) {
            Some(expected) if expected == self.values.len() => {}
            expected => {
                return Err(ShapeError::ValueCount {
                    shape: self.shape.clone(),
                    // saturates when the shape's element count overflows
                    expected: expected.unwrap_or(usize::MAX),
                    found: self.values.len(),
                });
            }
        }
        Ok(FeatureMatrix(DMatrix::from_row_slice(
            n_frames,
            n_features,
            &self.values,
        )))
    }
}

impl From<&FeatureMatrix> for RawFeatures {
    fn from(matrix: &FeatureMatrix) -> Self {
        let m = matrix.as_matrix();
        Self {
            shape: vec![m.nrows(), m.ncols()],
            values: m.transpose().as_slice().to_vec(),
        }
    }
}
