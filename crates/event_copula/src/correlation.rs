//! Validated correlation matrices and their Cholesky factorisation.

use serde::{Deserialize, Serialize};

use crate::error::CopulaError;

/// Tolerance for symmetry and unit-diagonal checks at construction.
const SHAPE_TOLERANCE: f64 = 1e-9;

/// Smallest acceptable Cholesky pivot; anything at or below counts as not
/// positive definite.
const CHOLESKY_PIVOT_MIN: f64 = 1e-12;

/// A symmetric correlation matrix with unit diagonal, stored row-major.
///
/// Construction validates shape, symmetry, diagonal, and entry range;
/// positive definiteness is established by [`CorrelationMatrix::cholesky`],
/// which the elliptical samplers call once at build time.
///
/// Serialises as nested rows, so a 2×2 matrix reads
/// `[[1.0, 0.6], [0.6, 1.0]]` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct CorrelationMatrix {
    dim: usize,
    data: Vec<f64>,
}

impl CorrelationMatrix {
    /// Builds a matrix from row-major entries.
    ///
    /// # Errors
    ///
    /// [`CopulaError::InvalidCorrelation`] when the data is not `dim`×`dim`,
    /// the diagonal is off one, the matrix is asymmetric, or an entry falls
    /// outside `[-1, 1]`.
    pub fn new(dim: usize, data: Vec<f64>) -> Result<Self, CopulaError> {
        if dim == 0 {
            return Err(CopulaError::invalid_correlation("dimension must be positive"));
        }
        if data.len() != dim * dim {
            return Err(CopulaError::invalid_correlation(format!(
                "expected {}x{} = {} entries, got {}",
                dim,
                dim,
                dim * dim,
                data.len()
            )));
        }
        let matrix = Self { dim, data };
        for i in 0..dim {
            if (matrix.get(i, i) - 1.0).abs() > SHAPE_TOLERANCE {
                return Err(CopulaError::invalid_correlation(format!(
                    "diagonal entry ({i},{i}) = {} is not 1",
                    matrix.get(i, i)
                )));
            }
            for j in 0..i {
                let upper = matrix.get(j, i);
                let lower = matrix.get(i, j);
                if !upper.is_finite() || !lower.is_finite() {
                    return Err(CopulaError::invalid_correlation(format!(
                        "non-finite entry at ({i},{j})"
                    )));
                }
                if (upper - lower).abs() > SHAPE_TOLERANCE {
                    return Err(CopulaError::invalid_correlation(format!(
                        "asymmetric at ({i},{j}): {lower} vs {upper}"
                    )));
                }
                if lower.abs() > 1.0 {
                    return Err(CopulaError::invalid_correlation(format!(
                        "entry ({i},{j}) = {lower} outside [-1, 1]"
                    )));
                }
            }
        }
        Ok(matrix)
    }

    /// The identity matrix: uncorrelated variables.
    pub fn identity(dim: usize) -> Result<Self, CopulaError> {
        let mut data = vec![0.0; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = 1.0;
        }
        Self::new(dim, data)
    }

    /// A matrix with a single shared off-diagonal correlation.
    pub fn equicorrelated(dim: usize, rho: f64) -> Result<Self, CopulaError> {
        let mut data = vec![rho; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = 1.0;
        }
        Self::new(dim, data)
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Entry at row `i`, column `j`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.dim && j < self.dim, "index out of range");
        self.data[i * self.dim + j]
    }

    /// Lower-triangular Cholesky factor `L` with `L·Lᵀ = R`, row-major.
    ///
    /// # Errors
    ///
    /// [`CopulaError::NotPositiveDefinite`] when a pivot falls at or below
    /// the numerical floor.
    pub fn cholesky(&self) -> Result<Vec<f64>, CopulaError> {
        let n = self.dim;
        let mut l = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..=i {
                let mut sum = self.data[i * n + j];
                for k in 0..j {
                    sum -= l[i * n + k] * l[j * n + k];
                }
                if i == j {
                    if sum <= CHOLESKY_PIVOT_MIN || !sum.is_finite() {
                        return Err(CopulaError::NotPositiveDefinite);
                    }
                    l[i * n + i] = sum.sqrt();
                } else {
                    l[i * n + j] = sum / l[j * n + j];
                }
            }
        }
        Ok(l)
    }
}

impl TryFrom<Vec<Vec<f64>>> for CorrelationMatrix {
    type Error = CopulaError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        let dim = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != dim {
                return Err(CopulaError::invalid_correlation(format!(
                    "row {i} has {} entries, expected {dim}",
                    row.len()
                )));
            }
        }
        Self::new(dim, rows.into_iter().flatten().collect())
    }
}

impl From<CorrelationMatrix> for Vec<Vec<f64>> {
    fn from(matrix: CorrelationMatrix) -> Self {
        matrix
            .data
            .chunks(matrix.dim)
            .map(|row| row.to_vec())
            .collect()
    }
}
