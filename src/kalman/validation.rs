//! Shape, finiteness, and symmetry checks for linear-Gaussian models, plus
//! the ndarray ↔ nalgebra bridge used by the measurement update.
//!
//! Purpose
//! -------
//! Centralize the numeric invariants of the Kalman stack: every model
//! matrix must be finite and correctly shaped, covariance inputs must be
//! symmetric within [`SYMMETRY_TOL`], and covariance outputs are kept
//! symmetric by explicit symmetrization after each update. The bridge
//! helpers copy between `ndarray` (the crate's public container) and
//! `nalgebra` (which supplies the Cholesky solve).
//!
//! Invariants & assumptions
//! ------------------------
//! - Validators never mutate their input; [`symmetrize`] is the only
//!   helper that writes.
//! - Bridge copies are column-major on the `nalgebra` side, matching
//!   `DMatrix` storage.
use crate::kalman::errors::{KalmanError, KalmanResult};
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Absolute tolerance for covariance symmetry checks at construction.
pub const SYMMETRY_TOL: f64 = 1e-9;

/// Check that a matrix has the expected shape.
pub fn validate_shape(
    what: &'static str,
    m: ArrayView2<f64>,
    expected: (usize, usize),
) -> KalmanResult<()> {
    if m.dim() != expected {
        return Err(KalmanError::DimensionMismatch { what, expected, actual: m.dim() });
    }
    Ok(())
}

/// Check that every matrix entry is finite, reporting the first offender.
pub fn validate_finite_matrix(name: &'static str, m: ArrayView2<f64>) -> KalmanResult<()> {
    for ((row, col), &value) in m.indexed_iter() {
        if !value.is_finite() {
            return Err(KalmanError::NonFiniteEntry { name, row, col, value });
        }
    }
    Ok(())
}

/// Check that every vector entry is finite, reporting the first offender
/// with `col = 0`.
pub fn validate_finite_vector(name: &'static str, v: ArrayView1<f64>) -> KalmanResult<()> {
    for (row, &value) in v.iter().enumerate() {
        if !value.is_finite() {
            return Err(KalmanError::NonFiniteEntry { name, row, col: 0, value });
        }
    }
    Ok(())
}

/// Check that a square matrix is symmetric within [`SYMMETRY_TOL`],
/// reporting the first asymmetric pair.
pub fn validate_symmetric(name: &'static str, m: ArrayView2<f64>) -> KalmanResult<()> {
    let n = m.nrows();
    for row in 0..n {
        for col in (row + 1)..n {
            let delta = (m[[row, col]] - m[[col, row]]).abs();
            if delta > SYMMETRY_TOL {
                return Err(KalmanError::NotSymmetric { name, row, col, delta });
            }
        }
    }
    Ok(())
}

/// Replace `p` with (P + Pᵗ)/2 in place.
///
/// The covariance recursions are symmetric in exact arithmetic; floating
/// point drift is folded back after every update so downstream consumers
/// always see `P == Pᵗ` exactly.
pub fn symmetrize(p: &mut Array2<f64>) {
    let n = p.nrows();
    for row in 0..n {
        for col in (row + 1)..n {
            let avg = 0.5 * (p[[row, col]] + p[[col, row]]);
            p[[row, col]] = avg;
            p[[col, row]] = avg;
        }
    }
}

/// Copy an `ndarray` matrix into a freshly allocated `DMatrix`,
/// column by column to match `nalgebra`'s storage order.
pub fn to_dmatrix(m: ArrayView2<f64>) -> DMatrix<f64> {
    let (rows, cols) = m.dim();
    let mut out = DMatrix::<f64>::zeros(rows, cols);
    for j in 0..cols {
        for i in 0..rows {
            out[(i, j)] = m[[i, j]];
        }
    }
    out
}

/// Copy an `ndarray` vector into a `DVector`.
pub fn to_dvector(v: ArrayView1<f64>) -> DVector<f64> {
    DVector::from_iterator(v.len(), v.iter().copied())
}

/// Copy a `DMatrix` back into an `ndarray` matrix.
pub fn to_array2(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

/// Copy a `DVector` back into an `ndarray` vector.
pub fn to_array1(v: &DVector<f64>) -> Array1<f64> {
    Array1::from_iter(v.iter().copied())
}
