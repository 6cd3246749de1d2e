//! Errors for linear-Gaussian (Kalman) filtering: model validation and
//! innovation singularity.
//!
//! This module defines [`KalmanError`], shared by the model descriptor, the
//! Gaussian belief type, and the filter recursion. It implements
//! `Display`/`Error` and converts to `PyErr` for PyO3.
//!
//! ## Conventions
//! - Shape payloads are `(rows, cols)` pairs; vectors report `(len, 1)`.
//! - Covariance matrices must be symmetric within
//!   [`SYMMETRY_TOL`](crate::kalman::validation::SYMMETRY_TOL) at
//!   construction; the filter maintains symmetry afterwards by explicit
//!   symmetrization.
//! - A singular innovation covariance is a model-configuration error, not a
//!   transient numeric event: it means H·P⁻·Hᵗ + R has no positive-definite
//!   Cholesky factor at the reported step.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Crate-wide result alias for Kalman-filter operations that may produce
/// [`KalmanError`].
pub type KalmanResult<T> = Result<T, KalmanError>;

/// Unified error type for linear-Gaussian filtering.
#[derive(Debug, Clone, PartialEq)]
pub enum KalmanError {
    // ---- Model validation ----
    /// The latent state has dimension zero.
    EmptyState,

    /// A matrix or vector has the wrong shape for the model.
    DimensionMismatch {
        what: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A matrix or vector entry is NaN or ±∞.
    NonFiniteEntry { name: &'static str, row: usize, col: usize, value: f64 },

    /// A covariance matrix is not symmetric within tolerance.
    NotSymmetric { name: &'static str, row: usize, col: usize, delta: f64 },

    // ---- Numeric degeneracy ----
    /// The innovation covariance S admits no Cholesky factorization at the
    /// given step.
    SingularInnovation { step: usize },
}

impl std::error::Error for KalmanError {}

impl std::fmt::Display for KalmanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Model validation ----
            KalmanError::EmptyState => {
                write!(f, "Kalman error: the state dimension must be at least 1.")
            }
            KalmanError::DimensionMismatch { what, expected, actual } => write!(
                f,
                "Kalman error: {what} has shape {}×{}, expected {}×{}.",
                actual.0, actual.1, expected.0, expected.1
            ),
            KalmanError::NonFiniteEntry { name, row, col, value } => {
                write!(f, "Kalman error: {name}[{row}, {col}] = {value} is not finite.")
            }
            KalmanError::NotSymmetric { name, row, col, delta } => write!(
                f,
                "Kalman error: {name} is not symmetric; entries ({row}, {col}) and \
                 ({col}, {row}) differ by {delta}."
            ),

            // ---- Numeric degeneracy ----
            KalmanError::SingularInnovation { step } => write!(
                f,
                "Kalman error: the innovation covariance is singular at step {step}; the \
                 model's noise configuration leaves the measurement update ill-posed."
            ),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<KalmanError> for PyErr {
    fn from(err: KalmanError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
