//! Errors for discrete hidden Markov model inference (model validation,
//! observation vocabulary checks, and numeric degeneracy).
//!
//! This module defines [`HmmError`], the error type shared by the model
//! descriptor, the forward filter, the predictor, the smoother, and the
//! Viterbi decoder. It implements `Display`/`Error` and converts to `PyErr`
//! for PyO3.
//!
//! ## Conventions
//! - **Indices are 0-based** and refer to the integer-encoded state and
//!   observation spaces of [`DiscreteHmm`](crate::hmm::model::DiscreteHmm).
//! - Probability vectors and matrix rows must be non-negative and sum to 1
//!   within [`PROB_TOL`](crate::hmm::validation::PROB_TOL).
//! - Time indices carried by degeneracy variants point at the observation
//!   step at which inference broke down (0-based into the input sequence).
//! - Configuration mistakes fail at construction; degeneracy variants are
//!   raised mid-recursion and are fatal for the exact algorithms.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Crate-wide result alias for discrete-HMM operations that may produce
/// [`HmmError`].
pub type HmmResult<T> = Result<T, HmmError>;

/// Unified error type for discrete hidden Markov model inference.
///
/// Covers model-descriptor validation (dimensions, stochasticity, label
/// uniqueness), observation-vocabulary lookups, and numeric degeneracy in
/// the forward and Viterbi recursions. Implements `Display`/`Error` and
/// converts to a Python `ValueError` at PyO3 boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum HmmError {
    // ---- Model validation ----
    /// The state space is empty.
    EmptyStateSpace,

    /// The observation space is empty.
    EmptyObservationSpace,

    /// A state or observation label occurs more than once.
    DuplicateLabel { label: String },

    /// A vector or matrix has the wrong length/shape for the model.
    DimensionMismatch { what: &'static str, expected: usize, actual: usize },

    /// A probability entry is NaN or ±∞.
    NonFiniteEntry { name: &'static str, row: usize, col: usize, value: f64 },

    /// A probability entry is negative.
    NegativeEntry { name: &'static str, row: usize, col: usize, value: f64 },

    /// A matrix row does not sum to 1 within tolerance.
    RowNotStochastic { name: &'static str, row: usize, sum: f64 },

    /// A probability vector does not sum to 1 within tolerance.
    VectorNotStochastic { name: &'static str, sum: f64 },

    // ---- Observation vocabulary ----
    /// An observation index lies outside the emission vocabulary.
    UnknownObservation { index: usize, n_observations: usize },

    /// An observation label is not part of the model vocabulary.
    UnknownObservationLabel { label: String },

    // ---- Numeric degeneracy ----
    /// The filtered belief collapsed to all zeros at step `t`.
    DegenerateBelief { t: usize },

    /// Every path has probability zero at step `t` of the Viterbi recursion.
    ZeroProbabilityPath { t: usize },
}

impl std::error::Error for HmmError {}

impl std::fmt::Display for HmmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Model validation ----
            HmmError::EmptyStateSpace => {
                write!(f, "HMM error: the state space must contain at least one state.")
            }
            HmmError::EmptyObservationSpace => {
                write!(f, "HMM error: the observation space must contain at least one symbol.")
            }
            HmmError::DuplicateLabel { label } => {
                write!(f, "HMM error: duplicate label {label:?} in the model vocabulary.")
            }
            HmmError::DimensionMismatch { what, expected, actual } => {
                write!(f, "HMM error: {what} has dimension {actual}, expected {expected}.")
            }
            HmmError::NonFiniteEntry { name, row, col, value } => {
                write!(f, "HMM error: {name}[{row}, {col}] = {value} is not finite.")
            }
            HmmError::NegativeEntry { name, row, col, value } => {
                write!(f, "HMM error: {name}[{row}, {col}] = {value} is negative.")
            }
            HmmError::RowNotStochastic { name, row, sum } => {
                write!(f, "HMM error: row {row} of {name} sums to {sum}, expected 1.")
            }
            HmmError::VectorNotStochastic { name, sum } => {
                write!(f, "HMM error: {name} sums to {sum}, expected 1.")
            }

            // ---- Observation vocabulary ----
            HmmError::UnknownObservation { index, n_observations } => write!(
                f,
                "HMM error: observation index {index} is outside the vocabulary \
                 (0..{n_observations})."
            ),
            HmmError::UnknownObservationLabel { label } => {
                write!(f, "HMM error: unknown observation label {label:?}.")
            }

            // ---- Numeric degeneracy ----
            HmmError::DegenerateBelief { t } => write!(
                f,
                "HMM error: the filtered belief is all-zero at step {t}; the model assigns \
                 zero likelihood to the observed data."
            ),
            HmmError::ZeroProbabilityPath { t } => write!(
                f,
                "HMM error: every state path has probability zero at step {t}; Viterbi \
                 decoding is impossible under this model."
            ),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<HmmError> for PyErr {
    fn from(err: HmmError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Display formatting for representative variants, checking that the
    //   payloads (names, indices, offending values) appear in the message.
    //
    // They intentionally DO NOT cover:
    // - The conditions under which each variant is produced (covered by the
    //   model, filter, smoother, and decoder modules).
    // - PyErr conversion (exercised only under the python-bindings feature).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that validation variants embed their payload in the message.
    //
    // Given
    // -----
    // - A `RowNotStochastic` for row 1 of "transition" with sum 0.9.
    //
    // Expect
    // ------
    // - The message names the matrix, the row, and the offending sum.
    fn display_embeds_validation_payload() {
        let err = HmmError::RowNotStochastic { name: "transition", row: 1, sum: 0.9 };
        let msg = err.to_string();
        assert!(msg.contains("transition"));
        assert!(msg.contains("row 1"));
        assert!(msg.contains("0.9"));
    }

    #[test]
    // Purpose
    // -------
    // Verify that degeneracy variants report the failing time step.
    //
    // Given
    // -----
    // - A `ZeroProbabilityPath` at step 4.
    //
    // Expect
    // ------
    // - The message contains the step index.
    fn display_embeds_time_step() {
        let err = HmmError::ZeroProbabilityPath { t: 4 };
        assert!(err.to_string().contains("step 4"));
    }
}
