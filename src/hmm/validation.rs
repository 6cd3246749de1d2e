//! Stochasticity checks shared across discrete-HMM inference.
//!
//! Purpose
//! -------
//! Centralize the numeric invariants of the discrete model: probability
//! entries must be finite and non-negative, matrix rows and probability
//! vectors must sum to 1 within [`PROB_TOL`]. Every validator reports the
//! first offending entry through a typed [`HmmError`].
//!
//! Key behaviors
//! -------------
//! - [`validate_stochastic_vector`] / [`validate_stochastic_matrix`] run a
//!   single pass per row and fail fast on the first violation.
//! - [`normalize`] rescales a belief in place and returns the
//!   pre-normalization mass, which the forward filter folds into the running
//!   log-likelihood.
//!
//! Invariants & assumptions
//! ------------------------
//! - Validators never mutate their input; [`normalize`] is the only helper
//!   that writes, and only when the mass is strictly positive.
//! - Tolerance comparisons use an absolute deviation of [`PROB_TOL`].
//!
//! Downstream usage
//! ----------------
//! - [`DiscreteHmm::new`](crate::hmm::model::DiscreteHmm::new) validates π,
//!   A, and B exactly once; recursion code relies on those invariants and
//!   re-validates only caller-supplied beliefs (e.g. the predictor input).
use crate::hmm::errors::{HmmError, HmmResult};
use ndarray::{Array1, ArrayView1, ArrayView2};

/// Absolute tolerance for stochasticity checks: probability vectors and
/// matrix rows must sum to 1 within this bound.
pub const PROB_TOL: f64 = 1e-9;

/// Validate a probability vector: finite, non-negative entries summing to 1
/// within [`PROB_TOL`].
///
/// `name` labels the vector in error payloads (e.g. `"prior"`). Entry-level
/// failures are reported with `row = 0` and the offending column.
pub fn validate_stochastic_vector(name: &'static str, v: ArrayView1<f64>) -> HmmResult<()> {
    for (col, &value) in v.iter().enumerate() {
        if !value.is_finite() {
            return Err(HmmError::NonFiniteEntry { name, row: 0, col, value });
        }
        if value < 0.0 {
            return Err(HmmError::NegativeEntry { name, row: 0, col, value });
        }
    }
    let sum = v.sum();
    if (sum - 1.0).abs() > PROB_TOL {
        return Err(HmmError::VectorNotStochastic { name, sum });
    }
    Ok(())
}

/// Validate a row-stochastic matrix: every entry finite and non-negative,
/// every row summing to 1 within [`PROB_TOL`].
///
/// `name` labels the matrix in error payloads (e.g. `"transition"`,
/// `"emission"`). The scan stops at the first offending entry or row.
pub fn validate_stochastic_matrix(name: &'static str, m: ArrayView2<f64>) -> HmmResult<()> {
    for (row, r) in m.rows().into_iter().enumerate() {
        for (col, &value) in r.iter().enumerate() {
            if !value.is_finite() {
                return Err(HmmError::NonFiniteEntry { name, row, col, value });
            }
            if value < 0.0 {
                return Err(HmmError::NegativeEntry { name, row, col, value });
            }
        }
        let sum = r.sum();
        if (sum - 1.0).abs() > PROB_TOL {
            return Err(HmmError::RowNotStochastic { name, row, sum });
        }
    }
    Ok(())
}

/// Rescale `belief` in place so it sums to 1 and return the
/// pre-normalization mass.
///
/// Returns `0.0` without touching `belief` when the mass is not strictly
/// positive; callers decide whether that is fatal
/// ([`HmmError::DegenerateBelief`]) or recoverable (particle reweighting).
pub fn normalize(belief: &mut Array1<f64>) -> f64 {
    let mass = belief.sum();
    if mass > 0.0 {
        belief.mapv_inplace(|p| p / mass);
    }
    mass
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Acceptance of valid stochastic vectors/matrices, including sums that
    //   deviate by less than PROB_TOL.
    // - Rejection payloads for non-finite, negative, and non-normalized
    //   inputs.
    // - `normalize` behavior for positive and zero mass.
    //
    // They intentionally DO NOT cover:
    // - How callers react to the returned errors (model/filter modules).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Accept vectors and matrices whose sums deviate from 1 by less than the
    // tolerance.
    //
    // Given
    // -----
    // - A vector summing to 1 + 1e-12 and a 2×2 matrix with exact rows.
    //
    // Expect
    // ------
    // - Both validators return Ok.
    fn validators_accept_within_tolerance() {
        let v = array![0.5, 0.5 + 1e-12];
        assert!(validate_stochastic_vector("prior", v.view()).is_ok());

        let m = array![[0.7, 0.3], [0.3, 0.7]];
        assert!(validate_stochastic_matrix("transition", m.view()).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Reject a matrix row that does not sum to 1, reporting the row index
    // and the offending sum.
    //
    // Given
    // -----
    // - A 2×2 matrix whose second row sums to 0.8.
    //
    // Expect
    // ------
    // - `RowNotStochastic { row: 1, .. }` with the computed sum.
    fn matrix_validator_rejects_bad_row() {
        let m = array![[0.5, 0.5], [0.4, 0.4]];
        let err = validate_stochastic_matrix("emission", m.view()).unwrap_err();
        match err {
            HmmError::RowNotStochastic { name, row, sum } => {
                assert_eq!(name, "emission");
                assert_eq!(row, 1);
                assert!((sum - 0.8).abs() < 1e-12);
            }
            other => panic!("expected RowNotStochastic, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Reject negative and non-finite entries before checking sums.
    //
    // Given
    // -----
    // - A vector with a negative entry and one with a NaN entry.
    //
    // Expect
    // ------
    // - `NegativeEntry` and `NonFiniteEntry` respectively, with the column
    //   of the first offending value.
    fn vector_validator_rejects_bad_entries() {
        let err = validate_stochastic_vector("prior", array![1.2, -0.2].view()).unwrap_err();
        match err {
            HmmError::NegativeEntry { col, .. } => assert_eq!(col, 1),
            other => panic!("expected NegativeEntry, got {other:?}"),
        }

        let err = validate_stochastic_vector("prior", array![f64::NAN, 1.0].view()).unwrap_err();
        match err {
            HmmError::NonFiniteEntry { col, .. } => assert_eq!(col, 0),
            other => panic!("expected NonFiniteEntry, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // `normalize` rescales positive-mass beliefs and leaves zero-mass
    // beliefs untouched.
    //
    // Given
    // -----
    // - An unnormalized belief [0.45, 0.1] and an all-zero belief.
    //
    // Expect
    // ------
    // - The first is rescaled to sum 1 with mass 0.55 returned.
    // - The second returns 0.0 and stays all-zero.
    fn normalize_handles_positive_and_zero_mass() {
        let mut belief = array![0.45, 0.1];
        let mass = normalize(&mut belief);
        assert!((mass - 0.55).abs() < 1e-12);
        assert!((belief.sum() - 1.0).abs() < 1e-12);

        let mut zero = array![0.0, 0.0];
        assert_eq!(normalize(&mut zero), 0.0);
        assert_eq!(zero, array![0.0, 0.0]);
    }
}
