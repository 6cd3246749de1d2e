//! Errors for sequential Monte Carlo filtering (configuration and model
//! wrapping).
//!
//! This module defines [`ParticleError`], shared by the generic particle
//! filter, the resampling helpers, and the bundled state-space models. It
//! implements `Display`/`Error` and converts to `PyErr` for PyO3.
//!
//! ## Conventions
//! - Configuration mistakes (zero particles, invalid noise scales) fail at
//!   construction and never mid-run.
//! - Weight collapse is deliberately NOT an error: the filter recovers by
//!   resetting to uniform weights and logs a warning instead. Only the exact
//!   discrete recursions treat degeneracy as fatal.
//! - [`ParticleError::Model`] wraps the discrete model's own error type when
//!   the convenience driver runs over a
//!   [`DiscreteHmm`](crate::hmm::model::DiscreteHmm).
use crate::hmm::errors::HmmError;
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Crate-wide result alias for particle-filter operations that may produce
/// [`ParticleError`].
pub type ParticleResult<T> = Result<T, ParticleError>;

/// Unified error type for sequential Monte Carlo filtering.
#[derive(Debug, Clone, PartialEq)]
pub enum ParticleError {
    // ---- Configuration ----
    /// The requested particle count cannot support a filter run.
    InvalidParticleCount { n: usize },

    /// A noise or prior scale parameter is not a valid standard deviation.
    InvalidNoise { name: &'static str, value: f64 },

    // ---- Wrapped model errors ----
    /// The underlying discrete model rejected its inputs.
    Model(HmmError),
}

impl std::error::Error for ParticleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParticleError::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParticleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParticleError::InvalidParticleCount { n } => write!(
                f,
                "Particle filter error: particle count {n} is invalid; at least one particle \
                 is required."
            ),
            ParticleError::InvalidNoise { name, value } => write!(
                f,
                "Particle filter error: {name} = {value} is not a valid standard deviation \
                 (must be finite and strictly positive)."
            ),
            ParticleError::Model(err) => write!(f, "Particle filter error: {err}"),
        }
    }
}

impl From<HmmError> for ParticleError {
    fn from(err: HmmError) -> Self {
        ParticleError::Model(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<ParticleError> for PyErr {
    fn from(err: ParticleError) -> PyErr {
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
    // - Display formatting for each variant, including the wrapped discrete
    //   model error.
    // - The `From<HmmError>` conversion used by the discrete driver.
    //
    // They intentionally DO NOT cover:
    // - The conditions producing each variant (filter and model modules).
    // - PyErr conversion (exercised only under the python-bindings feature).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that configuration variants embed their payload in the message.
    //
    // Given
    // -----
    // - An `InvalidNoise` for "process_std" with value -1.0.
    //
    // Expect
    // ------
    // - The message names the parameter and the offending value.
    fn display_embeds_configuration_payload() {
        let err = ParticleError::InvalidNoise { name: "process_std", value: -1.0 };
        let msg = err.to_string();
        assert!(msg.contains("process_std"));
        assert!(msg.contains("-1"));
    }

    #[test]
    // Purpose
    // -------
    // Verify that discrete model errors convert and keep their message.
    //
    // Given
    // -----
    // - An `HmmError::UnknownObservation` converted via `From`.
    //
    // Expect
    // ------
    // - A `Model` variant whose message includes the inner description.
    fn model_errors_convert_and_display() {
        let inner = HmmError::UnknownObservation { index: 5, n_observations: 2 };
        let err: ParticleError = inner.clone().into();
        assert_eq!(err, ParticleError::Model(inner));
        assert!(err.to_string().contains("observation index 5"));
    }
}
