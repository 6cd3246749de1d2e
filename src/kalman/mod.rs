//! kalman — linear-Gaussian state estimation: model, belief, filter.
//!
//! Purpose
//! -------
//! Provide exact Bayesian filtering for time-invariant linear-Gaussian
//! state-space models: a validated [`KalmanModel`] descriptor (A, H, Q, R),
//! the [`GaussianBelief`] (mean, covariance) state the recursion carries,
//! and the predict/update filter itself, streaming or batch.
//!
//! Key behaviors
//! -------------
//! - All shape, finiteness, and covariance-symmetry validation happens at
//!   construction ([`model`], tolerances in [`validation`]); the recursion
//!   assumes validated inputs.
//! - The measurement update solves the innovation system through a
//!   Cholesky factorization (via `nalgebra`, bridged from `ndarray`)
//!   instead of forming S⁻¹; factorization failure is the fatal
//!   [`SingularInnovation`](crate::kalman::errors::KalmanError::SingularInnovation)
//!   error.
//! - Posterior covariances use the Joseph form and are explicitly
//!   symmetrized, so `P == Pᵗ` holds exactly after every step.
//! - The filter accumulates the measurement log-likelihood
//!   Σ ln N(z_t; H·m⁻, S_t) alongside the beliefs.
//!
//! Invariants & assumptions
//! ------------------------
//! - Positive semi-definiteness of Q and R is not validated up front; a
//!   configuration that makes S indefinite surfaces at the first affected
//!   update, with its step index.
//! - Model descriptors are immutable and shared by reference; the filter
//!   owns only its belief.
//!
//! Downstream usage
//! ----------------
//! - Typical flow: build a [`KalmanModel`] and an initial
//!   [`GaussianBelief`], then either hold a [`KalmanFilter`] and call
//!   [`step`](KalmanFilter::step) per measurement, or run
//!   [`kalman_filter`] over a slice.
//! - The particle module's linear-Gaussian model targets the same posterior
//!   and serves as the Monte Carlo cross-check.
//!
//! Testing notes
//! -------------
//! - Unit tests pin down: validation payloads, the closed-form scalar
//!   posterior (gain, variance, log-likelihood), singular-innovation
//!   reporting, exact symmetry over multi-step runs, and batch/streaming
//!   agreement. Integration tests run constant-velocity tracking and the
//!   particle-filter comparison.

pub mod errors;
pub mod filter;
pub mod model;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{KalmanError, KalmanResult};
pub use self::filter::{KalmanFilter, KalmanFiltered, kalman_filter};
pub use self::model::{GaussianBelief, KalmanModel};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::{
        GaussianBelief, KalmanError, KalmanFilter, KalmanFiltered, KalmanModel, KalmanResult,
        kalman_filter,
    };
}
