//! particle — sequential Monte Carlo filtering: trait, filter, resampling,
//! bundled models.
//!
//! Purpose
//! -------
//! Provide approximate Bayesian filtering for state-space models where the
//! exact recursions do not apply. The algorithm is the bootstrap particle
//! filter: a fixed-size population of sampled trajectories, reweighted by
//! observation likelihood and multinomially resampled each step. Models
//! plug in through the [`ParticleModel`] trait.
//!
//! Key behaviors
//! -------------
//! - Generic filtering core in [`filter`] ([`ParticleFilter`] for streaming
//!   use, [`particle_filter`] as the discrete batch driver).
//! - Multinomial resampling isolated in [`resample`].
//! - Bundled models in [`models`]: [`DiscreteHmm`](crate::hmm::DiscreteHmm)
//!   (for cross-checking against the exact filter) and the scalar
//!   [`LinearGaussianSsm`] (for cross-checking against the Kalman filter).
//! - Centralized error surface in [`errors`] ([`ParticleError`] and the
//!   [`ParticleResult`] alias).
//!
//! Invariants & assumptions
//! ------------------------
//! - The population size N is fixed per run and weights sum to 1 between
//!   steps.
//! - All randomness flows through a caller-supplied [`rand::Rng`]; seeded
//!   generators make runs exactly reproducible.
//! - Total weight collapse is recoverable: the filter resets to uniform
//!   weights and logs one warning through the `log` facade. This is the
//!   only non-fatal degeneracy in the crate.
//!
//! Downstream usage
//! ----------------
//! - Typical flow: implement [`ParticleModel`] (or reuse a bundled model),
//!   build a [`ParticleFilter`] with a chosen N and RNG, then call
//!   [`step`](ParticleFilter::step) per observation and read estimates off
//!   the population.
//! - Python bindings expose only the discrete driver, seeded per call.
//!
//! Testing notes
//! -------------
//! - Unit tests pin down: configuration errors, convergence of the
//!   histogram toward the exact forward filter in N, the N = 1 edge case,
//!   collapse recovery, offspring statistics of the resampler, and seeded
//!   reproducibility throughout. Integration tests compare the continuous
//!   model against the Kalman posterior mean.

pub mod errors;
pub mod filter;
pub mod models;
pub mod resample;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{ParticleError, ParticleResult};
pub use self::filter::{ParticleFilter, ParticleModel, particle_filter};
pub use self::models::LinearGaussianSsm;
pub use self::resample::multinomial_resample;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::{
        LinearGaussianSsm, ParticleError, ParticleFilter, ParticleModel, ParticleResult,
        particle_filter,
    };
}
