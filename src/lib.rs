//! rust_filtering — sequential Bayesian state estimation with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the state-estimation routines to Python via the `_rust_filtering`
//! extension module. When the `python-bindings` feature is enabled, this
//! module defines the Python-facing classes and submodules used by the
//! `rust_filtering` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules ([`hmm`], [`particle`], and [`kalman`])
//!   as the public crate surface.
//! - Define `#[pyclass]` wrappers ([`Hmm`], [`Kalman`]) and the
//!   `#[pymodule]` initializer for the `_rust_filtering` Python extension.
//! - Create and register Python submodules (`hmm`, `kalman`) under
//!   `rust_filtering` so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner Rust modules; this file performs
//!   only FFI glue, input conversion, and error mapping.
//! - Python-visible types mirror the invariants of their Rust counterparts:
//!   models validate at construction, degeneracy errors carry their time
//!   step, and the particle path is seeded explicitly per call.
//!
//! Conventions
//! -----------
//! - Observation sequences cross the Python boundary as label lists and are
//!   encoded to indices once per call.
//! - Beliefs and matrices return to Python as plain nested lists; callers
//!   wrap them in numpy as needed.
//! - Errors from core Rust code propagate as typed error enums internally
//!   and convert to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on the inner modules and can
//!   ignore the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports `_rust_filtering` and wraps its
//!   classes in user-facing Python APIs.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by the integration tests under `tests/`; Python smoke tests verify
//!   that the classes construct, run, and surface errors correctly.

pub mod hmm;
pub mod kalman;
pub mod particle;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use rand::{SeedableRng, rngs::StdRng};

#[cfg(feature = "python-bindings")]
use crate::{
    hmm::{
        filter::{filter, predict},
        model::DiscreteHmm,
        smoother::smooth,
        viterbi::decode_labels,
    },
    kalman::{
        filter::kalman_filter,
        model::{GaussianBelief, KalmanModel},
    },
    particle::filter::particle_filter,
    utils::{extract_array1, extract_array2},
};

#[cfg(feature = "python-bindings")]
fn rows_to_lists(rows: &[ndarray::Array1<f64>]) -> Vec<Vec<f64>> {
    rows.iter().map(|r| r.to_vec()).collect()
}

#[cfg(feature = "python-bindings")]
fn matrix_to_lists(m: ndarray::ArrayView2<f64>) -> Vec<Vec<f64>> {
    m.rows().into_iter().map(|r| r.to_vec()).collect()
}

/// Hmm — Python-facing wrapper for discrete hidden Markov inference.
///
/// Purpose
/// -------
/// Expose the [`DiscreteHmm`] inference surface (filter, predict, smooth,
/// decode, particle approximation) to Python callers while preserving the
/// core Rust validation and error behavior.
///
/// Key behaviors
/// -------------
/// - Validate the model once at construction; every later call assumes a
///   well-formed model.
/// - Accept observation sequences as label lists and encode them at the
///   boundary, surfacing the offending label on failure.
/// - Return beliefs as nested lists and decoded paths as label lists.
///
/// Notes
/// -----
/// - Native Rust callers should use [`DiscreteHmm`] and the `hmm` module
///   directly; this type exists solely for the PyO3 binding surface.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_filtering.hmm")]
pub struct Hmm {
    /// Underlying validated model.
    inner: DiscreteHmm,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Hmm {
    /// Discrete hidden Markov model over labeled states and observations.
    #[new]
    #[pyo3(text_signature = "(states, observations, prior, transition, emission, /)")]
    pub fn new<'py>(
        py: Python<'py>, states: Vec<String>, observations: Vec<String>,
        prior: &Bound<'py, PyAny>, transition: &Bound<'py, PyAny>, emission: &Bound<'py, PyAny>,
    ) -> PyResult<Self> {
        let prior = extract_array1(py, prior)?;
        let transition = extract_array2(py, transition)?;
        let emission = extract_array2(py, emission)?;
        let inner = DiscreteHmm::new(states, observations, prior, transition, emission)?;
        Ok(Hmm { inner })
    }

    /// Run the forward filter over a label sequence.
    ///
    /// Returns `(beliefs, log_likelihood)` with one belief list per
    /// observation.
    pub fn filter(&self, observations: Vec<String>) -> PyResult<(Vec<Vec<f64>>, f64)> {
        let encoded = self.inner.encode_observations(&observations)?;
        let out = filter(&self.inner, &encoded)?;
        Ok((rows_to_lists(&out.beliefs), out.log_likelihood))
    }

    /// Project a belief `k` steps ahead without evidence.
    pub fn predict<'py>(
        &self, py: Python<'py>, belief: &Bound<'py, PyAny>, k: usize,
    ) -> PyResult<Vec<f64>> {
        let belief = extract_array1(py, belief)?;
        let projected = predict(&self.inner, belief.view(), k)?;
        Ok(projected.to_vec())
    }

    /// Run the forward-backward smoother over a label sequence.
    pub fn smooth(&self, observations: Vec<String>) -> PyResult<Vec<Vec<f64>>> {
        let encoded = self.inner.encode_observations(&observations)?;
        Ok(rows_to_lists(&smooth(&self.inner, &encoded)?))
    }

    /// Decode the most likely state path, returned as state labels.
    pub fn decode(&self, observations: Vec<String>) -> PyResult<Vec<String>> {
        let encoded = self.inner.encode_observations(&observations)?;
        Ok(decode_labels(&self.inner, &encoded)?)
    }

    /// Approximate the filtered beliefs with a seeded particle population.
    #[pyo3(
        signature = (observations, n_particles, seed = 0),
        text_signature = "(self, observations, n_particles, /, seed=0)"
    )]
    pub fn particle_filter(
        &self, observations: Vec<String>, n_particles: usize, seed: u64,
    ) -> PyResult<Vec<Vec<f64>>> {
        let encoded = self.inner.encode_observations(&observations).map_err(
            crate::particle::errors::ParticleError::from,
        )?;
        let mut rng = StdRng::seed_from_u64(seed);
        let beliefs = particle_filter(&self.inner, &encoded, n_particles, &mut rng)?;
        Ok(rows_to_lists(&beliefs))
    }

    /// State labels, in index order.
    #[getter]
    pub fn states(&self) -> Vec<String> {
        self.inner.states().to_vec()
    }

    /// Observation labels, in index order.
    #[getter]
    pub fn observations(&self) -> Vec<String> {
        self.inner.observations().to_vec()
    }
}

/// Kalman — Python-facing wrapper for linear-Gaussian filtering.
///
/// Purpose
/// -------
/// Expose the [`KalmanModel`] / [`GaussianBelief`] filtering surface to
/// Python callers: construct a validated model plus initial belief, then
/// filter full measurement sequences in one call.
///
/// Notes
/// -----
/// - Native Rust callers should use the `kalman` module directly; this type
///   exists solely for the PyO3 binding surface.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_filtering.kalman")]
pub struct Kalman {
    /// Underlying validated model.
    inner: KalmanModel,
    /// Initial belief used as the starting point of every `filter` call.
    initial: GaussianBelief,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Kalman {
    /// Linear-Gaussian state-space model with an initial belief.
    #[new]
    #[pyo3(
        text_signature = "(transition, observation, process_noise, measurement_noise, \
                          initial_mean, initial_covariance, /)"
    )]
    pub fn new<'py>(
        py: Python<'py>, transition: &Bound<'py, PyAny>, observation: &Bound<'py, PyAny>,
        process_noise: &Bound<'py, PyAny>, measurement_noise: &Bound<'py, PyAny>,
        initial_mean: &Bound<'py, PyAny>, initial_covariance: &Bound<'py, PyAny>,
    ) -> PyResult<Self> {
        let inner = KalmanModel::new(
            extract_array2(py, transition)?,
            extract_array2(py, observation)?,
            extract_array2(py, process_noise)?,
            extract_array2(py, measurement_noise)?,
        )?;
        let initial = GaussianBelief::new(
            extract_array1(py, initial_mean)?,
            extract_array2(py, initial_covariance)?,
        )?;
        Ok(Kalman { inner, initial })
    }

    /// Filter a T×m measurement matrix (one measurement per row).
    ///
    /// Returns `(means, covariances, log_likelihood)` with one entry per
    /// measurement.
    pub fn filter<'py>(
        &self, py: Python<'py>, measurements: &Bound<'py, PyAny>,
    ) -> PyResult<(Vec<Vec<f64>>, Vec<Vec<Vec<f64>>>, f64)> {
        let z = extract_array2(py, measurements)?;
        let rows: Vec<ndarray::Array1<f64>> =
            z.rows().into_iter().map(|r| r.to_owned()).collect();
        let out = kalman_filter(&self.inner, self.initial.clone(), &rows)?;
        let means = out.beliefs.iter().map(|b| b.mean().to_vec()).collect();
        let covariances = out.beliefs.iter().map(|b| matrix_to_lists(b.covariance())).collect();
        Ok((means, covariances, out.log_likelihood))
    }
}

/// _rust_filtering — PyO3 module initializer for the Python extension.
///
/// Creates the `hmm` and `kalman` submodules, attaches them to the parent
/// `_rust_filtering` module, and registers them in `sys.modules` so dotted
/// imports work from Python. Invoked automatically on import.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_filtering<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let hmm_mod = PyModule::new(_py, "hmm")?;
    let kalman_mod = PyModule::new(_py, "kalman")?;
    hmm_submodule(_py, m, &hmm_mod)?;
    kalman_submodule(_py, m, &kalman_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_filtering.hmm", hmm_mod)?;

    _py.import("sys")?.getattr("modules")?.set_item("rust_filtering.kalman", kalman_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn hmm_submodule<'py>(
    _py: Python, rust_filtering: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<Hmm>()?;
    rust_filtering.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn kalman_submodule<'py>(
    _py: Python, rust_filtering: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<Kalman>()?;
    rust_filtering.add_submodule(m)?;
    Ok(())
}
