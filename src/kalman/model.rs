//! Model descriptor and Gaussian belief for linear-Gaussian filtering.
//!
//! Purpose
//! -------
//! Define the validated, immutable inputs of the Kalman recursion: the
//! time-invariant state-space model
//!
//! x_t = A·x_{t−1} + w_t,  w_t ~ N(0, Q)
//! z_t = H·x_t + v_t,      v_t ~ N(0, R)
//!
//! as [`KalmanModel`], and the (mean, covariance) pair the filter carries
//! between steps as [`GaussianBelief`]. All shape, finiteness, and symmetry
//! checks happen exactly once at construction; the recursion assumes
//! validated inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - A is n×n with n ≥ 1, H is m×n with m ≥ 1, Q is n×n, R is m×m.
//! - Q, R, and every belief covariance are symmetric within
//!   [`SYMMETRY_TOL`](crate::kalman::validation::SYMMETRY_TOL) and finite.
//!   Positive semi-definiteness is NOT checked here; an indefinite noise
//!   configuration surfaces later as
//!   [`SingularInnovation`](crate::kalman::errors::KalmanError::SingularInnovation).
//! - Descriptors are immutable after construction and shared by reference
//!   across filters.
use crate::kalman::{
    errors::{KalmanError, KalmanResult},
    validation::{
        validate_finite_matrix, validate_finite_vector, validate_shape, validate_symmetric,
    },
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Validated time-invariant linear-Gaussian state-space model.
#[derive(Debug, Clone)]
pub struct KalmanModel {
    transition: Array2<f64>,
    observation: Array2<f64>,
    process_noise: Array2<f64>,
    measurement_noise: Array2<f64>,
}

impl KalmanModel {
    /// Construct and validate a model from A, H, Q, and R.
    ///
    /// # Errors
    /// - [`KalmanError::EmptyState`] when A is 0×0.
    /// - [`KalmanError::DimensionMismatch`] when A is not square, H has no
    ///   rows or the wrong column count, or Q / R have the wrong shape.
    /// - [`KalmanError::NonFiniteEntry`] for NaN or infinite entries.
    /// - [`KalmanError::NotSymmetric`] when Q or R is asymmetric beyond
    ///   tolerance.
    pub fn new(
        transition: Array2<f64>,
        observation: Array2<f64>,
        process_noise: Array2<f64>,
        measurement_noise: Array2<f64>,
    ) -> KalmanResult<Self> {
        let n = transition.nrows();
        if n == 0 {
            return Err(KalmanError::EmptyState);
        }
        validate_shape("transition", transition.view(), (n, n))?;

        let m = observation.nrows();
        if m == 0 {
            return Err(KalmanError::DimensionMismatch {
                what: "observation",
                expected: (1, n),
                actual: observation.dim(),
            });
        }
        validate_shape("observation", observation.view(), (m, n))?;
        validate_shape("process_noise", process_noise.view(), (n, n))?;
        validate_shape("measurement_noise", measurement_noise.view(), (m, m))?;

        validate_finite_matrix("transition", transition.view())?;
        validate_finite_matrix("observation", observation.view())?;
        validate_finite_matrix("process_noise", process_noise.view())?;
        validate_finite_matrix("measurement_noise", measurement_noise.view())?;

        validate_symmetric("process_noise", process_noise.view())?;
        validate_symmetric("measurement_noise", measurement_noise.view())?;

        Ok(KalmanModel { transition, observation, process_noise, measurement_noise })
    }

    /// Latent state dimension n.
    pub fn n_state(&self) -> usize {
        self.transition.nrows()
    }

    /// Measurement dimension m.
    pub fn n_obs(&self) -> usize {
        self.observation.nrows()
    }

    /// State transition matrix A (n×n).
    pub fn transition(&self) -> ArrayView2<f64> {
        self.transition.view()
    }

    /// Observation matrix H (m×n).
    pub fn observation(&self) -> ArrayView2<f64> {
        self.observation.view()
    }

    /// Process-noise covariance Q (n×n).
    pub fn process_noise(&self) -> ArrayView2<f64> {
        self.process_noise.view()
    }

    /// Measurement-noise covariance R (m×m).
    pub fn measurement_noise(&self) -> ArrayView2<f64> {
        self.measurement_noise.view()
    }
}

/// A Gaussian state belief N(mean, covariance).
///
/// The filter's unit of state: the initial prior, every intermediate
/// posterior, and every entry of the batch driver's output are
/// `GaussianBelief`s. Covariances are validated symmetric at construction
/// and kept exactly symmetric by the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianBelief {
    mean: Array1<f64>,
    covariance: Array2<f64>,
}

impl GaussianBelief {
    /// Construct and validate a belief.
    ///
    /// # Errors
    /// - [`KalmanError::EmptyState`] for a zero-length mean.
    /// - [`KalmanError::DimensionMismatch`] when the covariance is not
    ///   square of matching dimension.
    /// - [`KalmanError::NonFiniteEntry`] / [`KalmanError::NotSymmetric`]
    ///   for invalid covariance content.
    pub fn new(mean: Array1<f64>, covariance: Array2<f64>) -> KalmanResult<Self> {
        let n = mean.len();
        if n == 0 {
            return Err(KalmanError::EmptyState);
        }
        validate_shape("covariance", covariance.view(), (n, n))?;
        validate_finite_vector("mean", mean.view())?;
        validate_finite_matrix("covariance", covariance.view())?;
        validate_symmetric("covariance", covariance.view())?;
        Ok(GaussianBelief { mean, covariance })
    }

    /// State dimension.
    pub fn dim(&self) -> usize {
        self.mean.len()
    }

    /// Belief mean.
    pub fn mean(&self) -> ArrayView1<f64> {
        self.mean.view()
    }

    /// Belief covariance.
    pub fn covariance(&self) -> ArrayView2<f64> {
        self.covariance.view()
    }

    /// Consume the belief, yielding its parts. Used by the filter, which
    /// mutates the state in place between observations.
    pub(crate) fn into_parts(self) -> (Array1<f64>, Array2<f64>) {
        (self.mean, self.covariance)
    }

    /// Rebuild a belief from parts the filter already keeps valid,
    /// bypassing re-validation.
    pub(crate) fn from_parts(mean: Array1<f64>, covariance: Array2<f64>) -> Self {
        GaussianBelief { mean, covariance }
    }
}
