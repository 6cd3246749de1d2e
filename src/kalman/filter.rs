//! Kalman filtering: predict / update recursion over a linear-Gaussian
//! model.
//!
//! Purpose
//! -------
//! Propagate a [`GaussianBelief`] through a [`KalmanModel`] one measurement
//! at a time. Each step is the textbook pair:
//!
//! predict:  m⁻ = A·m,            P⁻ = A·P·Aᵗ + Q
//! update:   S  = H·P⁻·Hᵗ + R,    K = P⁻·Hᵗ·S⁻¹
//!           m  = m⁻ + K·(z − H·m⁻)
//!           P  = (I − K·H)·P⁻·(I − K·H)ᵗ + K·R·Kᵗ   (Joseph form)
//!
//! The innovation solve goes through `nalgebra`'s Cholesky factorization
//! rather than an explicit inverse; a factorization failure means S is not
//! positive definite and is reported as a fatal
//! [`SingularInnovation`](crate::kalman::errors::KalmanError::SingularInnovation)
//! with the step index. The Cholesky factor also yields ln|S| for the
//! running measurement log-likelihood.
//!
//! Invariants & assumptions
//! ------------------------
//! - P is symmetrized explicitly after every predict and every update, so
//!   callers always observe `P == Pᵗ` exactly despite floating-point drift.
//! - Model and belief dimensions are checked at filter construction and
//!   per-measurement; the recursion itself assumes validated shapes.
//!
//! Downstream usage
//! ----------------
//! - Streaming callers hold a [`KalmanFilter`] and feed measurements as
//!   they arrive; [`kalman_filter`] is the batch driver over a slice.
use crate::kalman::{
    errors::{KalmanError, KalmanResult},
    model::{GaussianBelief, KalmanModel},
    validation::{symmetrize, to_array2, to_dmatrix, to_dvector, validate_finite_vector},
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Output of the batch driver: one posterior belief per measurement plus
/// the accumulated measurement log-likelihood Σ ln N(z_t; H·m⁻, S_t).
#[derive(Debug, Clone)]
pub struct KalmanFiltered {
    /// Posterior belief after each measurement, oldest first.
    pub beliefs: Vec<GaussianBelief>,
    /// Total log-likelihood of the measurement sequence under the model.
    pub log_likelihood: f64,
}

/// A resumable Kalman recursion: owns the current belief between
/// measurements.
pub struct KalmanFilter<'m> {
    model: &'m KalmanModel,
    mean: Array1<f64>,
    covariance: Array2<f64>,
    log_likelihood: f64,
    steps: usize,
}

impl<'m> KalmanFilter<'m> {
    /// Start a recursion from an initial belief.
    ///
    /// # Errors
    /// Returns [`KalmanError::DimensionMismatch`] when the belief dimension
    /// disagrees with the model's state dimension.
    pub fn new(model: &'m KalmanModel, initial: GaussianBelief) -> KalmanResult<Self> {
        if initial.dim() != model.n_state() {
            return Err(KalmanError::DimensionMismatch {
                what: "initial belief",
                expected: (model.n_state(), 1),
                actual: (initial.dim(), 1),
            });
        }
        let (mean, covariance) = initial.into_parts();
        Ok(KalmanFilter { model, mean, covariance, log_likelihood: 0.0, steps: 0 })
    }

    /// Time update: push the belief through the dynamics without evidence.
    pub fn predict(&mut self) {
        let a = self.model.transition();
        self.mean = a.dot(&self.mean);
        self.covariance = a.dot(&self.covariance).dot(&a.t()) + self.model.process_noise();
        symmetrize(&mut self.covariance);
    }

    /// Measurement update: fold one measurement into the current belief.
    ///
    /// Adds ln N(z; H·m, S) to the running log-likelihood and leaves P in
    /// Joseph form, symmetrized.
    ///
    /// # Errors
    /// - [`KalmanError::DimensionMismatch`] / [`KalmanError::NonFiniteEntry`]
    ///   for a malformed measurement.
    /// - [`KalmanError::SingularInnovation`] when S has no Cholesky factor;
    ///   the belief is left unchanged in that case.
    pub fn update(&mut self, measurement: ArrayView1<f64>) -> KalmanResult<()> {
        let m = self.model.n_obs();
        if measurement.len() != m {
            return Err(KalmanError::DimensionMismatch {
                what: "measurement",
                expected: (m, 1),
                actual: (measurement.len(), 1),
            });
        }
        validate_finite_vector("measurement", measurement)?;

        let h = self.model.observation();
        let r = self.model.measurement_noise();

        let innovation = measurement.to_owned() - h.dot(&self.mean);
        let s = h.dot(&self.covariance).dot(&h.t()) + r;

        let chol = to_dmatrix(s.view())
            .cholesky()
            .ok_or(KalmanError::SingularInnovation { step: self.steps })?;

        // ln|S| from the factor diagonal; a non-positive pivot means the
        // factorization is unusable even if nalgebra produced one.
        let l = chol.l();
        let mut log_det = 0.0;
        for i in 0..m {
            let d = l[(i, i)];
            if !(d > 0.0 && d.is_finite()) {
                return Err(KalmanError::SingularInnovation { step: self.steps });
            }
            log_det += 2.0 * d.ln();
        }

        let v = to_dvector(innovation.view());
        let s_inv_v = chol.solve(&v);
        let quad = v.dot(&s_inv_v);
        self.log_likelihood +=
            -0.5 * (m as f64 * (2.0 * std::f64::consts::PI).ln() + log_det + quad);

        // K = P·Hᵗ·S⁻¹, computed as (S⁻¹·(P·Hᵗ)ᵗ)ᵗ through the factor.
        let ph_t = to_dmatrix(self.covariance.dot(&h.t()).view());
        let gain = to_array2(&chol.solve(&ph_t.transpose()).transpose());

        self.mean = &self.mean + &gain.dot(&innovation);

        let i_kh = Array2::<f64>::eye(self.model.n_state()) - gain.dot(&h);
        self.covariance =
            i_kh.dot(&self.covariance).dot(&i_kh.t()) + gain.dot(&r).dot(&gain.t());
        symmetrize(&mut self.covariance);

        self.steps += 1;
        Ok(())
    }

    /// One full filter step: [`predict`](Self::predict) then
    /// [`update`](Self::update).
    pub fn step(&mut self, measurement: ArrayView1<f64>) -> KalmanResult<()> {
        self.predict();
        self.update(measurement)
    }

    /// Current belief mean.
    pub fn mean(&self) -> ArrayView1<f64> {
        self.mean.view()
    }

    /// Current belief covariance (exactly symmetric).
    pub fn covariance(&self) -> ArrayView2<f64> {
        self.covariance.view()
    }

    /// Snapshot of the current belief.
    pub fn belief(&self) -> GaussianBelief {
        GaussianBelief::from_parts(self.mean.clone(), self.covariance.clone())
    }

    /// Accumulated measurement log-likelihood over all updates so far.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Number of measurements absorbed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

/// Filter a full measurement sequence in one call.
///
/// Runs predict-then-update per measurement, starting from `initial`.
/// Returns one posterior belief per measurement; an empty sequence yields
/// no beliefs and a log-likelihood of 0.
///
/// # Errors
/// Propagates every error of [`KalmanFilter::update`], with the step index
/// identifying the offending measurement.
pub fn kalman_filter(
    model: &KalmanModel,
    initial: GaussianBelief,
    measurements: &[Array1<f64>],
) -> KalmanResult<KalmanFiltered> {
    let mut kf = KalmanFilter::new(model, initial)?;
    let mut beliefs = Vec::with_capacity(measurements.len());
    for z in measurements {
        kf.step(z.view())?;
        beliefs.push(kf.belief());
    }
    Ok(KalmanFiltered { beliefs, log_likelihood: kf.log_likelihood() })
}
