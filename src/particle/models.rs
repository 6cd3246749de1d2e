//! State-space models bundled for particle filtering.
//!
//! Two [`ParticleModel`] implementations ship with the crate:
//!
//! - [`DiscreteHmm`] itself, so the Monte Carlo population can be compared
//!   directly against the exact forward recursion on the same model
//!   (particles are state indices, dynamics draw from transition rows).
//! - [`LinearGaussianSsm`], a scalar AR(1) model with Gaussian process and
//!   measurement noise. On this model the particle filter approximates a
//!   posterior the Kalman filter computes exactly, which makes it the
//!   natural cross-check between the two.
use crate::{
    hmm::model::DiscreteHmm,
    particle::{
        errors::{ParticleError, ParticleResult},
        filter::ParticleModel,
    },
};
use ndarray::ArrayView1;
use rand::Rng;
use statrs::distribution::{Continuous, Normal};

/// Draw an index from a categorical distribution given by `probabilities`
/// (assumed normalized) by inverting the cumulative sum.
fn sample_categorical<R: Rng + ?Sized>(probabilities: ArrayView1<f64>, rng: &mut R) -> usize {
    let u = rng.gen::<f64>();
    let mut acc = 0.0;
    for (idx, &p) in probabilities.iter().enumerate() {
        acc += p;
        if u < acc {
            return idx;
        }
    }
    probabilities.len() - 1
}

/// Particles over a [`DiscreteHmm`] are state indices; the prior, dynamics,
/// and likelihood come straight from π, A, and B.
impl ParticleModel for DiscreteHmm {
    type State = usize;
    type Obs = usize;

    fn sample_prior<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        sample_categorical(self.prior(), rng)
    }

    fn propagate<R: Rng + ?Sized>(&self, state: &usize, rng: &mut R) -> usize {
        sample_categorical(self.transition().row(*state), rng)
    }

    fn likelihood(&self, state: &usize, obs: &usize) -> f64 {
        self.emission()[[*state, *obs]]
    }
}

/// Scalar linear-Gaussian state-space model:
///
/// x_t = φ·x_{t−1} + w_t,  w_t ~ N(0, process_std²)
/// y_t = x_t + v_t,        v_t ~ N(0, measurement_std²)
///
/// with prior x_0 ~ N(prior_mean, prior_std²). All noise scales are
/// standard deviations and must be finite and strictly positive; φ and the
/// prior mean must be finite. Validation happens once at construction, the
/// sampling and likelihood paths are infallible afterwards.
#[derive(Debug, Clone)]
pub struct LinearGaussianSsm {
    phi: f64,
    prior_mean: f64,
    prior_std: f64,
    process_std: f64,
    measurement_std: f64,
    prior_noise: Normal,
    process_noise: Normal,
    measurement_noise: Normal,
}

impl LinearGaussianSsm {
    /// Construct and validate a scalar linear-Gaussian model.
    ///
    /// # Errors
    /// Returns [`ParticleError::InvalidNoise`] naming the first offending
    /// parameter: a non-finite `phi` or `prior_mean`, or a noise scale that
    /// is not finite and strictly positive.
    pub fn new(
        phi: f64,
        prior_mean: f64,
        prior_std: f64,
        process_std: f64,
        measurement_std: f64,
    ) -> ParticleResult<Self> {
        if !phi.is_finite() {
            return Err(ParticleError::InvalidNoise { name: "phi", value: phi });
        }
        if !prior_mean.is_finite() {
            return Err(ParticleError::InvalidNoise { name: "prior_mean", value: prior_mean });
        }
        let prior_noise = build_noise("prior_std", prior_std)?;
        let process_noise = build_noise("process_std", process_std)?;
        let measurement_noise = build_noise("measurement_std", measurement_std)?;
        Ok(LinearGaussianSsm {
            phi,
            prior_mean,
            prior_std,
            process_std,
            measurement_std,
            prior_noise,
            process_noise,
            measurement_noise,
        })
    }

    /// AR(1) coefficient φ.
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Prior mean and standard deviation of x_0.
    pub fn prior(&self) -> (f64, f64) {
        (self.prior_mean, self.prior_std)
    }

    /// Process-noise standard deviation.
    pub fn process_std(&self) -> f64 {
        self.process_std
    }

    /// Measurement-noise standard deviation.
    pub fn measurement_std(&self) -> f64 {
        self.measurement_std
    }
}

/// Validate a standard deviation and wrap it in a zero-mean Gaussian.
fn build_noise(name: &'static str, std: f64) -> ParticleResult<Normal> {
    if !std.is_finite() || std <= 0.0 {
        return Err(ParticleError::InvalidNoise { name, value: std });
    }
    Normal::new(0.0, std).map_err(|_| ParticleError::InvalidNoise { name, value: std })
}

impl ParticleModel for LinearGaussianSsm {
    type State = f64;
    type Obs = f64;

    fn sample_prior<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        use rand::distributions::Distribution;
        self.prior_mean + self.prior_noise.sample(rng)
    }

    fn propagate<R: Rng + ?Sized>(&self, state: &f64, rng: &mut R) -> f64 {
        use rand::distributions::Distribution;
        self.phi * state + self.process_noise.sample(rng)
    }

    fn likelihood(&self, state: &f64, obs: &f64) -> f64 {
        self.measurement_noise.pdf(obs - state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Constructor validation payloads for the linear-Gaussian model.
    // - Agreement of the discrete model's sampling frequencies with π and A
    //   under a seeded RNG, and of its likelihood with B.
    // - The shape of the Gaussian likelihood (peaks where the state matches
    //   the measurement) and the AR(1) propagation mean.
    //
    // They intentionally DO NOT cover:
    // - Full filtering runs over these models (filter and integration
    //   tests).
    // -------------------------------------------------------------------------

    fn weather_model() -> DiscreteHmm {
        DiscreteHmm::new(
            vec!["Rain".into(), "Dry".into()],
            vec!["Umbrella".into(), "NoUmbrella".into()],
            array![0.5, 0.5],
            array![[0.7, 0.3], [0.3, 0.7]],
            array![[0.9, 0.1], [0.2, 0.8]],
        )
        .expect("weather model should validate")
    }

    #[test]
    // Purpose
    // -------
    // Reject invalid noise scales and non-finite parameters with the
    // offending name.
    //
    // Given
    // -----
    // - A negative process std, a zero measurement std, and a NaN phi.
    //
    // Expect
    // ------
    // - `InvalidNoise` naming "process_std", "measurement_std", and "phi"
    //   respectively.
    fn linear_gaussian_constructor_validates() {
        let err = LinearGaussianSsm::new(0.9, 0.0, 1.0, -0.5, 1.0).unwrap_err();
        assert_eq!(err, ParticleError::InvalidNoise { name: "process_std", value: -0.5 });

        let err = LinearGaussianSsm::new(0.9, 0.0, 1.0, 0.5, 0.0).unwrap_err();
        assert_eq!(err, ParticleError::InvalidNoise { name: "measurement_std", value: 0.0 });

        let err = LinearGaussianSsm::new(f64::NAN, 0.0, 1.0, 0.5, 1.0).unwrap_err();
        match err {
            ParticleError::InvalidNoise { name: "phi", value } => assert!(value.is_nan()),
            other => panic!("expected InvalidNoise for phi, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Discrete prior and transition sampling must track π and the selected
    // row of A.
    //
    // Given
    // -----
    // - The weather model, 20_000 seeded draws each.
    //
    // Expect
    // ------
    // - Prior draw frequency of state 0 within 0.02 of 0.5.
    // - Transition draw frequency from state 0 to state 0 within 0.02 of
    //   0.7.
    fn discrete_sampling_tracks_model_rows() {
        let model = weather_model();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let n = 20_000;

        let prior_zero =
            (0..n).filter(|_| model.sample_prior(&mut rng) == 0).count() as f64 / n as f64;
        assert!((prior_zero - 0.5).abs() < 0.02, "prior frequency {prior_zero}");

        let stay = (0..n).filter(|_| model.propagate(&0, &mut rng) == 0).count() as f64 / n as f64;
        assert!((stay - 0.7).abs() < 0.02, "transition frequency {stay}");
    }

    #[test]
    // Purpose
    // -------
    // The discrete likelihood is exactly the emission entry.
    //
    // Given
    // -----
    // - The weather model.
    //
    // Expect
    // ------
    // - likelihood(Rain, Umbrella) = 0.9 and likelihood(Dry, Umbrella) =
    //   0.2.
    fn discrete_likelihood_reads_emission_matrix() {
        let model = weather_model();
        assert_eq!(model.likelihood(&0, &0), 0.9);
        assert_eq!(model.likelihood(&1, &0), 0.2);
    }

    #[test]
    // Purpose
    // -------
    // The Gaussian likelihood peaks where the state equals the measurement,
    // and propagation is centered on φ·x.
    //
    // Given
    // -----
    // - φ = 0.9, unit noise scales, 20_000 seeded propagation draws from
    //   x = 10.
    //
    // Expect
    // ------
    // - likelihood(0, 0) > likelihood(1, 0) > likelihood(3, 0).
    // - The propagation sample mean is within 0.05 of 9.0.
    fn gaussian_likelihood_and_propagation_shape() {
        let model = LinearGaussianSsm::new(0.9, 0.0, 1.0, 1.0, 1.0).unwrap();
        let at_match = model.likelihood(&0.0, &0.0);
        let near = model.likelihood(&1.0, &0.0);
        let far = model.likelihood(&3.0, &0.0);
        assert!(at_match > near && near > far);

        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let n = 20_000;
        let mean: f64 =
            (0..n).map(|_| model.propagate(&10.0, &mut rng)).sum::<f64>() / n as f64;
        assert!((mean - 9.0).abs() < 0.05, "propagation mean {mean}");
    }
}
