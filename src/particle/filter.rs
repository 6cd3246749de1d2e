//! Sequential Monte Carlo (bootstrap) particle filtering.
//!
//! Purpose
//! -------
//! Approximate the filtering distribution of a state-space model by a
//! population of N weighted samples when exact recursions are unavailable
//! (non-linear dynamics, non-Gaussian noise, continuous state spaces). The
//! model enters through the [`ParticleModel`] trait; the filter itself is
//! model-agnostic.
//!
//! Key behaviors
//! -------------
//! - Per observation: propagate every particle through the dynamics, weight
//!   by the observation likelihood, guard against total weight collapse,
//!   resample multinomially, and leave the population equally weighted.
//! - The population size N is fixed at construction for the entire run.
//! - All randomness flows through a caller-supplied [`rand::Rng`]; the
//!   filter draws nothing from ambient sources, so a seeded generator makes
//!   runs exactly reproducible.
//!
//! Invariants & assumptions
//! ------------------------
//! - `particles` and `weights` have length N at all times and weights sum
//!   to 1 between steps.
//! - Weight collapse (zero or non-finite total likelihood) is recoverable:
//!   the filter resets to uniform weights, emits one `log::warn!`, and
//!   continues. This is the only module in the crate where degeneracy is
//!   not fatal.
//!
//! Downstream usage
//! ----------------
//! - Continuous models implement [`ParticleModel`] directly (see
//!   [`LinearGaussianSsm`](crate::particle::models::LinearGaussianSsm)).
//! - Discrete callers use [`particle_filter`], which runs the population
//!   over a [`DiscreteHmm`] and reports per-step state histograms.
use crate::{
    hmm::model::DiscreteHmm,
    particle::{
        errors::{ParticleError, ParticleResult},
        resample::multinomial_resample,
    },
};
use ndarray::{Array1, ArrayView1};
use rand::Rng;

/// A state-space model a particle population can traverse.
///
/// Implementors supply the three probabilistic ingredients of a bootstrap
/// filter: a prior sampler, a dynamics sampler, and an observation
/// likelihood. Likelihood values must be finite and non-negative; they need
/// not be normalized across states.
pub trait ParticleModel {
    /// Hidden-state representation carried by each particle.
    type State: Clone;

    /// Observation type consumed by the likelihood.
    type Obs;

    /// Draw an initial state from the model prior.
    fn sample_prior<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::State;

    /// Draw a successor state from the dynamics given the current state.
    fn propagate<R: Rng + ?Sized>(&self, state: &Self::State, rng: &mut R) -> Self::State;

    /// Evaluate the likelihood of `obs` under `state`.
    fn likelihood(&self, state: &Self::State, obs: &Self::Obs) -> f64;
}

/// A fixed-size particle population tracking one model's filtering
/// distribution.
///
/// Holds the population between observations, so callers can interleave
/// [`step`](ParticleFilter::step) calls with their own readouts of
/// [`particles`](ParticleFilter::particles) and
/// [`weights`](ParticleFilter::weights).
pub struct ParticleFilter<'m, M: ParticleModel> {
    model: &'m M,
    particles: Vec<M::State>,
    weights: Array1<f64>,
    steps: usize,
}

impl<'m, M: ParticleModel> ParticleFilter<'m, M> {
    /// Initialize a population of `n_particles` prior draws with uniform
    /// weights.
    ///
    /// # Errors
    /// Returns [`ParticleError::InvalidParticleCount`] when `n_particles`
    /// is zero.
    pub fn new<R: Rng + ?Sized>(
        model: &'m M,
        n_particles: usize,
        rng: &mut R,
    ) -> ParticleResult<Self> {
        if n_particles == 0 {
            return Err(ParticleError::InvalidParticleCount { n: n_particles });
        }
        let particles = (0..n_particles).map(|_| model.sample_prior(rng)).collect();
        let weights = Array1::from_elem(n_particles, 1.0 / n_particles as f64);
        Ok(ParticleFilter { model, particles, weights, steps: 0 })
    }

    /// Advance the population by one observation: propagate, weight, guard,
    /// resample.
    ///
    /// After a step the population is freshly resampled and equally
    /// weighted. If every particle assigns zero (or non-finite) likelihood
    /// to `obs`, the weights reset to uniform and a warning is logged; the
    /// run continues with the propagated particles.
    pub fn step<R: Rng + ?Sized>(&mut self, obs: &M::Obs, rng: &mut R) {
        for particle in self.particles.iter_mut() {
            *particle = self.model.propagate(particle, rng);
        }
        for (weight, particle) in self.weights.iter_mut().zip(self.particles.iter()) {
            *weight = self.model.likelihood(particle, obs);
        }

        let mass = self.weights.sum();
        if mass > 0.0 && mass.is_finite() {
            self.weights.mapv_inplace(|w| w / mass);
        } else {
            log::warn!(
                "particle weights collapsed at step {} (total mass {mass}); resetting to \
                 uniform weights",
                self.steps
            );
            self.weights.fill(1.0 / self.particles.len() as f64);
        }

        self.particles = multinomial_resample(&self.particles, self.weights.view(), rng);
        self.weights.fill(1.0 / self.particles.len() as f64);
        self.steps += 1;
    }

    /// The current particle population.
    pub fn particles(&self) -> &[M::State] {
        &self.particles
    }

    /// The current normalized weights (uniform between steps).
    pub fn weights(&self) -> ArrayView1<f64> {
        self.weights.view()
    }

    /// Population size N, fixed for the life of the filter.
    pub fn n_particles(&self) -> usize {
        self.particles.len()
    }

    /// Number of observations absorbed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl<M: ParticleModel<State = f64>> ParticleFilter<'_, M> {
    /// Weighted posterior-mean estimate for scalar-state models.
    pub fn mean(&self) -> f64 {
        self.particles.iter().zip(self.weights.iter()).map(|(x, w)| x * w).sum()
    }
}

impl<M: ParticleModel<State = usize>> ParticleFilter<'_, M> {
    /// Histogram estimate of the filtering distribution for discrete-state
    /// models.
    pub fn state_histogram(&self, n_states: usize) -> Array1<f64> {
        let mut histogram = Array1::<f64>::zeros(n_states);
        for (state, weight) in self.particles.iter().zip(self.weights.iter()) {
            histogram[*state] += weight;
        }
        histogram
    }
}

/// Run a particle population over a discrete model and report per-step
/// histogram beliefs.
///
/// Convenience driver for comparing the Monte Carlo approximation against
/// the exact forward filter on the same [`DiscreteHmm`]. Returns one
/// normalized histogram over states per observation.
///
/// # Errors
/// - [`ParticleError::InvalidParticleCount`] when `n_particles` is zero.
/// - [`ParticleError::Model`] when an observation index lies outside the
///   model vocabulary (checked up front, before any sampling).
pub fn particle_filter<R: Rng + ?Sized>(
    model: &DiscreteHmm,
    observations: &[usize],
    n_particles: usize,
    rng: &mut R,
) -> ParticleResult<Vec<Array1<f64>>> {
    for &obs in observations {
        model.check_observation(obs)?;
    }

    let mut pf = ParticleFilter::new(model, n_particles, rng)?;
    let mut beliefs = Vec::with_capacity(observations.len());
    for &obs in observations {
        pf.step(&obs, rng);
        beliefs.push(pf.state_histogram(model.n_states()));
    }
    Ok(beliefs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::filter::filter;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction errors and the fixed-N invariant.
    // - Convergence of the discrete driver toward the exact forward filter
    //   as N grows, with seeded RNGs.
    // - The N = 1 single-trajectory edge case.
    // - The weight-collapse guard (run continues, histogram stays
    //   normalized).
    // - Seeded reproducibility of an entire run.
    //
    // They intentionally DO NOT cover:
    // - Resampling statistics in isolation (resample module tests).
    // - Continuous-state models (models module and integration tests).
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

    fn l1_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
    }

    #[test]
    // Purpose
    // -------
    // Reject a zero-particle configuration at construction.
    //
    // Given
    // -----
    // - `n_particles = 0`.
    //
    // Expect
    // ------
    // - `InvalidParticleCount { n: 0 }` from both the struct and the driver.
    fn zero_particles_is_a_configuration_error() {
        let model = weather_model();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = ParticleFilter::new(&model, 0, &mut rng).err().unwrap();
        assert_eq!(err, ParticleError::InvalidParticleCount { n: 0 });

        let err = particle_filter(&model, &[0, 1], 0, &mut rng).unwrap_err();
        assert_eq!(err, ParticleError::InvalidParticleCount { n: 0 });
    }

    #[test]
    // Purpose
    // -------
    // The Monte Carlo histogram must approach the exact filtered belief as
    // N grows, and N must stay fixed across the run.
    //
    // Given
    // -----
    // - The weather model, observations [0, 0, 1], N = 10 vs N = 10_000,
    //   seeded RNGs.
    //
    // Expect
    // ------
    // - Every histogram sums to 1.
    // - The large-N run lands within 0.05 L1 of the exact filter at each
    //   step and improves on the small-N run overall.
    fn histogram_converges_to_exact_filter() {
        let model = weather_model();
        let obs = [0usize, 0, 1];
        let exact = filter(&model, &obs).unwrap().beliefs;

        let mut rng_small = ChaCha8Rng::seed_from_u64(7);
        let mut rng_large = ChaCha8Rng::seed_from_u64(7);
        let small = particle_filter(&model, &obs, 10, &mut rng_small).unwrap();
        let large = particle_filter(&model, &obs, 10_000, &mut rng_large).unwrap();

        let mut small_err = 0.0;
        let mut large_err = 0.0;
        for t in 0..obs.len() {
            assert!((small[t].sum() - 1.0).abs() < 1e-12);
            assert!((large[t].sum() - 1.0).abs() < 1e-12);
            small_err += l1_distance(small[t].view(), exact[t].view());
            let step_err = l1_distance(large[t].view(), exact[t].view());
            assert!(step_err < 0.05, "t={t}: L1 {step_err} too large for N=10_000");
            large_err += step_err;
        }
        assert!(large_err < small_err, "more particles should not hurt accuracy");
    }

    #[test]
    // Purpose
    // -------
    // A single particle degenerates to one sampled trajectory with a
    // one-hot histogram, without errors.
    //
    // Given
    // -----
    // - The weather model, N = 1, observations [0, 0, 1].
    //
    // Expect
    // ------
    // - Each histogram is exactly one-hot.
    fn single_particle_yields_one_hot_histograms() {
        let model = weather_model();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let beliefs = particle_filter(&model, &[0, 0, 1], 1, &mut rng).unwrap();
        for belief in &beliefs {
            let ones = belief.iter().filter(|&&p| p == 1.0).count();
            let zeros = belief.iter().filter(|&&p| p == 0.0).count();
            assert_eq!((ones, zeros), (1, 1));
        }
    }

    #[test]
    // Purpose
    // -------
    // Total weight collapse must reset to uniform weights and keep the run
    // alive instead of erroring.
    //
    // Given
    // -----
    // - A model that never emits symbol 1, observed emitting it.
    //
    // Expect
    // ------
    // - `particle_filter` succeeds and every histogram stays normalized.
    fn weight_collapse_recovers_with_uniform_reset() {
        let impossible = DiscreteHmm::new(
            vec!["A".into(), "B".into()],
            vec!["seen".into(), "never".into()],
            array![0.5, 0.5],
            array![[0.5, 0.5], [0.5, 0.5]],
            array![[1.0, 0.0], [1.0, 0.0]],
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let beliefs = particle_filter(&impossible, &[0, 1, 0], 500, &mut rng)
            .expect("collapse must be recoverable");
        assert_eq!(beliefs.len(), 3);
        for belief in &beliefs {
            assert!((belief.sum() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // The same seed must reproduce an entire run bit for bit.
    //
    // Given
    // -----
    // - Two runs with identically seeded ChaCha8 generators.
    //
    // Expect
    // ------
    // - Identical per-step histograms.
    fn runs_are_reproducible_under_seed() {
        let model = weather_model();
        let obs = [0usize, 1, 0, 0, 1];
        let mut rng_a = ChaCha8Rng::seed_from_u64(99);
        let mut rng_b = ChaCha8Rng::seed_from_u64(99);
        let a = particle_filter(&model, &obs, 200, &mut rng_a).unwrap();
        let b = particle_filter(&model, &obs, 200, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }
}
