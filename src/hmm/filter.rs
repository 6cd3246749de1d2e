//! Forward filtering (α recursion) and k-step belief prediction.
//!
//! Implements the causal belief update over a [`DiscreteHmm`]: the filtered
//! belief after `t` observations is the normalized α vector
//!
//! α₁(j) = π(j)·B(j, o₁),  α_t(j) = B(j, o_t)·Σᵢ α_{t−1}(i)·A(i, j)
//!
//! with renormalization after every step to control underflow. The
//! per-step normalizers are accumulated as a running log-sum, so the exact
//! sequence log-likelihood survives the rescaling.
//!
//! ## What this module does
//! - [`ForwardFilter`] owns the belief between observations, making the
//!   filter resumable for streaming use; the belief is an explicit,
//!   caller-inspectable value at every point.
//! - [`filter`] is the batch driver: one normalized belief per observation
//!   plus the accumulated log-likelihood.
//! - [`predict`] projects a belief `k` steps ahead through the transition
//!   matrix without evidence; rows of A sum to 1, so normalization is
//!   preserved automatically.
//!
//! ## Invariants (enforced upstream)
//! - The model passed in is validated by
//!   [`DiscreteHmm::new`](crate::hmm::model::DiscreteHmm::new); only
//!   observation indices and caller-supplied beliefs are checked here.
//!
//! ## Degeneracy
//! - An all-zero α at step `t` means the model assigns zero likelihood to
//!   the data; that is fatal ([`HmmError::DegenerateBelief`]) because every
//!   later belief would be meaningless.
use crate::hmm::{
    errors::{HmmError, HmmResult},
    model::DiscreteHmm,
    validation::{normalize, validate_stochastic_vector},
};
use ndarray::{Array1, ArrayView1};

/// Output of the batch forward filter.
///
/// `beliefs[t]` is the normalized filtered belief after observation `t`;
/// `log_likelihood` is Σ_t ln c_t where c_t is the pre-normalization mass
/// of α_t, i.e. the log-probability of the whole observation sequence
/// under the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Filtered {
    /// One normalized belief vector per observation.
    pub beliefs: Vec<Array1<f64>>,
    /// Accumulated log of the per-step normalization constants.
    pub log_likelihood: f64,
}

/// `ForwardFilter` — resumable α recursion over a [`DiscreteHmm`].
///
/// Purpose
/// -------
/// Own the filtered belief between observations so that callers can feed
/// observations one at a time (streaming) or in batches, persist the belief,
/// and resume later. Distinct runs own distinct filters; only the immutable
/// model is shared.
///
/// Key behaviors
/// -------------
/// - Starts at the prior π; the first observation applies emission
///   weighting only, later steps apply transition then emission.
/// - Renormalizes after every step and accumulates the log normalizer.
/// - Rejects unknown observation indices and all-zero beliefs with typed
///   errors; after an error the filter is left unchanged.
///
/// Invariants
/// ----------
/// - `belief` sums to 1 within
///   [`PROB_TOL`](crate::hmm::validation::PROB_TOL) after every successful
///   step.
#[derive(Debug, Clone)]
pub struct ForwardFilter<'m> {
    model: &'m DiscreteHmm,
    belief: Array1<f64>,
    log_likelihood: f64,
    steps: usize,
}

impl<'m> ForwardFilter<'m> {
    /// Create a filter positioned at the prior with zero observations seen.
    pub fn new(model: &'m DiscreteHmm) -> Self {
        ForwardFilter { model, belief: model.prior().to_owned(), log_likelihood: 0.0, steps: 0 }
    }

    /// Fold one observation into the belief.
    ///
    /// Applies the α recursion for the next time step and returns a view of
    /// the updated, normalized belief.
    ///
    /// # Errors
    /// - `HmmError::UnknownObservation` if `obs` is outside the emission
    ///   vocabulary; the belief is not touched.
    /// - `HmmError::DegenerateBelief { t }` if the updated belief has zero
    ///   mass; `t` is the 0-based index of the offending observation.
    pub fn step(&mut self, obs: usize) -> HmmResult<ArrayView1<'_, f64>> {
        self.model.check_observation(obs)?;

        let emission_col = self.model.emission().column(obs).to_owned();
        let mut next = if self.steps == 0 {
            // First observation: weight the prior, no transition yet.
            &self.belief * &emission_col
        } else {
            let predicted = self.model.transition().t().dot(&self.belief);
            predicted * emission_col
        };

        let mass = normalize(&mut next);
        if mass <= 0.0 {
            return Err(HmmError::DegenerateBelief { t: self.steps });
        }

        self.belief = next;
        self.log_likelihood += mass.ln();
        self.steps += 1;
        Ok(self.belief.view())
    }

    /// Current belief (the prior before any observation).
    pub fn belief(&self) -> ArrayView1<'_, f64> {
        self.belief.view()
    }

    /// Accumulated log-likelihood of the observations folded in so far.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Number of observations folded in so far.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

/// Run the forward filter over a full observation-index sequence.
///
/// Returns one normalized belief per observation and the sequence
/// log-likelihood. An empty sequence yields no beliefs and log-likelihood
/// 0; the caller's belief remains the prior.
///
/// # Errors
/// Propagates [`HmmError::UnknownObservation`] and
/// [`HmmError::DegenerateBelief`] from the per-step recursion.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_filtering::hmm::{filter::filter, model::DiscreteHmm};
/// let model = DiscreteHmm::new(
///     vec!["Rain".into(), "Dry".into()],
///     vec!["Umbrella".into(), "NoUmbrella".into()],
///     array![0.5, 0.5],
///     array![[0.7, 0.3], [0.3, 0.7]],
///     array![[0.9, 0.1], [0.2, 0.8]],
/// )
/// .unwrap();
/// let out = filter(&model, &[0, 0, 1]).unwrap();
/// assert_eq!(out.beliefs.len(), 3);
/// assert!((out.beliefs[0][0] - 0.45 / 0.55).abs() < 1e-12);
/// ```
pub fn filter(model: &DiscreteHmm, observations: &[usize]) -> HmmResult<Filtered> {
    let mut ff = ForwardFilter::new(model);
    let mut beliefs = Vec::with_capacity(observations.len());
    for &obs in observations {
        beliefs.push(ff.step(obs)?.to_owned());
    }
    Ok(Filtered { beliefs, log_likelihood: ff.log_likelihood() })
}

/// Project a belief `k` steps ahead through the transition matrix.
///
/// Right-multiplies the belief row vector by A exactly `k` times; no
/// emission step and no renormalization (A's rows sum to 1, so the result
/// stays a distribution). `k = 0` returns the belief unchanged.
///
/// # Errors
/// - `HmmError::DimensionMismatch` when the belief length differs from the
///   state count.
/// - `HmmError::VectorNotStochastic` / entry errors when the input is not a
///   distribution.
pub fn predict(model: &DiscreteHmm, belief: ArrayView1<f64>, k: usize) -> HmmResult<Array1<f64>> {
    if belief.len() != model.n_states() {
        return Err(HmmError::DimensionMismatch {
            what: "belief",
            expected: model.n_states(),
            actual: belief.len(),
        });
    }
    validate_stochastic_vector("belief", belief)?;

    let transition = model.transition();
    let transition_t = transition.t();
    let mut projected = belief.to_owned();
    for _ in 0..k {
        projected = transition_t.dot(&projected);
    }
    Ok(projected)
}
