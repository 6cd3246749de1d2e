//! Discrete hidden-Markov model descriptor.
//!
//! Purpose
//! -------
//! Provide the validated, immutable model object consumed by the forward
//! filter, predictor, smoother, Viterbi decoder, and the discrete particle
//! filter. The descriptor replaces string-keyed probability tables with
//! integer-indexed `ndarray` matrices plus a label↔index map kept at the
//! boundary.
//!
//! Key behaviors
//! -------------
//! - [`DiscreteHmm::new`] checks dimensions, label uniqueness, and row
//!   stochasticity of π, A, and B exactly once, at construction.
//! - [`DiscreteHmm::encode_observations`] translates label sequences into
//!   index sequences, failing with the first unknown label.
//! - Accessors expose π, A, B as read-only views; the descriptor is never
//!   mutated after construction and may be shared across concurrent runs.
//!
//! Invariants & assumptions
//! ------------------------
//! - `prior.len() == n_states`, `transition` is `n_states × n_states`,
//!   `emission` is `n_states × n_observations`.
//! - All probability rows are non-negative and sum to 1 within
//!   [`PROB_TOL`](crate::hmm::validation::PROB_TOL).
//! - State and observation labels are unique within their vocabulary.
//!
//! Conventions
//! -----------
//! - Row `i` of the transition matrix is P(s′ | s = i); row `i` of the
//!   emission matrix is P(o | s = i). Beliefs are column vectors over
//!   states, so one prediction step is `Aᵀ · b`.
//! - Indices are 0-based everywhere; labels appear only at the boundary.
//!
//! Downstream usage
//! ----------------
//! - Build one descriptor per model, then pass it by reference into
//!   [`filter`](crate::hmm::filter::filter),
//!   [`smooth`](crate::hmm::smoother::smooth),
//!   [`decode`](crate::hmm::viterbi::decode), or
//!   [`particle_filter`](crate::particle::filter::particle_filter).
use crate::hmm::{
    errors::{HmmError, HmmResult},
    validation::{validate_stochastic_matrix, validate_stochastic_vector},
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use std::collections::HashMap;

/// `DiscreteHmm` — validated discrete hidden-Markov model descriptor.
///
/// Purpose
/// -------
/// Hold the prior distribution π, the row-stochastic transition matrix A,
/// the row-stochastic emission matrix B, and the state/observation label
/// vocabularies for a finite-state HMM. All invariants are enforced by
/// [`DiscreteHmm::new`]; inference code relies on them without
/// re-validation.
///
/// Fields
/// ------
/// - `states`: ordered state labels; index `i` names state `i`.
/// - `observations`: ordered observation labels; index `k` names symbol `k`.
/// - `prior`: length-`n_states` distribution over the initial state.
/// - `transition`: `n_states × n_states` matrix, row `i` = P(s′ | s = i).
/// - `emission`: `n_states × n_observations` matrix, row `i` = P(o | s = i).
///
/// Invariants
/// ----------
/// - Non-empty vocabularies with unique labels.
/// - π and every row of A and B are stochastic within
///   [`PROB_TOL`](crate::hmm::validation::PROB_TOL).
///
/// Performance
/// -----------
/// - Construction is O(n² + n·m) for the validation scans plus the label
///   maps; afterwards the type is a plain immutable container.
///
/// Notes
/// -----
/// - The descriptor carries no mutable state, so independent inference runs
///   may share one instance across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteHmm {
    states: Vec<String>,
    observations: Vec<String>,
    prior: Array1<f64>,
    transition: Array2<f64>,
    emission: Array2<f64>,
    obs_index: HashMap<String, usize>,
}

impl DiscreteHmm {
    /// Construct a validated model descriptor.
    ///
    /// Parameters
    /// ----------
    /// - `states`: non-empty, duplicate-free state labels.
    /// - `observations`: non-empty, duplicate-free observation labels.
    /// - `prior`: length `states.len()` distribution over the initial state.
    /// - `transition`: `states.len() × states.len()` row-stochastic matrix.
    /// - `emission`: `states.len() × observations.len()` row-stochastic
    ///   matrix.
    ///
    /// Returns
    /// -------
    /// `HmmResult<DiscreteHmm>`
    ///   - `Ok` when every invariant holds.
    ///   - `Err(HmmError)` naming the first violated invariant otherwise.
    ///
    /// Errors
    /// ------
    /// - `EmptyStateSpace` / `EmptyObservationSpace` for empty vocabularies.
    /// - `DuplicateLabel` for repeated labels within a vocabulary.
    /// - `DimensionMismatch` when π, A, or B do not match the vocabulary
    ///   sizes.
    /// - `NonFiniteEntry` / `NegativeEntry` / `RowNotStochastic` /
    ///   `VectorNotStochastic` from the stochasticity validators.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use rust_filtering::hmm::model::DiscreteHmm;
    /// let model = DiscreteHmm::new(
    ///     vec!["Rain".into(), "Dry".into()],
    ///     vec!["Umbrella".into(), "NoUmbrella".into()],
    ///     array![0.5, 0.5],
    ///     array![[0.7, 0.3], [0.3, 0.7]],
    ///     array![[0.9, 0.1], [0.2, 0.8]],
    /// )
    /// .unwrap();
    /// assert_eq!(model.n_states(), 2);
    /// ```
    pub fn new(
        states: Vec<String>, observations: Vec<String>, prior: Array1<f64>,
        transition: Array2<f64>, emission: Array2<f64>,
    ) -> HmmResult<Self> {
        if states.is_empty() {
            return Err(HmmError::EmptyStateSpace);
        }
        if observations.is_empty() {
            return Err(HmmError::EmptyObservationSpace);
        }
        check_unique(&states)?;
        check_unique(&observations)?;

        let n = states.len();
        let m = observations.len();
        if prior.len() != n {
            return Err(HmmError::DimensionMismatch {
                what: "prior",
                expected: n,
                actual: prior.len(),
            });
        }
        if transition.nrows() != n || transition.ncols() != n {
            return Err(HmmError::DimensionMismatch {
                what: "transition rows/cols",
                expected: n,
                actual: if transition.nrows() != n { transition.nrows() } else { transition.ncols() },
            });
        }
        if emission.nrows() != n {
            return Err(HmmError::DimensionMismatch {
                what: "emission rows",
                expected: n,
                actual: emission.nrows(),
            });
        }
        if emission.ncols() != m {
            return Err(HmmError::DimensionMismatch {
                what: "emission cols",
                expected: m,
                actual: emission.ncols(),
            });
        }

        validate_stochastic_vector("prior", prior.view())?;
        validate_stochastic_matrix("transition", transition.view())?;
        validate_stochastic_matrix("emission", emission.view())?;

        let obs_index =
            observations.iter().enumerate().map(|(k, label)| (label.clone(), k)).collect();

        Ok(DiscreteHmm { states, observations, prior, transition, emission, obs_index })
    }

    /// Number of hidden states.
    pub fn n_states(&self) -> usize {
        self.states.len()
    }

    /// Number of observation symbols.
    pub fn n_observations(&self) -> usize {
        self.observations.len()
    }

    /// Ordered state labels.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Ordered observation labels.
    pub fn observations(&self) -> &[String] {
        &self.observations
    }

    /// Initial-state distribution π.
    pub fn prior(&self) -> ArrayView1<'_, f64> {
        self.prior.view()
    }

    /// Transition matrix A, row `i` = P(s′ | s = i).
    pub fn transition(&self) -> ArrayView2<'_, f64> {
        self.transition.view()
    }

    /// Emission matrix B, row `i` = P(o | s = i).
    pub fn emission(&self) -> ArrayView2<'_, f64> {
        self.emission.view()
    }

    /// Check that `index` addresses a column of the emission matrix.
    pub fn check_observation(&self, index: usize) -> HmmResult<()> {
        if index >= self.n_observations() {
            return Err(HmmError::UnknownObservation {
                index,
                n_observations: self.n_observations(),
            });
        }
        Ok(())
    }

    /// Translate an observation-label sequence into emission-column indices.
    ///
    /// Fails with [`HmmError::UnknownObservationLabel`] at the first label
    /// that is not part of the vocabulary.
    pub fn encode_observations<S: AsRef<str>>(&self, labels: &[S]) -> HmmResult<Vec<usize>> {
        labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                self.obs_index
                    .get(label)
                    .copied()
                    .ok_or_else(|| HmmError::UnknownObservationLabel { label: label.to_string() })
            })
            .collect()
    }

    /// Translate a decoded index path back into state labels.
    pub fn state_labels(&self, path: &[usize]) -> Vec<String> {
        path.iter().map(|&i| self.states[i].clone()).collect()
    }
}

fn check_unique(labels: &[String]) -> HmmResult<()> {
    let mut seen = HashMap::with_capacity(labels.len());
    for label in labels {
        if seen.insert(label.as_str(), ()).is_some() {
            return Err(HmmError::DuplicateLabel { label: label.clone() });
        }
    }
    Ok(())
}
