//! Backward pass (β recursion) and forward-backward smoothing.
//!
//! Computes non-causal per-time beliefs over a [`DiscreteHmm`]:
//!
//! β_T(i) = 1,  β_t(i) = Σⱼ A(i, j)·B(j, o_{t+1})·β_{t+1}(j)
//!
//! normalized at every step, combined with the filtered α vectors into
//! γ_t(i) ∝ α_t(i)·β_t(i). Smoothing needs the complete observation
//! sequence and O(T·|S|) memory for α and β before any γ exists; it cannot
//! run online like the forward filter.
//!
//! ## Boundary contract
//! - γ_T equals α_T exactly: β_T is all-ones, so the final smoothed belief
//!   is the final filtered belief. The implementation reuses the filtered
//!   vector for that step rather than renormalizing a product of 1s.
//!
//! ## Degeneracy
//! - A zero-mass β or γ at some step is fatal
//!   ([`HmmError::DegenerateBelief`]); the forward pass has already
//!   rejected zero-likelihood prefixes, so this only triggers for models
//!   whose future evidence is impossible from every state.
use crate::hmm::{
    errors::{HmmError, HmmResult},
    filter::filter,
    model::DiscreteHmm,
    validation::normalize,
};
use ndarray::Array1;

/// Smooth a full observation-index sequence.
///
/// Returns one normalized smoothed belief γ_t per observation, combining
/// the causal α recursion with the anti-causal β recursion. An empty
/// sequence yields an empty vector.
///
/// # Errors
/// Propagates the forward filter's vocabulary and degeneracy errors, and
/// raises [`HmmError::DegenerateBelief`] if a β or γ vector collapses to
/// zero mass.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_filtering::hmm::{filter::filter, model::DiscreteHmm, smoother::smooth};
/// let model = DiscreteHmm::new(
///     vec!["Rain".into(), "Dry".into()],
///     vec!["Umbrella".into(), "NoUmbrella".into()],
///     array![0.5, 0.5],
///     array![[0.7, 0.3], [0.3, 0.7]],
///     array![[0.9, 0.1], [0.2, 0.8]],
/// )
/// .unwrap();
/// let smoothed = smooth(&model, &[0, 0, 1]).unwrap();
/// let filtered = filter(&model, &[0, 0, 1]).unwrap();
/// assert_eq!(smoothed[2], filtered.beliefs[2]);
/// ```
pub fn smooth(model: &DiscreteHmm, observations: &[usize]) -> HmmResult<Vec<Array1<f64>>> {
    let alphas = filter(model, observations)?.beliefs;
    let t_len = alphas.len();
    if t_len == 0 {
        return Ok(Vec::new());
    }

    let a = model.transition();
    let b = model.emission();

    // β recursion, newest to oldest. betas[t] pairs with alphas[t].
    let mut betas = vec![Array1::<f64>::ones(model.n_states()); t_len];
    for t in (0..t_len - 1).rev() {
        let weighted = &b.column(observations[t + 1]) * &betas[t + 1];
        let mut beta = a.dot(&weighted);
        if normalize(&mut beta) <= 0.0 {
            return Err(HmmError::DegenerateBelief { t });
        }
        betas[t] = beta;
    }

    let mut smoothed = Vec::with_capacity(t_len);
    for t in 0..t_len {
        if t == t_len - 1 {
            // β_T = 1: the final smoothed belief is the final filtered one.
            smoothed.push(alphas[t].clone());
            continue;
        }
        let mut gamma = &alphas[t] * &betas[t];
        if normalize(&mut gamma) <= 0.0 {
            return Err(HmmError::DegenerateBelief { t });
        }
        smoothed.push(gamma);
    }
    Ok(smoothed)
}
