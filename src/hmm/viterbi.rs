//! Viterbi decoding: the single most likely hidden-state path.
//!
//! Implements the max-product dynamic program over a [`DiscreteHmm`]:
//!
//! δ₁(j) = π(j)·B(j, o₁),  δ_t(j) = maxᵢ[δ_{t−1}(i)·A(i, j)]·B(j, o_t)
//!
//! with an explicit backpointer table ψ and iterative reconstruction (no
//! recursion, so path length is bounded only by memory). Ties select the
//! lowest-indexed predecessor state, which makes decoding deterministic and
//! reproducible.
//!
//! The decoded path is a different object from the per-step marginal argmax
//! of the smoother: the smoother maximizes each marginal separately, the
//! decoder maximizes the joint path probability. The two disagree on
//! perfectly valid models.
//!
//! δ rows are rescaled to sum 1 after each step; rescaling by a positive
//! constant preserves every argmax, and it keeps long sequences away from
//! underflow.
use crate::hmm::{
    errors::{HmmError, HmmResult},
    model::DiscreteHmm,
};
use ndarray::{Array1, Array2};

/// Decode the maximum a posteriori state path for an observation-index
/// sequence.
///
/// Returns one state index per observation; the empty sequence decodes to
/// the empty path.
///
/// # Errors
/// - `HmmError::UnknownObservation` for indices outside the emission
///   vocabulary.
/// - `HmmError::ZeroProbabilityPath { t }` when δ_t is all-zero, i.e. the
///   model assigns zero probability to the observed data along every path.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_filtering::hmm::{model::DiscreteHmm, viterbi::decode};
/// let model = DiscreteHmm::new(
///     vec!["Rain".into(), "Dry".into()],
///     vec!["Umbrella".into(), "NoUmbrella".into()],
///     array![0.5, 0.5],
///     array![[0.7, 0.3], [0.3, 0.7]],
///     array![[0.9, 0.1], [0.2, 0.8]],
/// )
/// .unwrap();
/// assert_eq!(decode(&model, &[0, 0, 1]).unwrap(), vec![0, 0, 1]);
/// ```
pub fn decode(model: &DiscreteHmm, observations: &[usize]) -> HmmResult<Vec<usize>> {
    let t_len = observations.len();
    if t_len == 0 {
        return Ok(Vec::new());
    }
    for &obs in observations {
        model.check_observation(obs)?;
    }

    let n = model.n_states();
    let a = model.transition();
    let b = model.emission();

    let mut delta = Array2::<f64>::zeros((t_len, n));
    let mut backpointer = Array2::<usize>::zeros((t_len, n));

    let mut first = Array1::<f64>::zeros(n);
    for j in 0..n {
        first[j] = model.prior()[j] * b[[j, observations[0]]];
    }
    rescale_row(&mut first, 0)?;
    delta.row_mut(0).assign(&first);

    for t in 1..t_len {
        let mut row = Array1::<f64>::zeros(n);
        for j in 0..n {
            // Strict > keeps the lowest-indexed predecessor on ties.
            let mut best_i = 0;
            let mut best = delta[[t - 1, 0]] * a[[0, j]];
            for i in 1..n {
                let score = delta[[t - 1, i]] * a[[i, j]];
                if score > best {
                    best = score;
                    best_i = i;
                }
            }
            row[j] = best * b[[j, observations[t]]];
            backpointer[[t, j]] = best_i;
        }
        rescale_row(&mut row, t)?;
        delta.row_mut(t).assign(&row);
    }

    // Terminate at the best final state, lowest index on ties, then follow
    // the backpointers.
    let mut last = 0;
    for j in 1..n {
        if delta[[t_len - 1, j]] > delta[[t_len - 1, last]] {
            last = j;
        }
    }
    let mut path = vec![0usize; t_len];
    path[t_len - 1] = last;
    for t in (1..t_len).rev() {
        path[t - 1] = backpointer[[t, path[t]]];
    }
    Ok(path)
}

/// Decode and translate the path back into state labels.
pub fn decode_labels(model: &DiscreteHmm, observations: &[usize]) -> HmmResult<Vec<String>> {
    Ok(model.state_labels(&decode(model, observations)?))
}

/// Rescale a δ row to sum 1, failing when the row has collapsed to zero.
fn rescale_row(row: &mut Array1<f64>, t: usize) -> HmmResult<()> {
    let mass = row.sum();
    if mass <= 0.0 {
        return Err(HmmError::ZeroProbabilityPath { t });
    }
    row.mapv_inplace(|p| p / mass);
    Ok(())
}
