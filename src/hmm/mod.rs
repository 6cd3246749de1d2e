//! hmm — discrete hidden-Markov inference: model, filter, smoother, decoder.
//!
//! Purpose
//! -------
//! Provide the discrete-state, discrete-observation inference stack: a
//! validated model descriptor, the causal forward (α) filter with running
//! log-likelihood, the k-step predictor, the non-causal forward-backward
//! smoother, and the Viterbi path decoder, together with the shared error
//! surface. This is the main entry point for categorical state estimation
//! in the crate, and the surface most consumers (including Python bindings)
//! should depend on.
//!
//! Key behaviors
//! -------------
//! - Validate every model exactly once at construction ([`DiscreteHmm::new`]):
//!   labels unique and non-empty, π / A / B finite, non-negative, and
//!   stochastic within [`PROB_TOL`](crate::hmm::validation::PROB_TOL).
//!   Recursions assume validated inputs and never re-check them.
//! - Run the α recursion online ([`ForwardFilter`]) or in batch ([`filter`]),
//!   renormalizing every step and accumulating Σ ln(mass) as the sequence
//!   log-likelihood.
//! - Project beliefs k steps ahead without evidence ([`predict`]), smooth
//!   with the β recursion ([`smooth`]), and decode the joint-MAP state path
//!   ([`decode`] / [`decode_labels`]).
//! - Centralize error reporting in [`errors`] ([`HmmError`] and the
//!   [`HmmResult`] alias) so callers see one typed surface across the stack.
//!
//! Invariants & assumptions
//! ------------------------
//! - Beliefs are `Array1<f64>` of length `n_states`, normalized to sum 1;
//!   transition and emission matrices are row-stochastic with rows indexed
//!   by the current state.
//! - Observations enter as 0-based indices into the observation vocabulary;
//!   [`DiscreteHmm::encode_observations`] maps labels to indices up front.
//! - A belief that collapses to zero mass mid-recursion is fatal and
//!   reported with its time index; nothing in this module substitutes a
//!   default belief.
//!
//! Conventions
//! -----------
//! - Time is 0-based: `t = 0` is the first observation, and the first filter
//!   step applies the emission to the prior without a transition.
//! - All recursions are iterative; sequence length is bounded only by
//!   memory.
//! - The module performs no I/O and no logging; error conditions surface as
//!   [`HmmResult`].
//!
//! Downstream usage
//! ----------------
//! - Typical end-to-end flow:
//!   1. Construct a [`DiscreteHmm`] from labels, π, A, and B.
//!   2. Encode observation labels with `encode_observations`.
//!   3. Filter with [`filter`] (batch) or [`ForwardFilter`] (streaming),
//!      then [`predict`], [`smooth`], or [`decode`] as needed.
//! - The particle module reuses this model for its discrete driver, and the
//!   Python bindings in the crate root wrap this surface directly.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each submodule and pin down: validation
//!   payloads, the hand-computed umbrella α₁ = [9/11, 2/11], streaming /
//!   batch filter agreement, the γ_T == α_T smoother boundary, the
//!   deterministic Viterbi tie-break, and every error path with its typed
//!   payload. Integration tests exercise the full pipeline end to end.

pub mod errors;
pub mod filter;
pub mod model;
pub mod smoother;
pub mod validation;
pub mod viterbi;

// ---- Re-exports (primary public surface) ----------------------------------
//
// The everyday types and entry points. Validation helpers remain under
// `validation` for callers that build their own beliefs.

pub use self::errors::{HmmError, HmmResult};
pub use self::filter::{Filtered, ForwardFilter, filter, predict};
pub use self::model::DiscreteHmm;
pub use self::smoother::smooth;
pub use self::viterbi::{decode, decode_labels};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_filtering::hmm::prelude::*;
//
// to import the discrete-inference surface in one line.

pub mod prelude {
    pub use super::{
        DiscreteHmm, Filtered, ForwardFilter, HmmError, HmmResult, decode, decode_labels, filter,
        predict, smooth,
    };
}
